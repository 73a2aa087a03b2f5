use rand::Rng;

use crate::{
    common::{error::CasinoError, money::Money},
    domain::history::GameResult,
    games::slot::{self, Reels},
};

/// Chance that a threshold game pays out.
pub const WIN_PROBABILITY: f64 = 0.45;

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub result: GameResult,
    /// Zero on a loss.
    pub payout: Money,
    pub multiplier: f64,
    /// Set for slot spins.
    pub reels: Option<Reels>,
}

impl Outcome {
    pub fn loss() -> Self {
        Self {
            result: GameResult::Loss,
            payout: Money::zero(),
            multiplier: 0.0,
            reels: None,
        }
    }

    pub fn win(payout: Money, multiplier: f64) -> Self {
        Self {
            result: GameResult::Win,
            payout,
            multiplier,
            reels: None,
        }
    }

    pub fn is_win(&self) -> bool {
        self.result == GameResult::Win
    }
}

/// How a game turns a wager into an outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutcomeModel {
    /// Wins on the upper `win_probability` tail of one uniform draw and pays a
    /// uniform multiplier in `[1, max_multiplier)`.
    Threshold {
        max_multiplier: f64,
        win_probability: f64,
    },
    /// Three-reel symbol match, see [`slot`].
    Slots,
}

impl OutcomeModel {
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R, wager: Money) -> Result<Outcome, CasinoError> {
        match *self {
            OutcomeModel::Threshold {
                max_multiplier,
                win_probability,
            } => draw(rng, wager, max_multiplier, win_probability),
            OutcomeModel::Slots => spin(rng, wager),
        }
    }

    /// Largest multiple of the wager this model can pay.
    pub fn max_multiplier(&self) -> f64 {
        match *self {
            OutcomeModel::Threshold { max_multiplier, .. } => max_multiplier,
            OutcomeModel::Slots => f64::from(slot::JACKPOT_MULTIPLIER),
        }
    }

    /// Largest payout `wager` can produce, `None` when it does not fit in `Money`.
    pub fn max_payout(&self, wager: Money) -> Option<Money> {
        match *self {
            OutcomeModel::Threshold { max_multiplier, .. } => wager.scale_by(max_multiplier),
            OutcomeModel::Slots => wager.times(slot::JACKPOT_MULTIPLIER),
        }
    }
}

/// One threshold draw against `wager`.
pub fn draw<R: Rng + ?Sized>(
    rng: &mut R,
    wager: Money,
    max_multiplier: f64,
    win_probability: f64,
) -> Result<Outcome, CasinoError> {
    let r: f64 = rng.r#gen();
    if !wins(r, win_probability) {
        return Ok(Outcome::loss());
    }
    let spread: f64 = rng.r#gen();
    settle_win(wager, max_multiplier, spread)
}

fn wins(r: f64, win_probability: f64) -> bool {
    r > 1.0 - win_probability
}

fn settle_win(wager: Money, max_multiplier: f64, spread: f64) -> Result<Outcome, CasinoError> {
    let multiplier = 1.0 + spread * (max_multiplier - 1.0);
    let payout = wager
        .scale_by(multiplier)
        .ok_or(CasinoError::InvalidAmount)?;
    Ok(Outcome::win(payout, multiplier))
}

fn spin<R: Rng + ?Sized>(rng: &mut R, wager: Money) -> Result<Outcome, CasinoError> {
    let reels = slot::spin(rng);
    let multiplier = slot::multiplier(&reels);
    let payout = slot::payout(&reels, wager).ok_or(CasinoError::InvalidAmount)?;

    let mut outcome = if payout.is_positive() {
        Outcome::win(payout, f64::from(multiplier))
    } else {
        Outcome::loss()
    };
    outcome.reels = Some(reels);
    Ok(outcome)
}
