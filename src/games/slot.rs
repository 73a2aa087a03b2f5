//! Three-reel slot machine.
//!
//! Each reel lands on one of eight symbols with equal odds. A diamond triple
//! pays 50x, a seven triple 20x, any other triple 10x, and exactly two
//! matching reels 2x.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Cherry,
    Lemon,
    Orange,
    Grape,
    Diamond,
    Seven,
    Bell,
    Star,
}

pub type Reels = [Symbol; 3];

pub const JACKPOT_MULTIPLIER: u32 = 50;
pub const SEVENS_MULTIPLIER: u32 = 20;
pub const TRIPLE_MULTIPLIER: u32 = 10;
pub const PAIR_MULTIPLIER: u32 = 2;

impl Symbol {
    pub const ALL: [Symbol; 8] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Orange,
        Symbol::Grape,
        Symbol::Diamond,
        Symbol::Seven,
        Symbol::Bell,
        Symbol::Star,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Symbol {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

pub fn spin<R: Rng + ?Sized>(rng: &mut R) -> Reels {
    [Symbol::random(rng), Symbol::random(rng), Symbol::random(rng)]
}

/// Payout multiple for a set of reels; zero means a loss.
pub fn multiplier(reels: &Reels) -> u32 {
    let [a, b, c] = *reels;
    if a == b && b == c {
        match a {
            Symbol::Diamond => JACKPOT_MULTIPLIER,
            Symbol::Seven => SEVENS_MULTIPLIER,
            _ => TRIPLE_MULTIPLIER,
        }
    } else if a == b || b == c || a == c {
        PAIR_MULTIPLIER
    } else {
        0
    }
}

/// `bet * multiplier(reels)`, `None` on overflow.
pub fn payout(reels: &Reels, bet: Money) -> Option<Money> {
    bet.times(multiplier(reels))
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Symbol::Cherry => "cherry",
            Symbol::Lemon => "lemon",
            Symbol::Orange => "orange",
            Symbol::Grape => "grape",
            Symbol::Diamond => "diamond",
            Symbol::Seven => "seven",
            Symbol::Bell => "bell",
            Symbol::Star => "star",
        };
        f.write_str(s)
    }
}
