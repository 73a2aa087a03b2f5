use tracing::info;

use crate::{
    common::{error::CasinoError, money::Money},
    domain::{
        ledger,
        store::AccountStore,
        transaction::{TxKind, TxStatus},
    },
    games::{catalog::GameDef, outcome::Outcome},
    worker::handlers::load_account,
};

/// Debits the bet and records it. Returns the balance after the debit.
///
/// A bet whose top payout cannot be represented is refused up front, so every
/// draw for an accepted bet yields a valid outcome.
pub fn place(
    store: &mut dyn AccountStore,
    game: &GameDef,
    email: &str,
    amount: Money,
) -> Result<Money, CasinoError> {
    if !amount.is_positive() {
        return Err(CasinoError::InvalidAmount);
    }
    if amount < game.min_bet {
        return Err(CasinoError::BelowMinimum {
            minimum: game.min_bet,
        });
    }
    if game.model.max_payout(amount).is_none() {
        return Err(CasinoError::AmountOutOfRange);
    }

    let mut account = load_account(store, email)?;
    if account.balance() < amount {
        return Err(CasinoError::InsufficientBalance {
            required: amount,
            available: account.balance(),
        });
    }

    ledger::apply_balance_delta(&mut account, -amount, TxKind::Bet, TxStatus::Completed, Some(game.name))?;
    let balance = account.balance();
    store.update(account)?;
    Ok(balance)
}

/// Credits a win (if any) and records the game history entry in one commit.
/// Returns the final balance.
pub fn settle(
    store: &mut dyn AccountStore,
    game: &GameDef,
    email: &str,
    bet: Money,
    outcome: &Outcome,
) -> Result<Money, CasinoError> {
    let mut account = load_account(store, email)?;
    if outcome.is_win() {
        ledger::apply_balance_delta(
            &mut account,
            outcome.payout,
            TxKind::Win,
            TxStatus::Completed,
            Some(game.name),
        )?;
    }
    ledger::record_game_history(&mut account, game.name, bet, outcome.payout, outcome.result)?;
    let balance = account.balance();
    store.update(account)?;

    info!(
        email,
        game = game.name,
        %bet,
        payout = %outcome.payout,
        result = %outcome.result,
        %balance,
        "wager resolved"
    );
    Ok(balance)
}
