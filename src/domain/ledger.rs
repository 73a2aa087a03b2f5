//! Append-only bookkeeping on a single account.
//!
//! Every balance change goes through [`apply_balance_delta`], which records
//! the explaining transaction in the same call. Both sequences are kept
//! newest-first and ids grow by one from the newest entry.

use tracing::debug;

use crate::{
    common::{error::CasinoError, money::Money},
    domain::{
        account::Account,
        history::{GameHistoryEntry, GameResult},
        transaction::{TransactionRecord, TxKind, TxStatus},
    },
};

pub const WELCOME_BONUS_LABEL: &str = "Welcome Bonus";

/// Prepends a transaction without touching the balance.
pub(crate) fn record_transaction<'a>(
    account: &'a mut Account,
    kind: TxKind,
    amount: Money,
    status: TxStatus,
    game: Option<&str>,
) -> &'a TransactionRecord {
    let id = account.transactions.first().map_or(1, |t| t.id + 1);
    let record = TransactionRecord::new(id, kind, amount, status, game.map(str::to_string));
    debug!(email = %account.email, id, %kind, %amount, "transaction recorded");
    account.transactions.insert(0, record);
    &account.transactions[0]
}

/// Adds `delta` to the balance and records it as a `kind` transaction.
///
/// Credits (`deposit`, `win`, `bonus`) must be positive and debits
/// (`withdraw`, `bet`) negative; anything else is `InvalidAmount` and leaves
/// the account untouched, as does a balance that would leave the `Money`
/// range (`AmountOutOfRange`).
pub fn apply_balance_delta<'a>(
    account: &'a mut Account,
    delta: Money,
    kind: TxKind,
    status: TxStatus,
    game: Option<&str>,
) -> Result<&'a TransactionRecord, CasinoError> {
    let credit = matches!(kind, TxKind::Deposit | TxKind::Win | TxKind::Bonus);
    let well_signed = if credit {
        delta.is_positive()
    } else {
        delta < Money::zero()
    };
    if !well_signed {
        return Err(CasinoError::InvalidAmount);
    }

    account.balance = account
        .balance
        .checked_add(delta)
        .ok_or(CasinoError::AmountOutOfRange)?;
    Ok(record_transaction(account, kind, delta, status, game))
}

/// Prepends a resolved wager to the game history.
pub fn record_game_history<'a>(
    account: &'a mut Account,
    game: &str,
    bet_amount: Money,
    win_amount: Money,
    result: GameResult,
) -> Result<&'a GameHistoryEntry, CasinoError> {
    if bet_amount < Money::zero() || win_amount < Money::zero() {
        return Err(CasinoError::InvalidAmount);
    }
    let consistent = match result {
        GameResult::Win => win_amount.is_positive(),
        GameResult::Loss => win_amount.is_zero(),
    };
    if !consistent {
        return Err(CasinoError::InconsistentResult);
    }

    let id = account.game_history.first().map_or(1, |g| g.id + 1);
    let entry = GameHistoryEntry {
        id,
        game: game.to_string(),
        bet_amount,
        win_amount,
        net_amount: win_amount - bet_amount,
        result,
        timestamp: chrono::Utc::now(),
    };
    debug!(email = %account.email, id, game, %result, "game history recorded");
    account.game_history.insert(0, entry);
    Ok(&account.game_history[0])
}

/// Credits the welcome bonus once per account. Returns whether it was granted.
pub fn grant_welcome_bonus(account: &mut Account, amount: Money) -> Result<bool, CasinoError> {
    if account.has_received_bonus {
        return Ok(false);
    }
    apply_balance_delta(
        account,
        amount,
        TxKind::Bonus,
        TxStatus::Completed,
        Some(WELCOME_BONUS_LABEL),
    )?;
    account.has_received_bonus = true;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn account() -> Account {
        Account::new("p@c.io", "secret1", "P")
    }

    #[test]
    fn records_are_prepended_with_increasing_ids() {
        let mut acc = account();
        for n in 1..=5 {
            let rec = apply_balance_delta(
                &mut acc,
                money("0.001"),
                TxKind::Deposit,
                TxStatus::Completed,
                None,
            )
            .unwrap();
            assert_eq!(rec.id, n);
        }

        let ids: Vec<u32> = acc.transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);
        assert_eq!(acc.latest_transaction().map(|t| t.id), Some(5));
    }

    #[test]
    fn balance_tracks_sum_of_transactions() {
        let mut acc = account();
        grant_welcome_bonus(&mut acc, money("0.002222")).unwrap();
        apply_balance_delta(&mut acc, -money("0.001"), TxKind::Bet, TxStatus::Completed, Some("Crash")).unwrap();
        apply_balance_delta(&mut acc, money("0.003"), TxKind::Win, TxStatus::Completed, Some("Crash")).unwrap();
        apply_balance_delta(&mut acc, -money("0.00101"), TxKind::Withdraw, TxStatus::Pending, None).unwrap();

        assert_eq!(acc.balance(), money("0.003212"));
        assert!(acc.is_balanced());
    }

    #[test]
    fn wrongly_signed_delta_is_rejected_without_side_effects() {
        let mut acc = account();
        let err = apply_balance_delta(&mut acc, money("0.001"), TxKind::Bet, TxStatus::Completed, None)
            .unwrap_err();
        assert_eq!(err, CasinoError::InvalidAmount);
        assert!(apply_balance_delta(&mut acc, Money::zero(), TxKind::Deposit, TxStatus::Completed, None).is_err());
        assert!(acc.transactions.is_empty());
        assert_eq!(acc.balance(), Money::zero());
    }

    #[test]
    fn returned_record_outlives_the_game_label() {
        let mut acc = account();
        let rec = {
            let label = String::from("Crash");
            apply_balance_delta(&mut acc, money("0.004"), TxKind::Win, TxStatus::Completed, Some(&label))
                .unwrap()
        };
        assert_eq!(rec.game.as_deref(), Some("Crash"));

        let entry = {
            let label = String::from("Dice Roll");
            record_game_history(&mut acc, &label, money("0.001"), Money::zero(), GameResult::Loss).unwrap()
        };
        assert_eq!(entry.game, "Dice Roll");
    }

    #[test]
    fn balance_overflow_is_rejected_without_side_effects() {
        let mut acc = account();
        apply_balance_delta(&mut acc, Money::new(i64::MAX - 10), TxKind::Deposit, TxStatus::Completed, None)
            .unwrap();

        let err = apply_balance_delta(&mut acc, Money::new(11), TxKind::Deposit, TxStatus::Completed, None)
            .unwrap_err();
        assert_eq!(err, CasinoError::AmountOutOfRange);
        assert_eq!(acc.balance(), Money::new(i64::MAX - 10));
        assert_eq!(acc.transactions.len(), 1);
        assert!(acc.is_balanced());
    }

    #[test]
    fn record_transaction_leaves_balance_alone() {
        let mut acc = account();
        let rec = record_transaction(&mut acc, TxKind::Withdraw, -money("0.002"), TxStatus::Failed, None);
        assert_eq!(rec.status, TxStatus::Failed);
        assert_eq!(acc.balance(), Money::zero());
    }

    #[test]
    fn game_history_computes_net_and_prepends() {
        let mut acc = account();
        record_game_history(&mut acc, "Dice Roll", money("0.001"), Money::zero(), GameResult::Loss).unwrap();
        let entry = record_game_history(&mut acc, "Crash", money("0.001"), money("0.003"), GameResult::Win)
            .unwrap();

        assert_eq!(entry.id, 2);
        assert_eq!(entry.net_amount, money("0.002"));
        assert_eq!(acc.game_history[0].game, "Crash");
        assert_eq!(acc.game_history[1].net_amount, -money("0.001"));
    }

    #[test]
    fn game_history_rejects_inconsistent_result() {
        let mut acc = account();
        assert_eq!(
            record_game_history(&mut acc, "Crash", money("0.001"), Money::zero(), GameResult::Win),
            Err(CasinoError::InconsistentResult)
        );
        assert_eq!(
            record_game_history(&mut acc, "Crash", money("0.001"), money("0.002"), GameResult::Loss),
            Err(CasinoError::InconsistentResult)
        );
        assert!(acc.game_history.is_empty());
    }

    #[test]
    fn welcome_bonus_is_granted_once() {
        let mut acc = account();
        assert_eq!(grant_welcome_bonus(&mut acc, money("0.002222")), Ok(true));
        assert_eq!(grant_welcome_bonus(&mut acc, money("0.002222")), Ok(false));

        assert!(acc.has_received_bonus);
        assert_eq!(acc.transactions.len(), 1);
        let bonus = &acc.transactions[0];
        assert_eq!(bonus.kind, TxKind::Bonus);
        assert_eq!(bonus.status, TxStatus::Completed);
        assert_eq!(bonus.game.as_deref(), Some(WELCOME_BONUS_LABEL));
        assert_eq!(acc.balance(), money("0.002222"));
    }
}
