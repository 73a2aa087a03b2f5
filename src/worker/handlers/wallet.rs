use tracing::info;

use crate::{
    common::{config::CasinoConfig, error::CasinoError, money::Money},
    domain::{
        account::Account,
        ledger,
        store::AccountStore,
        transaction::{TxKind, TxStatus},
    },
    worker::handlers::load_account,
};

/// Credits a completed deposit and returns the new balance.
pub fn deposit(
    store: &mut dyn AccountStore,
    config: &CasinoConfig,
    email: &str,
    amount: Money,
) -> Result<Money, CasinoError> {
    if amount < config.min_deposit {
        return Err(CasinoError::BelowMinimum {
            minimum: config.min_deposit,
        });
    }

    let mut account = load_account(store, email)?;
    ledger::apply_balance_delta(&mut account, amount, TxKind::Deposit, TxStatus::Completed, None)?;
    let balance = account.balance();
    store.update(account)?;

    info!(email, %amount, %balance, "deposit completed");
    Ok(balance)
}

/// Debits `amount` plus the network fee as a pending withdrawal and returns
/// the new balance.
pub fn withdraw(
    store: &mut dyn AccountStore,
    config: &CasinoConfig,
    email: &str,
    amount: Money,
    address: &str,
) -> Result<Money, CasinoError> {
    if amount < config.min_withdrawal {
        return Err(CasinoError::BelowMinimum {
            minimum: config.min_withdrawal,
        });
    }

    let mut account = load_account(store, email)?;
    let total = amount
        .checked_add(config.network_fee)
        .ok_or(CasinoError::AmountOutOfRange)?;
    if total > account.balance() {
        return Err(CasinoError::InsufficientBalance {
            required: total,
            available: account.balance(),
        });
    }
    if address.trim().chars().count() < config.min_address_len {
        return Err(CasinoError::InvalidAddress);
    }

    ledger::apply_balance_delta(&mut account, -total, TxKind::Withdraw, TxStatus::Pending, None)?;
    let balance = account.balance();
    store.update(account)?;

    info!(email, %amount, fee = %config.network_fee, %balance, "withdrawal pending");
    Ok(balance)
}

/// The most that can be withdrawn after the fee, if it clears the minimum.
pub fn max_withdrawable(account: &Account, config: &CasinoConfig) -> Option<Money> {
    let max = account.balance().checked_sub(config.network_fee)?;
    (max > config.min_withdrawal).then_some(max)
}
