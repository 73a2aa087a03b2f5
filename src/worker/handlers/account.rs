use tracing::info;

use crate::{
    common::{config::CasinoConfig, error::CasinoError},
    domain::{
        account::{Account, is_valid_email, normalize_email},
        ledger,
        store::AccountStore,
    },
    worker::handlers::load_account,
};

/// Creates an account and credits the welcome bonus.
pub fn register(
    store: &mut dyn AccountStore,
    config: &CasinoConfig,
    email: &str,
    password: &str,
    name: &str,
) -> Result<Account, CasinoError> {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        return Err(CasinoError::InvalidEmail);
    }
    if password.chars().count() < config.min_password_len {
        return Err(CasinoError::WeakPassword {
            min_len: config.min_password_len,
        });
    }
    if store.lookup(&email)?.is_some() {
        return Err(CasinoError::AlreadyExists);
    }

    let mut account = Account::new(&email, password, name);
    if config.bonus_amount.is_positive() {
        ledger::grant_welcome_bonus(&mut account, config.bonus_amount)?;
    }
    store.insert(account.clone())?;

    info!(email = %account.email, balance = %account.balance(), "account registered");
    Ok(account)
}

/// Checks credentials against the store.
pub fn authenticate(
    store: &dyn AccountStore,
    email: &str,
    password: &str,
) -> Result<Account, CasinoError> {
    let account = load_account(store, email)?;
    if !account.password.verify(password) {
        return Err(CasinoError::WrongPassword);
    }
    Ok(account)
}
