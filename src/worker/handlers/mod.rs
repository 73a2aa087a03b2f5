pub mod account;
pub mod wager;
pub mod wallet;

use crate::{
    common::error::CasinoError,
    domain::{account::Account, store::AccountStore},
};

/// Reads the record for `email` or fails with `NotFound`.
pub(crate) fn load_account(store: &dyn AccountStore, email: &str) -> Result<Account, CasinoError> {
    store.lookup(email)?.ok_or(CasinoError::NotFound)
}
