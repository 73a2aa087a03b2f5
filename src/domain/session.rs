use chrono::{DateTime, Utc};

use crate::{
    common::error::CasinoError,
    domain::{
        account::{Account, normalize_email},
        store::AccountStore,
    },
};

/// Which account is active. Holds only the store key, never the record.
#[derive(Debug, Default, Clone)]
pub struct Session {
    current_email: Option<String>,
    login_time: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credentials are checked by the caller before this.
    pub fn login(&mut self, email: &str) {
        self.current_email = Some(normalize_email(email));
        self.login_time = Some(Utc::now());
    }

    pub fn logout(&mut self) {
        self.current_email = None;
        self.login_time = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_email.is_some()
    }

    pub fn email(&self) -> Option<&str> {
        self.current_email.as_deref()
    }

    pub fn login_time(&self) -> Option<DateTime<Utc>> {
        self.login_time
    }

    /// Resolves the active email through the store; `None` when logged out or
    /// the account is gone.
    pub fn current(&self, store: &dyn AccountStore) -> Result<Option<Account>, CasinoError> {
        match self.current_email {
            Some(ref email) => store.lookup(email),
            None => Ok(None),
        }
    }

    pub fn require_email(&self) -> Result<&str, CasinoError> {
        self.email().ok_or(CasinoError::NoActiveSession)
    }
}
