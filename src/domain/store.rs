//! Account persistence behind one interface.
//!
//! The store exclusively owns account records. Callers read a copy with
//! [`AccountStore::lookup`], change it, and commit the whole record back with
//! [`AccountStore::update`], so a balance change and the transaction that
//! explains it land together.

use std::collections::HashMap;

use crate::{
    common::{config::StoreBackend, error::CasinoError},
    domain::account::{Account, normalize_email},
};

pub trait AccountStore: std::fmt::Debug {
    /// Adds a new record; fails with `AlreadyExists` if the email is taken.
    fn insert(&mut self, account: Account) -> Result<(), CasinoError>;

    fn lookup(&self, email: &str) -> Result<Option<Account>, CasinoError>;

    /// Overwrites the record stored under `account.email`.
    fn update(&mut self, account: Account) -> Result<(), CasinoError>;

    /// Every stored record, in no particular order.
    fn accounts(&self) -> Result<Vec<Account>, CasinoError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}

/// Builds the backend named by the config.
pub fn open(backend: StoreBackend) -> Box<dyn AccountStore> {
    match backend {
        StoreBackend::Memory => Box::new(MemoryStore::new()),
        StoreBackend::Kv => Box::new(KvStore::new()),
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: HashMap<String, Account>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }
}

impl AccountStore for MemoryStore {
    fn insert(&mut self, account: Account) -> Result<(), CasinoError> {
        let key = normalize_email(&account.email);
        if self.accounts.contains_key(&key) {
            return Err(CasinoError::AlreadyExists);
        }
        self.accounts.insert(key, account);
        Ok(())
    }

    fn lookup(&self, email: &str) -> Result<Option<Account>, CasinoError> {
        Ok(self.accounts.get(&normalize_email(email)).cloned())
    }

    fn update(&mut self, account: Account) -> Result<(), CasinoError> {
        self.accounts.insert(normalize_email(&account.email), account);
        Ok(())
    }

    fn accounts(&self) -> Result<Vec<Account>, CasinoError> {
        Ok(self.accounts.values().cloned().collect())
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }

    fn clear(&mut self) {
        self.accounts.clear();
    }
}

const KV_PREFIX: &str = "casino_users/";

/// Key-value backend: each record is a JSON document under
/// `casino_users/<email>`.
#[derive(Debug, Default)]
pub struct KvStore {
    entries: HashMap<String, String>,
}

impl KvStore {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    fn key(email: &str) -> String {
        format!("{KV_PREFIX}{}", normalize_email(email))
    }

    fn encode(account: &Account) -> Result<String, CasinoError> {
        serde_json::to_string(account).map_err(|e| CasinoError::Storage(e.to_string()))
    }

    fn decode(raw: &str) -> Result<Account, CasinoError> {
        serde_json::from_str(raw).map_err(|e| CasinoError::Storage(e.to_string()))
    }
}

impl AccountStore for KvStore {
    fn insert(&mut self, account: Account) -> Result<(), CasinoError> {
        let key = Self::key(&account.email);
        if self.entries.contains_key(&key) {
            return Err(CasinoError::AlreadyExists);
        }
        let raw = Self::encode(&account)?;
        self.entries.insert(key, raw);
        Ok(())
    }

    fn lookup(&self, email: &str) -> Result<Option<Account>, CasinoError> {
        self.entries
            .get(&Self::key(email))
            .map(|raw| Self::decode(raw))
            .transpose()
    }

    fn update(&mut self, account: Account) -> Result<(), CasinoError> {
        let raw = Self::encode(&account)?;
        self.entries.insert(Self::key(&account.email), raw);
        Ok(())
    }

    fn accounts(&self) -> Result<Vec<Account>, CasinoError> {
        self.entries
            .iter()
            .filter(|(k, _)| k.starts_with(KV_PREFIX))
            .map(|(_, raw)| Self::decode(raw))
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
