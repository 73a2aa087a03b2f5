use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    common::money::Money,
    domain::{history::GameHistoryEntry, password::PasswordHash, transaction::TransactionRecord},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Normalized store key.
    pub email: String,
    pub password: PasswordHash,
    pub display_name: String,
    pub has_received_bonus: bool,
    /// Only changed by `ledger::apply_balance_delta`.
    pub(crate) balance: Money,
    /// Newest first.
    pub transactions: Vec<TransactionRecord>,
    /// Newest first.
    pub game_history: Vec<GameHistoryEntry>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// A fresh account with a zero balance and empty ledger.
    pub fn new(email: &str, password: &str, display_name: &str) -> Self {
        Self {
            email: normalize_email(email),
            password: PasswordHash::new(password),
            display_name: display_name.trim().to_string(),
            has_received_bonus: false,
            balance: Money::zero(),
            transactions: Vec::new(),
            game_history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Balance agrees with the sum of every recorded transaction.
    pub fn is_balanced(&self) -> bool {
        self.transactions.iter().map(|t| t.amount).sum::<Money>() == self.balance
    }

    pub fn latest_transaction(&self) -> Option<&TransactionRecord> {
        self.transactions.first()
    }
}

/// Store keys are compared trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// `local@domain.tld` with no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
