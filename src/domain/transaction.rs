use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::money::Money;

/// An immutable ledger entry. `amount` is signed: credits are positive,
/// debits negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: u32,
    pub kind: TxKind,
    pub amount: Money,
    pub game: Option<String>,
    pub status: TxStatus,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Deposit,
    Withdraw,
    Bet,
    Win,
    Bonus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Completed,
    Pending,
    Failed,
}

/// Transaction list views offered to the wallet screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxFilter {
    #[default]
    All,
    /// Deposits and bonuses.
    Deposits,
    Withdrawals,
    /// Bets and wins.
    Games,
}

impl TransactionRecord {
    pub fn new(
        id: u32,
        kind: TxKind,
        amount: Money,
        status: TxStatus,
        game: Option<String>,
    ) -> Self {
        Self {
            id,
            kind,
            amount,
            game,
            status,
            timestamp: Utc::now(),
        }
    }
}

impl TxFilter {
    pub fn matches(&self, kind: TxKind) -> bool {
        match self {
            TxFilter::All => true,
            TxFilter::Deposits => matches!(kind, TxKind::Deposit | TxKind::Bonus),
            TxFilter::Withdrawals => kind == TxKind::Withdraw,
            TxFilter::Games => matches!(kind, TxKind::Bet | TxKind::Win),
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TxKind::Deposit => "deposit",
            TxKind::Withdraw => "withdraw",
            TxKind::Bet => "bet",
            TxKind::Win => "win",
            TxKind::Bonus => "bonus",
        };
        f.write_str(s)
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TxStatus::Completed => "completed",
            TxStatus::Pending => "pending",
            TxStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for TxFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TxFilter::All),
            "deposits" => Ok(TxFilter::Deposits),
            "withdrawals" => Ok(TxFilter::Withdrawals),
            "games" => Ok(TxFilter::Games),
            other => Err(format!("unknown transaction filter: {other}")),
        }
    }
}
