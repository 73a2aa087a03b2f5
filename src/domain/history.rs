use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
}

/// One resolved wager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistoryEntry {
    pub id: u32,
    pub game: String,
    pub bet_amount: Money,
    pub win_amount: Money,
    /// `win_amount - bet_amount`
    pub net_amount: Money,
    pub result: GameResult,
    pub timestamp: DateTime<Utc>,
}

/// Aggregates shown on the history screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameStats {
    pub wins: usize,
    pub losses: usize,
    pub total_profit: Money,
    /// Percentage in `[0, 100]`; zero without history.
    pub win_rate: f64,
}

impl GameStats {
    pub fn from_history(history: &[GameHistoryEntry]) -> Self {
        let wins = history
            .iter()
            .filter(|h| h.result == GameResult::Win)
            .count();
        let losses = history.len() - wins;
        let total_profit = history.iter().map(|h| h.net_amount).sum();
        let win_rate = if history.is_empty() {
            0.0
        } else {
            wins as f64 / history.len() as f64 * 100.0
        };

        Self {
            wins,
            losses,
            total_profit,
            win_rate,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win => f.write_str("win"),
            GameResult::Loss => f.write_str("loss"),
        }
    }
}
