use crate::common::money::Money;

/// User-facing failures of casino operations. None of them are fatal.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CasinoError {
    #[error("an account with this email already exists")]
    AlreadyExists,
    #[error("no account found for this email")]
    NotFound,
    #[error("invalid password")]
    WrongPassword,
    #[error("please enter a valid email address")]
    InvalidEmail,
    #[error("password must be at least {min_len} characters")]
    WeakPassword { min_len: usize },
    #[error("amount is below the minimum of {minimum}")]
    BelowMinimum { minimum: Money },
    #[error("insufficient balance: {required} required, {available} available")]
    InsufficientBalance { required: Money, available: Money },
    #[error("invalid withdrawal address")]
    InvalidAddress,
    #[error("amount must be positive")]
    InvalidAmount,
    #[error("amount is outside the supported range")]
    AmountOutOfRange,
    #[error("no active session")]
    NoActiveSession,
    #[error("unknown game id {0}")]
    UnknownGame(u32),
    #[error("a wager is already in progress for this account")]
    WagerInProgress,
    #[error("unknown wager handle {0}")]
    UnknownWager(u64),
    #[error("game result does not match its win amount")]
    InconsistentResult,
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(
        "missing session script path. usage: casino_ledger <session.csv> [--transactions[=all|deposits|withdrawals|games]] [--config=<file.toml>] (each play waits resolve_delay_ms, default 2000; set CASINO_RESOLVE_DELAY_MS=0 to skip it)"
    )]
    MissingArg,
    #[error("failed to open input file: {0}")]
    OpenInput(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("process error: {0}")]
    Process(#[from] CasinoError),
}
