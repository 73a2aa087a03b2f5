//! Runtime configuration for the casino service.
//!
//! Defaults mirror the wallet and lobby rules of the app. A TOML file can
//! override any field, and a handful of `CASINO_*` environment variables are
//! applied on top before validation.

use std::{env, fmt, path::Path, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::common::money::Money;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "CASINO_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Account records kept as structs in a map.
    #[default]
    Memory,
    /// Account records serialized to JSON in a string key-value map.
    Kv,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "kv" => Ok(StoreBackend::Kv),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => f.write_str("memory"),
            StoreBackend::Kv => f.write_str("kv"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CasinoConfig {
    /// Credited once to every new account.
    pub bonus_amount: Money,
    pub min_deposit: Money,
    pub min_withdrawal: Money,
    /// Charged on top of every withdrawal.
    pub network_fee: Money,
    pub min_address_len: usize,
    pub min_password_len: usize,
    /// Simulated latency between placing and resolving a wager.
    pub resolve_delay_ms: u64,
    pub store: StoreBackend,
    pub seed_demo_user: bool,
    /// Fixed RNG seed for reproducible outcomes; entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Default for CasinoConfig {
    fn default() -> Self {
        Self {
            bonus_amount: Money::new(222_200),
            min_deposit: Money::new(100_000),
            min_withdrawal: Money::new(100_000),
            network_fee: Money::new(1_000),
            min_address_len: 26,
            min_password_len: 6,
            resolve_delay_ms: 2_000,
            store: StoreBackend::Memory,
            seed_demo_user: false,
            rng_seed: None,
        }
    }
}

impl CasinoConfig {
    pub fn resolve_delay(&self) -> Duration {
        Duration::from_millis(self.resolve_delay_ms)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    LoadFailed { path: String, reason: String },
    #[error("invalid value {value:?} for {field}: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Loads a [`CasinoConfig`] from an optional file plus environment overrides.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    /// Picks up the file path from `CASINO_CONFIG` when it is set.
    pub fn from_env() -> Self {
        Self {
            config_path: env::var(CONFIG_PATH_VAR).ok(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    pub fn load(&self) -> Result<CasinoConfig, ConfigError> {
        let mut config = match self.config_path {
            Some(ref path) => Self::load_from_file(path)?,
            None => CasinoConfig::default(),
        };

        Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
        Self::validate(&config)?;

        Ok(config)
    }

    fn load_from_file(path: &str) -> Result<CasinoConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&content).map_err(|reason| ConfigError::LoadFailed {
            path: path.to_string(),
            reason,
        })
    }

    pub fn parse(content: &str) -> Result<CasinoConfig, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Applies `CASINO_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(config: &mut CasinoConfig, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(store) = lookup("CASINO_STORE") {
            config.store = parse_field("CASINO_STORE", store)?;
        }
        if let Some(delay) = lookup("CASINO_RESOLVE_DELAY_MS") {
            config.resolve_delay_ms = parse_field("CASINO_RESOLVE_DELAY_MS", delay)?;
        }
        if let Some(seed) = lookup("CASINO_RNG_SEED") {
            config.rng_seed = Some(parse_field("CASINO_RNG_SEED", seed)?);
        }
        if let Some(seed_demo) = lookup("CASINO_SEED_DEMO_USER") {
            config.seed_demo_user = parse_field("CASINO_SEED_DEMO_USER", seed_demo)?;
        }
        Ok(())
    }

    pub fn validate(config: &CasinoConfig) -> Result<(), ConfigError> {
        let positive = [
            ("min_deposit", config.min_deposit),
            ("min_withdrawal", config.min_withdrawal),
        ];
        for (field, value) in positive {
            if !value.is_positive() {
                return Err(invalid(field, value.to_string(), "must be positive"));
            }
        }
        if config.network_fee < Money::zero() {
            return Err(invalid(
                "network_fee",
                config.network_fee.to_string(),
                "cannot be negative",
            ));
        }
        if config.bonus_amount < Money::zero() {
            return Err(invalid(
                "bonus_amount",
                config.bonus_amount.to_string(),
                "cannot be negative",
            ));
        }
        if config.min_address_len == 0 {
            return Err(invalid("min_address_len", "0".to_string(), "cannot be zero"));
        }
        Ok(())
    }
}

fn parse_field<T>(field: &str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| invalid(field, value.clone(), &e.to_string()))
}

fn invalid(field: &str, value: String, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value,
        reason: reason.to_string(),
    }
}
