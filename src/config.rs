//! Environment-driven configuration.
//!
//! A `.env` file in the working directory is loaded first when present;
//! variables already set in the environment win.

use log::LevelFilter;
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_NUM_RECORDS: usize = 100_000;
pub const DEFAULT_DB_PATH: &str = "testing.db";

const NUM_RECORDS_VAR: &str = "NUM_RECORDS";
const DB_PATH_VAR: &str = "FILTER_BENCH_DB";
const SEED_VAR: &str = "FILTER_BENCH_SEED";
const LOG_VAR: &str = "FILTER_BENCH_LOG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("invalid seed: {0}")]
    InvalidSeed(String),
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// Where the row store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite file path, or `:memory:`.
    pub path: String,
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self {
            path: ":memory:".to_string(),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DB_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub num_records: usize,
    pub store: StoreConfig,
    /// Generator seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub log_level: LevelFilter,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            num_records: DEFAULT_NUM_RECORDS,
            store: StoreConfig::default(),
            seed: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl BenchConfig {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(NUM_RECORDS_VAR) {
            config.num_records = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber(raw.clone()))?;
        }
        if let Some(path) = get(DB_PATH_VAR) {
            config.store.path = path;
        }
        if let Some(raw) = get(SEED_VAR) {
            config.seed = Some(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidSeed(raw.clone()))?,
            );
        }
        if let Some(raw) = get(LOG_VAR) {
            config.log_level = LevelFilter::from_str(raw.trim())
                .map_err(|_| ConfigError::InvalidLogLevel(raw.clone()))?;
        }

        Ok(config)
    }
}
