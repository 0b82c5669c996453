use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const DEFAULT_CAPACITY: usize = 8;
pub const DEFAULT_OUTPUT_FORMAT: &str = "text";
pub const ENV_CAPACITY: &str = "RINGTRAIL_CAPACITY";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Capacity(usize);

impl Capacity {
    pub fn new(value: usize) -> Result<Self, ConfigError> {
        if value == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self(DEFAULT_CAPACITY)
    }
}

impl FromStr for Capacity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidCapacity(s.to_owned()))?;
        Self::new(value)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Values drawn at random after the explicit ones.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RandomFill {
    pub count: usize,
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DemoConfig {
    pub capacity: Capacity,
    pub format: OutputFormat,
    pub values: Vec<i64>,
    pub random: RandomFill,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("capacity must be > 0")]
    ZeroCapacity,
    #[error("invalid capacity: {0:?}")]
    InvalidCapacity(String),
    #[error("unknown output format: {0:?} (expected text or json)")]
    UnknownFormat(String),
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// CLI value first, then `RINGTRAIL_CAPACITY`, then the default.
pub fn resolve_capacity(cli_value: Option<usize>, env: &impl Env) -> Result<Capacity, ConfigError> {
    match cli_value {
        Some(v) => Capacity::new(v),
        None => match env.var(ENV_CAPACITY) {
            Some(v) => v.parse(),
            None => Ok(Capacity::default()),
        },
    }
}
