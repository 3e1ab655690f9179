//! Process configuration from `USERHUB_*` environment variables.

use std::net::SocketAddr;

use thiserror::Error;
use userhub_observability::{LogFormat, UnknownLogFormat};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("USERHUB_BIND_ADDR `{value}` is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("USERHUB_LOG_FORMAT: {0}")]
    InvalidLogFormat(#[from] UnknownLogFormat),

    #[error("{var} `{value}` is not a boolean (expected true/false/1/0)")]
    InvalidBool { var: &'static str, value: String },

    #[error("USERHUB_STORE `{0}` is unknown (expected `memory` or `postgres`)")]
    UnknownStore(String),

    #[error("USERHUB_STORE=postgres requires DATABASE_URL")]
    MissingDatabaseUrl,

    #[error("USERHUB_STORE=postgres but the binary was built without the `postgres` feature")]
    PostgresUnavailable,
}

/// Which `UserStore` engine backs the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    /// Load the demo users into an in-memory store at startup.
    pub seed_demo_data: bool,
    pub store: StoreBackend,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset and blank are equivalent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr: SocketAddr = {
            let value = var("USERHUB_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
            value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidBindAddr { value, source })?
        };

        let log_format = match var("USERHUB_LOG_FORMAT") {
            Some(v) => v.parse()?,
            None => LogFormat::default(),
        };

        let seed_demo_data = match var("USERHUB_SEED_DEMO_DATA") {
            Some(v) => parse_bool("USERHUB_SEED_DEMO_DATA", &v)?,
            None => true,
        };

        let store = match var("USERHUB_STORE").map(|v| v.trim().to_ascii_lowercase()) {
            None => StoreBackend::Memory,
            Some(v) if v == "memory" => StoreBackend::Memory,
            Some(v) if v == "postgres" => {
                if !cfg!(feature = "postgres") {
                    return Err(ConfigError::PostgresUnavailable);
                }
                let database_url = var("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?;
                StoreBackend::Postgres { database_url }
            }
            Some(other) => return Err(ConfigError::UnknownStore(other)),
        };

        Ok(Self {
            bind_addr,
            log_format,
            seed_demo_data,
            store,
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
