//! Server configuration from environment variables
//!
//! | Variable        | Default                           |
//! |-----------------|-----------------------------------|
//! | `PORT`          | `3001`                            |
//! | `HOST`          | `127.0.0.1`                       |
//! | `DATABASE_PATH` | `~/.pagecraft/database/pages.db`  |
//! | `CORS_ORIGIN`   | `http://localhost:3000`           |
//! | `PAGECRAFT_ENV` | `development`                     |
//!
//! `PAGECRAFT_ENV` picks the default log filter when `RUST_LOG` is unset.
//!
//! A variable that is set but malformed is an error, never silently replaced
//! by its default.

use axum::http::HeaderValue;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),

    #[error("CORS_ORIGIN is not a valid origin: '{0}'")]
    InvalidOrigin(String),

    #[error("PAGECRAFT_ENV must be 'development' or 'production', got '{0}'")]
    UnknownEnvironment(String),

    #[error("Failed to get home directory; set DATABASE_PATH explicitly")]
    NoHomeDirectory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Log filter used when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => "info,pagecraft_core=debug,pagecraft_server=debug",
            Environment::Production => "info",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub cors_origin: HeaderValue,
    pub environment: Environment,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let database_path = match lookup("DATABASE_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let origin = lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = origin
            .parse::<HeaderValue>()
            .map_err(|_| ConfigError::InvalidOrigin(origin.clone()))?;

        let environment = match lookup("PAGECRAFT_ENV") {
            Some(env) => env.parse()?,
            None => Environment::default(),
        };

        Ok(Self {
            host,
            port,
            database_path,
            cors_origin,
            environment,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `~/.pagecraft/database/pages.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let home_dir = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(home_dir.join(".pagecraft").join("database").join("pages.db"))
}
