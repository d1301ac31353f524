//! Server configuration.

use std::{env, path::PathBuf, time::Duration};

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// SQLite file holding the users table.
    pub database_path: PathBuf,
    /// Notes service host.
    pub notes_host: String,
    /// Notes service port.
    pub notes_port: u16,
    /// Total timeout for each notes service request, in seconds.
    pub notes_timeout_secs: u64,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration using `lookup` to read variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let Some(notes_host) = lookup("NOTES_HOST") else {
            anyhow::bail!("Cannot reach notes service. Please set NOTES_HOST!");
        };

        Ok(Self {
            host: lookup("DIRECTORY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "DIRECTORY_PORT", 8080)?,
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data/userdb.sqlite")),
            notes_host,
            notes_port: parse_or(&lookup, "NOTES_PORT", 8081)?,
            notes_timeout_secs: parse_or(&lookup, "NOTES_TIMEOUT_SECS", 2)?,
            log_level: lookup("DIRECTORY_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the notes service base URL.
    pub fn notes_url(&self) -> String {
        format!("http://{}:{}", self.notes_host, self.notes_port)
    }

    pub fn notes_timeout(&self) -> Duration {
        Duration::from_secs(self.notes_timeout_secs)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {:?} ({})", key, raw, e)),
        None => Ok(default),
    }
}
