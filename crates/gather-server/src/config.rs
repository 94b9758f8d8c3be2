use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Secrets that are fine for local runs but must never reach production.
pub const PLACEHOLDER_SECRETS: &[&str] = &["dev-secret-change-me", "change-me-to-a-random-string", "secret"];

const DEFAULT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },

    #[error("invalid listen address {0}")]
    Addr(String),
}

/// Process-wide settings, built once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub db_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "GATHER_PORT", 8080)?;
        let db_timeout_secs = parse_or(&lookup, "GATHER_DB_TIMEOUT_SECS", 3)?;

        Ok(Self {
            host: lookup("GATHER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            db_path: lookup("GATHER_DB_PATH")
                .unwrap_or_else(|| "gather.db".into())
                .into(),
            jwt_secret: lookup("GATHER_JWT_SECRET").unwrap_or_else(|| DEFAULT_SECRET.into()),
            db_timeout: Duration::from_secs(db_timeout_secs),
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::Addr(addr))
    }

    pub fn has_placeholder_secret(&self) -> bool {
        self.jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&self.jwt_secret.as_str())
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_path, PathBuf::from("gather.db"));
        assert_eq!(config.db_timeout, Duration::from_secs(3));
        assert!(config.has_placeholder_secret());
        assert_eq!(config.listen_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("GATHER_HOST", "127.0.0.1"),
            ("GATHER_PORT", "9000"),
            ("GATHER_DB_PATH", "/tmp/g.db"),
            ("GATHER_JWT_SECRET", "s3cr3t-value"),
            ("GATHER_DB_TIMEOUT_SECS", "10"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:9000");
        assert_eq!(config.db_path, PathBuf::from("/tmp/g.db"));
        assert_eq!(config.db_timeout, Duration::from_secs(10));
        assert!(!config.has_placeholder_secret());
    }

    #[test]
    fn test_bad_values() {
        let err = config(&[("GATHER_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "GATHER_PORT", .. }));

        assert!(config(&[("GATHER_DB_TIMEOUT_SECS", "-1")]).is_err());

        let bad_host = config(&[("GATHER_HOST", "not a host")]).unwrap();
        assert!(bad_host.listen_addr().is_err());
    }
}
