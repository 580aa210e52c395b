//! Process configuration, read from the environment (and `.env` if present)

use anyhow::{Context, anyhow};
use std::env;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub max_connections: u32,
}

impl Config {
    /// Loads `.env` and reads the configuration from the process environment.
    ///
    /// Returns `Err` if `DATABASE_URL` is missing or a numeric setting does not parse.
    pub fn from_env() -> anyhow::Result<Config> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        let database_url = lookup(DATABASE_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow!("{DATABASE_URL} must be set"))?;

        let bind_address = lookup(BIND_ADDRESS).unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned());

        let max_connections = match lookup(DATABASE_MAX_CONNECTIONS) {
            Some(value) => value
                .parse()
                .with_context(|| format!("{DATABASE_MAX_CONNECTIONS} is not a number: {value}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Config {
            database_url,
            bind_address,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn missing_database_url_is_fatal() {
        let result = Config::from_lookup(lookup(&[]));
        assert!(result.unwrap_err().to_string().contains(DATABASE_URL));
    }

    #[test]
    fn blank_database_url_is_fatal() {
        assert!(Config::from_lookup(lookup(&[(DATABASE_URL, "  ")])).is_err());
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(&[(DATABASE_URL, "sqlite::memory:")])).unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn overrides_apply() {
        let config = Config::from_lookup(lookup(&[
            (DATABASE_URL, "sqlite://data.db"),
            (BIND_ADDRESS, "127.0.0.1:8000"),
            (DATABASE_MAX_CONNECTIONS, "12"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:8000");
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn bad_max_connections_is_rejected() {
        let result = Config::from_lookup(lookup(&[
            (DATABASE_URL, "sqlite://data.db"),
            (DATABASE_MAX_CONNECTIONS, "lots"),
        ]));
        assert!(result.is_err());
    }
}
