//! Server configuration.
//!
//! Settings are read from `RESCISAO_*` environment variables with
//! defaults suitable for local development.  Only the binary reads the
//! environment; the library takes a [`ServerConfig`] by value.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_MAX_BATCH: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
    /// Largest number of requests accepted by the batch endpoint.
    pub max_batch: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_json: false,
            max_batch: DEFAULT_MAX_BATCH,
        }
    }
}

impl ServerConfig {
    /// Build a configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.  Unset
    /// variables fall back to the defaults; malformed ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let bind_addr = lookup("RESCISAO_BIND_ADDR").unwrap_or(defaults.bind_addr);
        let log_json = match lookup("RESCISAO_LOG_JSON") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("RESCISAO_LOG_JSON: expected a boolean, got {raw:?}"))?,
            None => defaults.log_json,
        };
        let max_batch = match lookup("RESCISAO_MAX_BATCH") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("RESCISAO_MAX_BATCH: expected a count, got {raw:?}"))?,
            None => defaults.max_batch,
        };
        Ok(Self {
            bind_addr,
            log_json,
            max_batch,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("RESCISAO_BIND_ADDR", "0.0.0.0:8080"),
            ("RESCISAO_LOG_JSON", "yes"),
            ("RESCISAO_MAX_BATCH", "10"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(config.log_json);
        assert_eq!(config.max_batch, 10);
    }

    #[test]
    fn test_rejects_malformed_values() {
        assert!(ServerConfig::from_lookup(lookup(&[("RESCISAO_LOG_JSON", "maybe")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("RESCISAO_MAX_BATCH", "-1")])).is_err());
    }
}
