//! Configuration management module.
//!
//! Handles loading configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::services::gas::{GasPolicy, DEFAULT_GAS_CEILING, DEFAULT_GAS_MARGIN};

/// Endpoint used when `ETHEREUM_RPC_URL` is not set.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Default period between connection status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Period between connection status polls.
    pub poll_interval: Duration,
    /// Gas added on top of every estimate.
    pub gas_margin: u64,
    /// Largest gas estimate accepted before a transaction is refused.
    pub gas_ceiling: u64,
    /// Network name the node must be on, if any (e.g. "ropsten").
    pub required_network: Option<String>,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            gas_margin: DEFAULT_GAS_MARGIN,
            gas_ceiling: DEFAULT_GAS_CEILING,
            required_network: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `ETHEREUM_RPC_URL`: Ethereum JSON-RPC endpoint (default: http://localhost:8545)
    /// - `POLL_INTERVAL_MS`: status poll period in milliseconds (default: 1000)
    /// - `GAS_MARGIN`: gas added to each estimate (default: 10000)
    /// - `GAS_CEILING`: largest accepted estimate (default: 8000000)
    /// - `REQUIRED_NETWORK`: network name the node must report
    /// - `LOG_LEVEL`: Logging level (default: info)
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let rpc_url = lookup("ETHEREUM_RPC_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.rpc_url);

        let poll_interval = match lookup("POLL_INTERVAL_MS") {
            Some(raw) => {
                let millis = parse_number("POLL_INTERVAL_MS", &raw)?;
                if millis == 0 {
                    return Err(AppError::Config("POLL_INTERVAL_MS must be positive".into()));
                }
                Duration::from_millis(millis)
            }
            None => defaults.poll_interval,
        };

        let gas_margin = match lookup("GAS_MARGIN") {
            Some(raw) => parse_number("GAS_MARGIN", &raw)?,
            None => defaults.gas_margin,
        };

        let gas_ceiling = match lookup("GAS_CEILING") {
            Some(raw) => parse_number("GAS_CEILING", &raw)?,
            None => defaults.gas_ceiling,
        };

        let required_network = lookup("REQUIRED_NETWORK").filter(|name| !name.trim().is_empty());

        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Self { rpc_url, poll_interval, gas_margin, gas_ceiling, required_network, log_level })
    }

    /// Gas policy built from the configured margin and ceiling.
    pub fn gas_policy(&self) -> GasPolicy {
        GasPolicy::new(self.gas_margin, self.gas_ceiling)
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| AppError::Config(format!("{key} must be a non-negative integer: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.poll_interval, Duration::from_millis(1000));
        assert_eq!(config.gas_margin, 10_000);
        assert_eq!(config.gas_ceiling, 8_000_000);
        assert!(config.required_network.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("ETHEREUM_RPC_URL", "http://node:8545"),
            ("POLL_INTERVAL_MS", "250"),
            ("GAS_MARGIN", "5000"),
            ("GAS_CEILING", " 1000000 "),
            ("REQUIRED_NETWORK", "ropsten"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.rpc_url, "http://node:8545");
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.gas_margin, 5_000);
        assert_eq!(config.gas_ceiling, 1_000_000);
        assert_eq!(config.required_network.as_deref(), Some("ropsten"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.gas_policy(), GasPolicy::new(5_000, 1_000_000));
    }

    #[test]
    fn test_empty_url_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[("ETHEREUM_RPC_URL", "  ")])).unwrap();
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let result = Config::from_lookup(lookup_from(&[("GAS_CEILING", "lots")]));
        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("GAS_CEILING")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let result = Config::from_lookup(lookup_from(&[("POLL_INTERVAL_MS", "0")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
