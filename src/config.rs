//! Configuration loader and application settings.

use crate::errors::{AppError, Result};
use std::time::Duration;

pub const DEFAULT_ONEINCH_BASE_URL: &str = "https://api.1inch.dev";
pub const DEFAULT_QUOTE_INTERVAL_MS: u64 = 1500;
pub const DEFAULT_QUOTE_MAX_RETRIES: u32 = 3;

/// Process-wide settings, read once at startup and handed to the clients.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bearer token for the 1inch API.
    pub oneinch_api_key: String,
    /// 1inch API root, overridable for proxies.
    pub oneinch_base_url: String,
    /// RPC endpoint for the Ethereum-compatible node.
    pub rpc_url: String,
    /// Minimum spacing between two quote requests.
    pub quote_interval: Duration,
    /// Retries on HTTP 429 before a quote is reported unavailable.
    pub quote_max_retries: u32,
    /// Optional cap on the whole estimation.
    pub timeout: Option<Duration>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("set {key} in the environment")))
        };
        let parsed = |key: &str, default: u64| -> Result<u64> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| AppError::Config(format!("{key} must be an integer, got '{raw}'"))),
                None => Ok(default),
            }
        };

        let oneinch_api_key = required("ONEINCH_API_KEY")?;
        let rpc_url = required("RPC_URL")?;
        let oneinch_base_url = lookup("ONEINCH_BASE_URL")
            .unwrap_or_else(|| DEFAULT_ONEINCH_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();
        let quote_interval =
            Duration::from_millis(parsed("QUOTE_INTERVAL_MS", DEFAULT_QUOTE_INTERVAL_MS)?);
        let quote_max_retries = u32::try_from(parsed(
            "QUOTE_MAX_RETRIES",
            u64::from(DEFAULT_QUOTE_MAX_RETRIES),
        )?)
        .map_err(|_| AppError::Config("QUOTE_MAX_RETRIES is too large".into()))?;
        let timeout = match lookup("ESTIMATE_TIMEOUT_SECS") {
            Some(_) => Some(Duration::from_secs(parsed("ESTIMATE_TIMEOUT_SECS", 0)?)),
            None => None,
        };

        Ok(Self {
            oneinch_api_key,
            oneinch_base_url,
            rpc_url,
            quote_interval,
            quote_max_retries,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_vars_missing() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("ONEINCH_API_KEY", "key"),
            ("RPC_URL", "http://localhost:8545"),
        ]))
        .unwrap();
        assert_eq!(cfg.oneinch_base_url, DEFAULT_ONEINCH_BASE_URL);
        assert_eq!(cfg.quote_interval, Duration::from_millis(1500));
        assert_eq!(cfg.quote_max_retries, 3);
        assert!(cfg.timeout.is_none());
    }

    #[test]
    fn missing_api_key_is_config_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("RPC_URL", "http://localhost:8545")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("ONEINCH_API_KEY")));
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("ONEINCH_API_KEY", "key"),
            ("RPC_URL", "http://localhost:8545"),
            ("ONEINCH_BASE_URL", "http://proxy.local/"),
            ("QUOTE_INTERVAL_MS", "250"),
            ("QUOTE_MAX_RETRIES", "0"),
            ("ESTIMATE_TIMEOUT_SECS", "120"),
        ]))
        .unwrap();
        assert_eq!(cfg.oneinch_base_url, "http://proxy.local");
        assert_eq!(cfg.quote_interval, Duration::from_millis(250));
        assert_eq!(cfg.quote_max_retries, 0);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn non_numeric_interval_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("ONEINCH_API_KEY", "key"),
            ("RPC_URL", "http://localhost:8545"),
            ("QUOTE_INTERVAL_MS", "fast"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
