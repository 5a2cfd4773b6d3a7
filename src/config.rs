//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub http_addr: String,
    /// Seconds a stored key lives if nobody reads it
    pub key_live_time: u64,
    /// Seconds a single request may take before it is aborted
    pub request_timeout: u64,
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
    /// Seconds to wait for in-flight requests after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `HTTP_ADDR` - Listen address (default: 0.0.0.0:80)
    /// - `KEY_LIVE_TIME` - Key lifetime in seconds (default: 30)
    /// - `REQUEST_TIMEOUT` - Request timeout in seconds (default: 15)
    /// - `MAX_BODY_BYTES` - Request body limit in bytes (default: 1 MiB)
    /// - `SHUTDOWN_TIMEOUT` - Graceful shutdown limit in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            http_addr: env::var("HTTP_ADDR").unwrap_or(defaults.http_addr),
            key_live_time: parse_var("KEY_LIVE_TIME").unwrap_or(defaults.key_live_time),
            request_timeout: parse_var("REQUEST_TIMEOUT").unwrap_or(defaults.request_timeout),
            max_body_bytes: parse_var("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            shutdown_timeout: parse_var("SHUTDOWN_TIMEOUT").unwrap_or(defaults.shutdown_timeout),
        }
    }

    /// Lifetime given to every key stored through the API.
    pub fn key_live_time(&self) -> Duration {
        Duration::from_secs(self.key_live_time)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:80".to_string(),
            key_live_time: 30,
            request_timeout: 15,
            max_body_bytes: 1024 * 1024,
            shutdown_timeout: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.http_addr, "0.0.0.0:80");
        assert_eq!(config.key_live_time(), Duration::from_secs(30));
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_from_env() {
        env::remove_var("HTTP_ADDR");
        env::set_var("KEY_LIVE_TIME", "5");
        env::set_var("REQUEST_TIMEOUT", "not a number");
        env::remove_var("MAX_BODY_BYTES");
        env::set_var("SHUTDOWN_TIMEOUT", "2");

        let config = Config::from_env();
        assert_eq!(config.http_addr, "0.0.0.0:80");
        assert_eq!(config.key_live_time, 5);
        assert_eq!(config.request_timeout, 15);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert_eq!(config.shutdown_timeout, 2);

        env::remove_var("KEY_LIVE_TIME");
        env::remove_var("SHUTDOWN_TIMEOUT");
        env::remove_var("REQUEST_TIMEOUT");
    }
}
