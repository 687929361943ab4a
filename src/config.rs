//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::session::MEMORY_PROVIDER;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Registry name of the session engine to use
    pub provider: String,
    /// Idle time in seconds after which a session is collected
    pub session_ttl: u64,
    /// Background garbage collection interval in seconds
    pub gc_interval: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SESSION_PROVIDER` - Session engine name (default: memory)
    /// - `SESSION_TTL` - Session idle TTL in seconds (default: 3600)
    /// - `GC_INTERVAL` - Garbage collection frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: env::var("SESSION_PROVIDER")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.provider),
            session_ttl: parse_var("SESSION_TTL").unwrap_or(defaults.session_ttl),
            gc_interval: parse_var("GC_INTERVAL").unwrap_or(defaults.gc_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl)
    }

    /// GC interval, never shorter than one second.
    pub fn gc_period(&self) -> Duration {
        Duration::from_secs(self.gc_interval.max(1))
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: MEMORY_PROVIDER.to_string(),
            session_ttl: 3600,
            gc_interval: 60,
            server_port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.provider, "memory");
        assert_eq!(config.session_ttl, 3600);
        assert_eq!(config.gc_interval, 60);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SESSION_PROVIDER");
        env::remove_var("SESSION_TTL");
        env::remove_var("GC_INTERVAL");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.provider, "memory");
        assert_eq!(config.session_ttl, 3600);
        assert_eq!(config.gc_interval, 60);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_durations() {
        let config = Config {
            gc_interval: 0,
            session_ttl: 90,
            ..Config::default()
        };
        assert_eq!(config.ttl(), Duration::from_secs(90));
        assert_eq!(config.gc_period(), Duration::from_secs(1));
    }
}
