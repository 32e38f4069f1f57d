//! Process settings loaded via OrthoConfig from `ISSUES_*` variables and
//! matching command-line flags.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use issue_tracker::outbound::persistence::PoolConfig;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DRAIN_GRACE_SECS: u64 = 5;

/// Startup settings for the issue tracker.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ISSUES")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without one, issues live in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Seconds to keep serving with a failing liveness probe after a
    /// shutdown signal.
    pub drain_grace_secs: Option<u64>,
}

impl AppSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .trim()
            .parse()
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool settings for `database_url`.
    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        PoolConfig::new(database_url)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_connection_timeout(Duration::from_secs(
                self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
            ))
    }

    /// How long to drain before stopping, defaulting to five seconds.
    pub fn drain_grace(&self) -> Duration {
        Duration::from_secs(self.drain_grace_secs.unwrap_or(DEFAULT_DRAIN_GRACE_SECS))
    }
}
