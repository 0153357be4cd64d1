//! Relay configuration

use std::time::Duration;

/// Relay server and fetch-client configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Address the relay binds to
    pub bind_address: String,
    /// Port the relay listens on
    pub port: u16,
    /// Timeout applied to each upstream request
    pub upstream_timeout: Duration,
    /// Identifying User-Agent sent with every upstream request
    pub user_agent: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            upstream_timeout: Duration::from_secs(30),
            user_agent: concat!("jtab-relay/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
