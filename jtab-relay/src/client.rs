//! Outbound fetch client
//!
//! The CLI talks to remote documents directly instead of bouncing through
//! its own relay; this client applies the same validation and the same
//! error split: [`JtabError::RemoteFetchFailed`] means the URL or transport
//! is the problem, [`JtabError::MalformedDocument`] means the payload is.

use jtab_core::{JtabError, Result};
use serde_json::Value;

use crate::config::RelayConfig;

/// Fetch a remote document and parse it as JSON.
pub async fn fetch_json(url: &str, config: &RelayConfig) -> Result<Value> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(JtabError::RemoteFetchFailed(
            "URL is required".to_string(),
        ));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(JtabError::RemoteFetchFailed(
            "URL must start with http:// or https://".to_string(),
        ));
    }

    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.upstream_timeout)
        .build()
        .map_err(|err| JtabError::RemoteFetchFailed(err.to_string()))?;

    let response = client
        .get(trimmed)
        .send()
        .await
        .map_err(|err| JtabError::RemoteFetchFailed(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(JtabError::RemoteFetchFailed(format!(
            "HTTP error! status: {}",
            status.as_u16()
        )));
    }

    let text = response
        .text()
        .await
        .map_err(|err| JtabError::RemoteFetchFailed(err.to_string()))?;

    serde_json::from_str(&text).map_err(|err| JtabError::MalformedDocument(err.to_string()))
}
