//! jtab Relay - CORS pass-through for remote JSON documents
//!
//! Browsers cannot fetch arbitrary cross-origin JSON, so jtab ships a
//! stateless same-origin relay: `GET /api/proxy?url=<encoded URL>` fetches
//! the target server-side, gates the body on being valid JSON, and forwards
//! it with permissive CORS headers. The crate also exposes the plain fetch
//! client the CLI uses when no browser is involved.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod server;

// Re-export commonly used types
pub use client::fetch_json;
pub use config::RelayConfig;
pub use server::start_relay_server;
