//! jtab Session - Document ownership and orchestration
//!
//! This crate holds the single source of truth for a loaded JSON document
//! and the view state derived from it:
//!
//! - Wholesale document loading from text or an already-parsed value
//! - Explicit path / search / sort state (no ambient state anywhere)
//! - Projection, column, and TSV-export accessors composing the core
//!   resolver with the engine
//! - Cell-edit reconciliation with commit-if-changed semantics

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod edit;
pub mod session;

// Re-export commonly used types
pub use edit::PendingEdit;
pub use session::DocumentSession;
