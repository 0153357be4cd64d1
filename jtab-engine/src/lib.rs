//! jtab Engine - Projection and export engines
//!
//! This crate derives the visible row set from a resolved JSON array and
//! serializes it. It includes:
//!
//! - Column derivation from the first unfiltered row
//! - Case-insensitive substring filtering over canonical cell text
//! - A total, stable row comparator and sort-direction state transitions
//! - Tab-separated export with delimiter-safe fields

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod compare;
pub mod export;
pub mod project;
pub mod sort;

// Re-export commonly used types
pub use compare::compare_cells;
pub use export::to_tsv;
pub use project::{derive_columns, project, ProjectedRow};
pub use sort::{SortDirection, SortState};
