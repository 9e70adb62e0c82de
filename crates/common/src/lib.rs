//! Shared types for the heatworld workspace.
//!
//! # Invariants
//! - Flag bit values are part of the on-disk formats and never change.

mod types;

pub use types::{CellFlags, Format};
