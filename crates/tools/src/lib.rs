//! Developer tooling: deterministic world generation, ASCII rendering, and
//! read-only inspection.
//!
//! # Invariants
//! - Tools never mutate a world they are handed.
//! - Generated worlds always satisfy the kernel boundary contract.

mod generate;
mod inspector;
mod render;

pub use generate::{GenerateError, WorldSpec, generate};
pub use inspector::{WorldInspector, WorldSummary};
pub use render::render_ascii;
