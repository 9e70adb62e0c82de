//! World Kernel: authoritative heat world state, the cell update rule, and
//! the double-buffered time-stepping driver.
//!
//! # Invariants
//! - Stepping never writes the property array.
//! - Stepping is pure with respect to its inputs: same world, `dt` and `n`
//!   give bit-identical state.
//! - Every cell on the outer ring of a validated world is fixed or an insulator.

pub mod rule;
pub mod step;
pub mod world;

pub use rule::{Coefficients, update_cell};
pub use step::{StepParams, step_world};
pub use world::{World, WorldError};
