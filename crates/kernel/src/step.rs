//! Double-buffered time stepping.

use crate::rule::{Coefficients, update_cell};
use crate::world::World;

/// Configuration for one stepping run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    /// Time increment per step. Large values are unstable; not validated.
    pub dt: f32,
    /// Number of steps to apply.
    pub iterations: u32,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            dt: 0.1,
            iterations: 1,
        }
    }
}

/// Advance `world` in place by exactly `n` steps of `dt`.
///
/// Each step reads only the previous step's buffer, writes every cell into
/// the scratch buffer, then swaps the two. The clock advances by `dt` per
/// completed step, for `n * dt` in total.
pub fn step_world(world: &mut World, dt: f32, n: u32) {
    let _span = tracing::debug_span!(
        "step_world",
        w = world.width,
        h = world.height,
        dt,
        n
    )
    .entered();

    let coeffs = Coefficients::new(world.alpha, dt);
    let width = world.width as usize;
    let mut buffer = vec![0.0f32; world.state.len()];

    for _ in 0..n {
        for (index, out) in buffer.iter_mut().enumerate() {
            *out = update_cell(index, width, &world.state, &world.properties, coeffs);
        }
        std::mem::swap(&mut world.state, &mut buffer);
        world.t += f64::from(dt);
    }

    tracing::debug!(t = world.t, "stepping complete");
}
