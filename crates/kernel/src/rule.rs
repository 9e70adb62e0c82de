//! The per-cell diffusion update.

use heatworld_common::CellFlags;

/// Update weights derived once per stepping call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Weight a cell keeps for its own value.
    pub inner: f32,
    /// Weight given to each contributing neighbour.
    pub outer: f32,
}

impl Coefficients {
    /// Explicit Euler weights for the 2-D heat equation on unit spacing:
    /// `outer = alpha * dt`, `inner = 1 - outer / 4`.
    pub fn new(alpha: f32, dt: f32) -> Self {
        let outer = alpha * dt;
        let inner = 1.0 - outer / 4.0;
        Self { inner, outer }
    }
}

/// Next value of the cell at `index`.
///
/// Fixed and insulator cells keep their value. Any other cell takes the
/// weighted mean of itself and its non-insulator neighbours (above, below,
/// left, right, in that order), clamped to `[0, 1]`.
///
/// All four neighbours of a free cell must be in bounds. Validated worlds
/// guarantee this by flagging the outer ring.
pub fn update_cell(
    index: usize,
    width: usize,
    state: &[f32],
    properties: &[CellFlags],
    coeffs: Coefficients,
) -> f32 {
    let current = state[index];
    if properties[index].is_frozen() {
        return current;
    }

    let Coefficients { inner, outer } = coeffs;
    let mut weight = inner;
    let mut sum = inner * current;

    for neighbour in [index - width, index + width, index - 1, index + 1] {
        if !properties[neighbour].is_insulator() {
            weight += outer;
            sum += outer * state[neighbour];
        }
    }

    // Lower bound first: a 0/0 mean (inner = 0, no neighbours) lands on 0.
    (sum / weight).max(0.0).min(1.0)
}
