use heatworld_common::CellFlags;

use crate::step::{StepParams, step_world};

/// Errors from constructing a world out of raw parts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },
    #[error("{what} array has {actual} cells, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("boundary cell ({x}, {y}) must be fixed or an insulator")]
    UnflaggedBoundary { x: u32, y: u32 },
}

/// The authoritative heat world.
///
/// State and properties are parallel row-major arrays indexed by
/// `y * width + x`. The stepping driver owns the world exclusively for the
/// duration of a call and mutates state and clock in place.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) alpha: f32,
    /// Simulated clock, advanced by `dt` per completed step.
    pub(crate) t: f64,
    pub(crate) state: Vec<f32>,
    pub(crate) properties: Vec<CellFlags>,
}

impl World {
    /// Build a world and check the load-time contract: positive dimensions,
    /// matching array lengths, and a flagged outer ring.
    pub fn new(
        width: u32,
        height: u32,
        alpha: f32,
        t: f64,
        state: Vec<f32>,
        properties: Vec<CellFlags>,
    ) -> Result<Self, WorldError> {
        let world = Self::from_parts_unchecked(width, height, alpha, t, state, properties);
        world.validate()?;
        Ok(world)
    }

    /// Build a world without validation.
    ///
    /// Stepping a world whose outer ring contains unflagged cells panics on
    /// out-of-range neighbour access.
    pub fn from_parts_unchecked(
        width: u32,
        height: u32,
        alpha: f32,
        t: f64,
        state: Vec<f32>,
        properties: Vec<CellFlags>,
    ) -> Self {
        Self {
            width,
            height,
            alpha,
            t,
            state,
            properties,
        }
    }

    /// Check the load-time contract.
    pub fn validate(&self) -> Result<(), WorldError> {
        let (w, h) = (self.width, self.height);
        if w == 0 || h == 0 {
            return Err(WorldError::EmptyGrid {
                width: w,
                height: h,
            });
        }
        let expected = w as usize * h as usize;
        if self.state.len() != expected {
            return Err(WorldError::LengthMismatch {
                what: "state",
                expected,
                actual: self.state.len(),
            });
        }
        if self.properties.len() != expected {
            return Err(WorldError::LengthMismatch {
                what: "property",
                expected,
                actual: self.properties.len(),
            });
        }
        for y in 0..h {
            for x in 0..w {
                let on_edge = x == 0 || y == 0 || x == w - 1 || y == h - 1;
                if on_edge && !self.flags(x, y).is_frozen() {
                    return Err(WorldError::UnflaggedBoundary { x, y });
                }
            }
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Diffusion coefficient.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Current simulated time.
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Row-major linear index of `(x, y)`.
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn value(&self, x: u32, y: u32) -> f32 {
        self.state[self.index(x, y)]
    }

    pub fn flags(&self, x: u32, y: u32) -> CellFlags {
        self.properties[self.index(x, y)]
    }

    /// Read-only access to the state array.
    pub fn state(&self) -> &[f32] {
        &self.state
    }

    /// Read-only access to the property array.
    pub fn properties(&self) -> &[CellFlags] {
        &self.properties
    }

    /// Advance the world by `params.iterations` steps of `params.dt`.
    pub fn step(&mut self, params: StepParams) {
        step_world(self, params.dt, params.iterations);
    }

    /// Compute a deterministic hash of the world for comparison.
    ///
    /// Floats are hashed by bit pattern, so two worlds hash equal only when
    /// their states are bit-identical.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.width.to_le_bytes());
        mix(&mut h, &self.height.to_le_bytes());
        mix(&mut h, &self.alpha.to_bits().to_le_bytes());
        mix(&mut h, &self.t.to_bits().to_le_bytes());
        for v in &self.state {
            mix(&mut h, &v.to_bits().to_le_bytes());
        }
        for p in &self.properties {
            mix(&mut h, &p.bits().to_le_bytes());
        }
        h
    }
}
