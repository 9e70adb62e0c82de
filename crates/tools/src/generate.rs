use heatworld_common::CellFlags;
use heatworld_kernel::{World, WorldError};

/// Parameters for a generated world.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSpec {
    pub width: u32,
    pub height: u32,
    pub alpha: f32,
    /// Seed for feature placement. Same `WorldSpec`, same world.
    pub seed: u64,
    /// Interior fixed cells held at 1.0.
    pub sources: usize,
    /// Interior insulator cells.
    pub insulators: usize,
}

impl Default for WorldSpec {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            alpha: 0.1,
            seed: 1,
            sources: 8,
            insulators: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    #[error("world must be at least 3x3, got {width}x{height}")]
    TooSmall { width: u32, height: u32 },
    #[error("{requested} features requested but only {available} interior cells")]
    TooManyFeatures { requested: usize, available: usize },
    #[error("generated world is invalid: {0}")]
    World(#[from] WorldError),
}

/// Build a world from `spec`.
///
/// The outer ring is fixed at 0. Sources and insulators are scattered over
/// distinct interior cells; everything else starts free at 0.
pub fn generate(spec: &WorldSpec) -> Result<World, GenerateError> {
    let (w, h) = (spec.width, spec.height);
    if w < 3 || h < 3 {
        return Err(GenerateError::TooSmall {
            width: w,
            height: h,
        });
    }

    let mut interior: Vec<usize> = Vec::with_capacity((w as usize - 2) * (h as usize - 2));
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            interior.push(y as usize * w as usize + x as usize);
        }
    }

    let requested = spec.sources + spec.insulators;
    if requested > interior.len() {
        return Err(GenerateError::TooManyFeatures {
            requested,
            available: interior.len(),
        });
    }

    // Partial Fisher-Yates: the first `requested` slots end up a uniform
    // sample of distinct interior cells.
    let mut rng = SplitMix64(spec.seed);
    for i in 0..requested {
        let j = i + rng.below((interior.len() - i) as u64) as usize;
        interior.swap(i, j);
    }

    let cells = w as usize * h as usize;
    let mut state = vec![0.0f32; cells];
    let mut props = vec![CellFlags::FIXED; cells];
    for &i in &interior[requested..] {
        props[i] = CellFlags::NONE;
    }
    for &i in &interior[..spec.sources] {
        state[i] = 1.0;
    }
    for &i in &interior[spec.sources..requested] {
        props[i] = CellFlags::INSULATOR;
    }

    tracing::debug!(
        w,
        h,
        seed = spec.seed,
        sources = spec.sources,
        insulators = spec.insulators,
        "generated world"
    );

    Ok(World::new(w, h, spec.alpha, 0.0, state, props)?)
}

/// Splitmix64 stream for reproducible placement across platforms.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Value in `0..n`. `n` must be non-zero.
    fn below(&mut self, n: u64) -> u64 {
        ((self.next_u64() as u128 * n as u128) >> 64) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(world: &World, pred: impl Fn(f32, CellFlags) -> bool) -> usize {
        world
            .state()
            .iter()
            .zip(world.properties())
            .filter(|(v, p)| pred(**v, **p))
            .count()
    }

    #[test]
    fn default_spec_generates() {
        let world = generate(&WorldSpec::default()).unwrap();
        assert_eq!(world.width(), 64);
        assert_eq!(world.height(), 64);
        assert_eq!(world.time(), 0.0);
    }

    #[test]
    fn feature_counts_match_request() {
        let spec = WorldSpec {
            width: 20,
            height: 12,
            sources: 5,
            insulators: 17,
            ..WorldSpec::default()
        };
        let world = generate(&spec).unwrap();
        let ring = 2 * 20 + 2 * 10;
        assert_eq!(count(&world, |v, p| p.is_fixed() && v == 1.0), 5);
        assert_eq!(count(&world, |_, p| p.is_fixed() && !p.is_insulator()), ring + 5);
        assert_eq!(count(&world, |_, p| p.is_insulator()), 17);
        assert_eq!(count(&world, |_, p| !p.is_frozen()), 18 * 10 - 22);
    }

    #[test]
    fn same_seed_same_world() {
        let spec = WorldSpec {
            seed: 1234,
            ..WorldSpec::default()
        };
        assert_eq!(generate(&spec).unwrap(), generate(&spec).unwrap());
    }

    #[test]
    fn different_seeds_diverge() {
        let a = generate(&WorldSpec {
            seed: 1,
            ..WorldSpec::default()
        })
        .unwrap();
        let b = generate(&WorldSpec {
            seed: 2,
            ..WorldSpec::default()
        })
        .unwrap();
        assert_ne!(a.properties(), b.properties());
    }

    #[test]
    fn interior_can_be_filled_completely() {
        let spec = WorldSpec {
            width: 4,
            height: 4,
            sources: 2,
            insulators: 2,
            ..WorldSpec::default()
        };
        let world = generate(&spec).unwrap();
        assert_eq!(count(&world, |_, p| !p.is_frozen()), 0);
    }

    #[test]
    fn too_small_is_rejected() {
        let spec = WorldSpec {
            width: 2,
            ..WorldSpec::default()
        };
        assert_eq!(
            generate(&spec).unwrap_err(),
            GenerateError::TooSmall {
                width: 2,
                height: 64
            }
        );
    }

    #[test]
    fn too_many_features_is_rejected() {
        let spec = WorldSpec {
            width: 5,
            height: 5,
            sources: 5,
            insulators: 5,
            ..WorldSpec::default()
        };
        assert_eq!(
            generate(&spec).unwrap_err(),
            GenerateError::TooManyFeatures {
                requested: 10,
                available: 9
            }
        );
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = SplitMix64(99);
        for n in 1..50u64 {
            assert!(rng.below(n) < n);
        }
    }
}
