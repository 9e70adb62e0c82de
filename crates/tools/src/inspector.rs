use heatworld_kernel::World;
use serde::Serialize;

/// World inspector for developer tooling.
///
/// Read-only queries against a world for debugging and regression checks.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &World) -> WorldSummary {
        let mut fixed_cells = 0;
        let mut insulator_cells = 0;
        let mut free = FreeStats::default();

        for (&v, &p) in world.state().iter().zip(world.properties()) {
            if p.is_fixed() {
                fixed_cells += 1;
            }
            if p.is_insulator() {
                insulator_cells += 1;
            }
            if !p.is_frozen() {
                free.add(v);
            }
        }

        WorldSummary {
            width: world.width(),
            height: world.height(),
            alpha: world.alpha(),
            time: world.time(),
            fixed_cells,
            insulator_cells,
            free_cells: free.count,
            free_min: free.min(),
            free_max: free.max(),
            free_mean: free.mean(),
            state_hash: format!("{:#018x}", world.state_hash()),
        }
    }
}

#[derive(Default)]
struct FreeStats {
    count: usize,
    min: f32,
    max: f32,
    sum: f64,
}

impl FreeStats {
    fn add(&mut self, v: f32) {
        if self.count == 0 {
            self.min = v;
            self.max = v;
        } else {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
        self.sum += f64::from(v);
        self.count += 1;
    }

    fn min(&self) -> Option<f32> {
        (self.count > 0).then_some(self.min)
    }

    fn max(&self) -> Option<f32> {
        (self.count > 0).then_some(self.max)
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSummary {
    pub width: u32,
    pub height: u32,
    pub alpha: f32,
    pub time: f64,
    /// Cells with the fixed flag (including fixed insulators).
    pub fixed_cells: usize,
    /// Cells with the insulator flag (including fixed insulators).
    pub insulator_cells: usize,
    pub free_cells: usize,
    pub free_min: Option<f32>,
    pub free_max: Option<f32>,
    pub free_mean: Option<f64>,
    pub state_hash: String,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: {}x{} alpha={} t={} fixed={} insulators={} free={}",
            self.width,
            self.height,
            self.alpha,
            self.time,
            self.fixed_cells,
            self.insulator_cells,
            self.free_cells
        )?;
        if let (Some(min), Some(max), Some(mean)) = (self.free_min, self.free_max, self.free_mean)
        {
            write!(f, " min={min:.4} max={max:.4} mean={mean:.4}")?;
        }
        write!(f, " hash={}", self.state_hash)
    }
}
