//! Welding configuration (tolerance + proximity backend).
//!
//! Policy
//! - Defaults are fixed constants; callers override the tolerance per run and
//!   rarely touch the backend. `Auto` is the right choice outside benchmarks.

use crate::error::WeldError;

/// Tolerance used by `WeldCfg::default()`.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
/// Largest dimension for which `Auto` picks the uniform grid (3^D cells per query).
pub const GRID_MAX_DIM: usize = 4;
/// Relative inflation of the grid cell edge. Keeps pairs at distance exactly τ in
/// adjacent cells despite rounding in `x / cell`.
pub(crate) const CELL_SLACK: f64 = 1e-9;

/// Strategy used to answer "which points lie within τ of point i".
///
/// All variants report the same relation; they differ only in cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProximityBackend {
    /// Grid for low dimensions, k-d tree above `GRID_MAX_DIM`.
    #[default]
    Auto,
    /// Uniform hash grid with cell edge ≈ τ.
    Grid,
    /// Implicit median-split k-d tree with inclusive range queries.
    KdTree,
    /// O(N²) reference scan.
    BruteForce,
}

impl ProximityBackend {
    /// Resolve `Auto` for a point set of dimension `dim`.
    pub fn resolve(self, dim: usize) -> ProximityBackend {
        match self {
            ProximityBackend::Auto if dim <= GRID_MAX_DIM => ProximityBackend::Grid,
            ProximityBackend::Auto => ProximityBackend::KdTree,
            other => other,
        }
    }

    /// Name used by the CLI and in logs; `FromStr` accepts it back.
    pub fn name(self) -> &'static str {
        match self {
            ProximityBackend::Auto => "auto",
            ProximityBackend::Grid => "grid",
            ProximityBackend::KdTree => "kdtree",
            ProximityBackend::BruteForce => "brute-force",
        }
    }
}

impl std::str::FromStr for ProximityBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ProximityBackend::Auto),
            "grid" => Ok(ProximityBackend::Grid),
            "kdtree" | "kd-tree" => Ok(ProximityBackend::KdTree),
            "brute-force" | "brute" => Ok(ProximityBackend::BruteForce),
            other => Err(format!(
                "unknown proximity backend `{other}` (expected auto|grid|kdtree|brute-force)"
            )),
        }
    }
}

/// Per-run configuration.
#[derive(Clone, Copy, Debug)]
pub struct WeldCfg {
    /// Maximum Euclidean distance at which two points are the same location.
    pub tolerance: f64,
    /// Spatial index used to find candidate pairs. Results do not depend on it.
    pub backend: ProximityBackend,
}

impl Default for WeldCfg {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            backend: ProximityBackend::Auto,
        }
    }
}

impl WeldCfg {
    #[inline]
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// Reject negative or NaN tolerances. `+∞` is accepted (one class per component
    /// of the complete graph, i.e. everything merges).
    pub fn validate(&self) -> Result<(), WeldError> {
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(WeldError::InvalidTolerance {
                tolerance: self.tolerance,
            });
        }
        Ok(())
    }
}
