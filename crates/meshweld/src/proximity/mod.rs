//! Proximity Index: "which other points lie within τ of point i".
//!
//! Purpose
//! - Produce the pairwise within-tolerance relation without enumerating all N²
//!   pairs. The relation is symmetric, excludes self-pairs and uses the
//!   inclusive Euclidean test `|p_i − p_j| ≤ τ` (τ = 0 admits exact coincidence).
//!
//! Why this design
//! - Every backend answers the same per-point query (`ProximityIndex`), so the
//!   union-find stage never cares how the relation was found and tests can
//!   cross-check backends against the O(N²) reference.
//! - Edges are emitted in a fixed lexicographic order; union order does not
//!   influence representatives, but a stable order keeps runs reproducible.
//!
//! Code cross-refs: `equivalence::Partition::from_pairs`, `cfg::ProximityBackend`.

mod brute;
mod grid;
mod kdtree;

pub use brute::BruteForce;
pub use grid::UniformGrid;
pub use kdtree::KdTree;

use crate::cfg::{ProximityBackend, WeldCfg};
use crate::error::WeldError;
use crate::types::Points;

/// Neighbourhood queries over a fixed point set and tolerance.
pub trait ProximityIndex {
    /// Number of indexed points.
    fn len(&self) -> usize;

    /// Indices `j != i` with `|p_i − p_j| ≤ τ`, ascending and without repeats.
    fn neighbors(&self, i: usize) -> Vec<usize>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the index selected by `backend` (with `Auto` resolved for the point dimension).
pub fn build_index<'a>(
    points: &'a Points,
    tolerance: f64,
    backend: ProximityBackend,
) -> Result<Box<dyn ProximityIndex + 'a>, WeldError> {
    let index: Box<dyn ProximityIndex + 'a> = match backend.resolve(points.ncols()) {
        ProximityBackend::Grid | ProximityBackend::Auto => {
            Box::new(UniformGrid::new(points, tolerance)?)
        }
        ProximityBackend::KdTree => Box::new(KdTree::new(points, tolerance)?),
        ProximityBackend::BruteForce => Box::new(BruteForce::new(points, tolerance)?),
    };
    Ok(index)
}

/// All within-tolerance pairs `(i, j)` with `i < j`, sorted lexicographically.
///
/// N = 0 yields an empty relation.
pub fn proximity_pairs(points: &Points, cfg: &WeldCfg) -> Result<Vec<(usize, usize)>, WeldError> {
    let index = build_index(points, cfg.tolerance, cfg.backend)?;
    Ok(pairs_from_index(index.as_ref()))
}

/// Collect the upper-triangular edge list of an index.
pub fn pairs_from_index(index: &dyn ProximityIndex) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..index.len() {
        pairs.extend(index.neighbors(i).into_iter().filter(|&j| j > i).map(|j| (i, j)));
    }
    pairs
}

/// Tolerance check shared by the index constructors.
fn checked_tolerance(tolerance: f64) -> Result<f64, WeldError> {
    WeldCfg::with_tolerance(tolerance).validate()?;
    Ok(tolerance)
}
