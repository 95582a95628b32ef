//! Curated stage-level surface for benches, bindings and experiments.
//!
//! Callers that only need the end result should use the crate root
//! (`DuplicatedVertexRemoval`, `remove_duplicated_vertices`). This module
//! re-exports the individual stages so they can be driven step by step.

// Stage 1: proximity relation
pub use crate::proximity::{
    build_index, pairs_from_index, proximity_pairs, BruteForce, KdTree, ProximityIndex,
    UniformGrid,
};
// Stage 2: equivalence classes
pub use crate::equivalence::{Partition, UnionFind};
// Stage 3: survivors
pub use crate::representative::{is_representative, select_representatives};
// Stage 4: compaction
pub use crate::compact::{reduce_points, rewrite_elements, IndexMap};
// Fixtures
pub use crate::mesh_gen::{cube_3d, explode, jitter, random_cloud, square_2d};

use crate::cfg::WeldCfg;
use crate::error::WeldError;
use crate::types::Points;

/// Stages 1–3 only: the representative table `rep[i]` for `points` at `cfg`.
///
/// Pre: `cfg.tolerance >= 0`.
/// Post: `rep[rep[i]] == rep[i]`; `rep[i]` is the largest index in `i`'s class.
pub fn representatives(points: &Points, cfg: &WeldCfg) -> Result<Vec<usize>, WeldError> {
    cfg.validate()?;
    let pairs = proximity_pairs(points, cfg)?;
    let partition = Partition::from_pairs(points.nrows(), &pairs);
    Ok(select_representatives(&partition, None))
}
