//! Orchestrator: one weld pass over a point set and its elements.
//!
//! Purpose
//! - Wire Proximity Index → Equivalence Resolver → Representative Selector →
//!   Compactor into a single blocking `run`, and expose only the reduced points,
//!   rewritten elements and the index map.
//!
//! Lifecycle
//! - `Unrun` until the first successful `run`; accessors return `NotRunYet`.
//! - `Completed` holds the owned results of the most recent successful run. A
//!   failed run returns before touching the cached state.
//!
//! Code cross-refs: `proximity::proximity_pairs`, `equivalence::Partition`,
//! `representative::select_representatives`, `compact::IndexMap`.

use crate::cfg::WeldCfg;
use crate::compact::{reduce_points, rewrite_elements, IndexMap};
use crate::equivalence::Partition;
use crate::error::WeldError;
use crate::proximity::proximity_pairs;
use crate::representative::select_representatives;
use crate::types::{check_element_indices, check_finite, Elements, Points, WeldStats};

/// Owned result of a weld pass. No buffer is shared with the inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct WeldOutput {
    /// Reduced Point Set (N' × D), ascending by survivor original index.
    pub points: Points,
    /// Rewritten Element List (M × K), every entry in `[0, N')`.
    pub elements: Elements,
    pub index_map: IndexMap,
}

#[derive(Clone, Debug)]
enum RunState {
    Unrun,
    Completed(WeldOutput),
}

/// Collapse geometrically coincident points and rewrite element indices.
///
/// ```
/// use meshweld::prelude::*;
/// use nalgebra::dmatrix;
///
/// let points: Points = dmatrix![0.0, 0.0; 0.0, 0.0; 1.0, 0.0; 0.0, 1.0];
/// let elements: Elements = dmatrix![0, 2, 3; 1, 2, 3];
/// let mut remover = DuplicatedVertexRemoval::new(points, elements).unwrap();
/// remover.run(1e-3).unwrap();
/// assert_eq!(remover.points().unwrap().nrows(), 3);
/// assert_eq!(remover.elements().unwrap(), &dmatrix![0, 1, 2; 0, 1, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct DuplicatedVertexRemoval {
    points: Points,
    elements: Elements,
    importance: Option<Vec<i64>>,
    state: RunState,
}

impl DuplicatedVertexRemoval {
    /// Take ownership of the inputs after validating them.
    ///
    /// Errors: `IndexOutOfRange` if an element addresses a missing point,
    /// `NonFiniteCoordinate` for NaN/∞ coordinates. Empty meshes are legal.
    pub fn new(points: Points, elements: Elements) -> Result<Self, WeldError> {
        check_element_indices(&elements, points.nrows())?;
        check_finite(&points)?;
        Ok(Self {
            points,
            elements,
            importance: None,
            state: RunState::Unrun,
        })
    }

    /// Per-point importance; the most important member of a class survives
    /// (ties: largest original index). Affects subsequent runs only.
    pub fn set_importance_levels(&mut self, levels: Vec<i64>) -> Result<(), WeldError> {
        if levels.len() != self.points.nrows() {
            return Err(WeldError::ImportanceLength {
                expected: self.points.nrows(),
                got: levels.len(),
            });
        }
        self.importance = Some(levels);
        Ok(())
    }

    /// Drop importance levels (back to largest-index survivors).
    pub fn clear_importance_levels(&mut self) {
        self.importance = None;
    }

    /// Weld with the default backend.
    pub fn run(&mut self, tolerance: f64) -> Result<WeldStats, WeldError> {
        self.run_with(&WeldCfg::with_tolerance(tolerance))
    }

    pub fn run_with(&mut self, cfg: &WeldCfg) -> Result<WeldStats, WeldError> {
        cfg.validate()?;
        let n = self.points.nrows();
        let pairs = proximity_pairs(&self.points, cfg)?;
        let partition = Partition::from_pairs(n, &pairs);
        let rep = select_representatives(&partition, self.importance.as_deref());
        let index_map = IndexMap::from_representatives(&rep);
        let output = WeldOutput {
            points: reduce_points(&self.points, &index_map),
            elements: rewrite_elements(&self.elements, &index_map),
            index_map,
        };
        let stats = WeldStats {
            points_in: n,
            points_out: output.points.nrows(),
            proximity_pairs: pairs.len(),
        };
        tracing::debug!(
            points_in = stats.points_in,
            points_out = stats.points_out,
            dim = self.points.ncols(),
            elements = self.elements.nrows(),
            tolerance = cfg.tolerance,
            backend = cfg.backend.resolve(self.points.ncols()).name(),
            pairs = stats.proximity_pairs,
            "weld"
        );
        self.state = RunState::Completed(output);
        Ok(stats)
    }

    fn completed(&self) -> Result<&WeldOutput, WeldError> {
        match &self.state {
            RunState::Completed(out) => Ok(out),
            RunState::Unrun => Err(WeldError::NotRunYet),
        }
    }

    /// Reduced Point Set of the most recent run.
    pub fn points(&self) -> Result<&Points, WeldError> {
        Ok(&self.completed()?.points)
    }

    /// Rewritten Element List of the most recent run.
    pub fn elements(&self) -> Result<&Elements, WeldError> {
        Ok(&self.completed()?.elements)
    }

    /// Old → new index map of the most recent run.
    pub fn index_map(&self) -> Result<&IndexMap, WeldError> {
        Ok(&self.completed()?.index_map)
    }

    pub fn input_points(&self) -> &Points {
        &self.points
    }

    pub fn input_elements(&self) -> &Elements {
        &self.elements
    }

    pub fn into_output(self) -> Result<WeldOutput, WeldError> {
        match self.state {
            RunState::Completed(out) => Ok(out),
            RunState::Unrun => Err(WeldError::NotRunYet),
        }
    }
}

/// One-shot convenience: construct, run at `tolerance`, return the owned output.
pub fn remove_duplicated_vertices(
    points: Points,
    elements: Elements,
    tolerance: f64,
) -> Result<WeldOutput, WeldError> {
    let mut remover = DuplicatedVertexRemoval::new(points, elements)?;
    remover.run(tolerance)?;
    remover.into_output()
}

#[cfg(test)]
mod tests;
