//! Dense point/element containers and input validation.
//!
//! - `Points`: N×D reals, one point per row. Row index = original index.
//! - `Elements`: M×K point indices, one element per row, K fixed per call.

use nalgebra::DMatrix;

use crate::error::WeldError;

/// Point Set (N rows × D columns).
pub type Points = DMatrix<f64>;
/// Element List (M rows × K columns) of indices into a `Points` matrix.
pub type Elements = DMatrix<usize>;

/// Build a `Points` matrix from row vectors. All rows must share one length;
/// returns `None` on ragged input.
pub fn points_from_rows(rows: &[Vec<f64>]) -> Option<Points> {
    let dim = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != dim) {
        return None;
    }
    Some(DMatrix::from_fn(rows.len(), dim, |r, c| rows[r][c]))
}

/// Build an `Elements` matrix from index tuples. `None` on ragged input.
pub fn elements_from_rows(rows: &[Vec<usize>]) -> Option<Elements> {
    let arity = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != arity) {
        return None;
    }
    Some(DMatrix::from_fn(rows.len(), arity, |r, c| rows[r][c]))
}

/// Every coordinate must be finite (grid keys are undefined otherwise).
pub(crate) fn check_finite(points: &Points) -> Result<(), WeldError> {
    for point in 0..points.nrows() {
        for axis in 0..points.ncols() {
            if !points[(point, axis)].is_finite() {
                return Err(WeldError::NonFiniteCoordinate { point, axis });
            }
        }
    }
    Ok(())
}

/// Every element index must lie in `[0, num_points)`. Reports the first offender
/// in row-major order.
pub(crate) fn check_element_indices(
    elements: &Elements,
    num_points: usize,
) -> Result<(), WeldError> {
    for element in 0..elements.nrows() {
        for corner in 0..elements.ncols() {
            let index = elements[(element, corner)];
            if index >= num_points {
                return Err(WeldError::IndexOutOfRange {
                    element,
                    corner,
                    index,
                    num_points,
                });
            }
        }
    }
    Ok(())
}

/// `|p_i − p_j| ≤ tolerance` for rows `i` and `j`.
///
/// Components are scaled by the largest `|Δ|` before squaring, so the test holds
/// for every finite magnitude (no overflow to `inf`, no underflow to `0`).
/// A NaN component never matches.
#[inline]
pub(crate) fn within_tolerance(points: &Points, i: usize, j: usize, tolerance: f64) -> bool {
    let dim = points.ncols();
    let mut scale = 0.0f64;
    for k in 0..dim {
        let d = points[(i, k)] - points[(j, k)];
        if d.is_nan() {
            return false;
        }
        scale = scale.max(d.abs());
    }
    if scale == 0.0 {
        return true;
    }
    // |Δ|∞ ≤ |Δ|₂, so a single component beyond τ decides.
    if scale > tolerance {
        return false;
    }
    if scale.is_infinite() {
        return true;
    }
    let mut acc = 0.0;
    for k in 0..dim {
        let d = (points[(i, k)] - points[(j, k)]) / scale;
        acc += d * d;
    }
    scale * acc.sqrt() <= tolerance
}

/// Summary of a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeldStats {
    pub points_in: usize,
    pub points_out: usize,
    /// Number of distinct `(i, j)`, `i < j`, pairs within tolerance.
    pub proximity_pairs: usize,
}

impl WeldStats {
    /// Points dropped by the collapse.
    #[inline]
    pub fn removed(&self) -> usize {
        self.points_in - self.points_out
    }
}
