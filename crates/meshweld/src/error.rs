//! Error kinds surfaced by construction, configuration and accessors.
//!
//! All failures are deterministic functions of the input shape/values; there is
//! nothing to retry. Callers fix the input and re-invoke.

use std::fmt;

/// Errors surfaced by the welding pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum WeldError {
    /// Tolerance is negative or NaN. Reported before any work is done.
    InvalidTolerance { tolerance: f64 },
    /// `elements[(element, corner)] = index` does not address a point.
    IndexOutOfRange {
        element: usize,
        corner: usize,
        index: usize,
        num_points: usize,
    },
    /// A result accessor was called before a successful `run`.
    NotRunYet,
    /// Coordinate `points[(point, axis)]` is NaN or infinite.
    NonFiniteCoordinate { point: usize, axis: usize },
    /// Importance levels must have one entry per point.
    ImportanceLength { expected: usize, got: usize },
}

impl fmt::Display for WeldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeldError::InvalidTolerance { tolerance } => {
                write!(f, "invalid tolerance {tolerance}: must be a non-negative number")
            }
            WeldError::IndexOutOfRange {
                element,
                corner,
                index,
                num_points,
            } => write!(
                f,
                "element {element} corner {corner} references point {index}, but only {num_points} points exist"
            ),
            WeldError::NotRunYet => write!(f, "results requested before a successful run"),
            WeldError::NonFiniteCoordinate { point, axis } => {
                write!(f, "point {point} has a non-finite coordinate on axis {axis}")
            }
            WeldError::ImportanceLength { expected, got } => write!(
                f,
                "importance levels: expected {expected} entries (one per point), got {got}"
            ),
        }
    }
}

impl std::error::Error for WeldError {}
