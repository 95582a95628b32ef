//! O(N²) reference scan. Used for cross-checks and tiny inputs.

use super::{checked_tolerance, ProximityIndex};
use crate::error::WeldError;
use crate::types::{within_tolerance, Points};

pub struct BruteForce<'a> {
    points: &'a Points,
    tolerance: f64,
}

impl<'a> BruteForce<'a> {
    pub fn new(points: &'a Points, tolerance: f64) -> Result<Self, WeldError> {
        let tolerance = checked_tolerance(tolerance)?;
        Ok(Self {
            points,
            tolerance,
        })
    }
}

impl ProximityIndex for BruteForce<'_> {
    fn len(&self) -> usize {
        self.points.nrows()
    }

    fn neighbors(&self, i: usize) -> Vec<usize> {
        (0..self.len())
            .filter(|&j| j != i && within_tolerance(self.points, i, j, self.tolerance))
            .collect()
    }
}
