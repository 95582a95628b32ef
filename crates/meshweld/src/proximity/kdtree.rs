//! Implicit k-d tree (median split over an index permutation).
//!
//! Node of the range `[lo, hi)` is `order[mid]`, `mid = lo + (hi − lo) / 2`, split
//! on axis `depth % D`. Everything left of `mid` has coordinate ≤ the node's,
//! everything right has coordinate ≥ it, so an inclusive range query visits a
//! side only when the query slab `[q − τ, q + τ]` can reach it.
//! Preferred over the grid for high D or strongly non-uniform density.

use super::{checked_tolerance, ProximityIndex};
use crate::error::WeldError;
use crate::types::{within_tolerance, Points};

pub struct KdTree<'a> {
    points: &'a Points,
    tolerance: f64,
    order: Vec<usize>,
}

impl<'a> KdTree<'a> {
    pub fn new(points: &'a Points, tolerance: f64) -> Result<Self, WeldError> {
        let tolerance = checked_tolerance(tolerance)?;
        let mut order: Vec<usize> = (0..points.nrows()).collect();
        if points.ncols() > 0 {
            build(points, &mut order, 0);
        }
        Ok(Self {
            points,
            tolerance,
            order,
        })
    }
}

fn build(points: &Points, idx: &mut [usize], depth: usize) {
    if idx.len() <= 1 {
        return;
    }
    let axis = depth % points.ncols();
    let mid = idx.len() / 2;
    idx.select_nth_unstable_by(mid, |&a, &b| points[(a, axis)].total_cmp(&points[(b, axis)]));
    let (left, rest) = idx.split_at_mut(mid);
    build(points, left, depth + 1);
    build(points, &mut rest[1..], depth + 1);
}

impl ProximityIndex for KdTree<'_> {
    fn len(&self) -> usize {
        self.points.nrows()
    }

    fn neighbors(&self, i: usize) -> Vec<usize> {
        let dim = self.points.ncols();
        if dim == 0 {
            // Zero-dimensional points all coincide.
            return (0..self.len()).filter(|&j| j != i).collect();
        }
        let mut out = Vec::new();
        let mut stack = vec![(0usize, self.order.len(), 0usize)];
        while let Some((lo, hi, depth)) = stack.pop() {
            if lo >= hi {
                continue;
            }
            let mid = lo + (hi - lo) / 2;
            let node = self.order[mid];
            if node != i && within_tolerance(self.points, i, node, self.tolerance) {
                out.push(node);
            }
            let axis = depth % dim;
            let q = self.points[(i, axis)];
            let split = self.points[(node, axis)];
            if q - self.tolerance <= split {
                stack.push((lo, mid, depth + 1));
            }
            if q + self.tolerance >= split {
                stack.push((mid + 1, hi, depth + 1));
            }
        }
        out.sort_unstable();
        out
    }
}
