//! Compactor / Remapper: dense new indices, reduced points, rewritten elements.
//!
//! Scan `0..N` ascending and hand out the next new index to every survivor, so
//! survivors keep their original relative order. Non-survivors map through
//! their representative. Coordinates are copied from the survivor unmodified.

use crate::types::{Elements, Points};

/// Total function old index → new index over `[0, N)`, onto `[0, N')`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexMap {
    map: Vec<usize>,
    survivors: Vec<usize>,
}

impl IndexMap {
    /// Build from a representative table (`rep[i]` = survivor of `i`'s class,
    /// with `rep[rep[i]] == rep[i]`).
    pub fn from_representatives(rep: &[usize]) -> Self {
        let mut new_of_survivor = vec![usize::MAX; rep.len()];
        let mut survivors = Vec::new();
        for (i, &r) in rep.iter().enumerate() {
            if r == i {
                new_of_survivor[i] = survivors.len();
                survivors.push(i);
            }
        }
        let map = rep.iter().map(|&r| new_of_survivor[r]).collect();
        Self { map, survivors }
    }

    /// New index of original point `old`.
    #[inline]
    pub fn get(&self, old: usize) -> usize {
        self.map[old]
    }

    /// The map as a slice indexed by original index.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.map
    }

    /// Original index of each survivor, ascending; position = new index.
    #[inline]
    pub fn survivors(&self) -> &[usize] {
        &self.survivors
    }

    /// N (domain size).
    #[inline]
    pub fn len_old(&self) -> usize {
        self.map.len()
    }

    /// N' (number of classes).
    #[inline]
    pub fn len_new(&self) -> usize {
        self.survivors.len()
    }
}

/// Reduced Point Set: row `k` = coordinates of `survivors()[k]`.
pub fn reduce_points(points: &Points, map: &IndexMap) -> Points {
    let survivors = map.survivors();
    Points::from_fn(survivors.len(), points.ncols(), |r, c| points[(survivors[r], c)])
}

/// Rewritten Element List: same shape and order, every index passed through `map`.
pub fn rewrite_elements(elements: &Elements, map: &IndexMap) -> Elements {
    elements.map(|i| map.get(i))
}
