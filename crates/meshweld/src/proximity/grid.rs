//! Uniform hash grid with cell edge ≈ τ.
//!
//! Two points within τ differ by at most one cell per axis, so a query scans the
//! 3^D block around the query cell and keeps candidates passing the exact test.
//! τ = 0 degenerates to exact-coordinate buckets (one cell per distinct point).

use std::collections::HashMap;

use super::{checked_tolerance, ProximityIndex};
use crate::cfg::CELL_SLACK;
use crate::error::WeldError;
use crate::types::{within_tolerance, Points};

type CellKey = Vec<i64>;

#[derive(Clone, Copy, Debug)]
enum CellMode {
    /// Keys are coordinate bit patterns (−0.0 folded into +0.0).
    Exact,
    /// Keys are `floor(x / cell)`. Division keeps subnormal τ usable (its
    /// reciprocal overflows).
    Scaled { cell: f64 },
}

pub struct UniformGrid<'a> {
    points: &'a Points,
    tolerance: f64,
    mode: CellMode,
    cells: HashMap<CellKey, Vec<usize>>,
    offsets: Vec<Vec<i64>>,
}

impl<'a> UniformGrid<'a> {
    pub fn new(points: &'a Points, tolerance: f64) -> Result<Self, WeldError> {
        let tolerance = checked_tolerance(tolerance)?;
        let dim = points.ncols();
        let mode = if tolerance == 0.0 {
            CellMode::Exact
        } else {
            // τ = ∞ gives x / ∞ = 0: one cell for everything.
            CellMode::Scaled {
                cell: tolerance * (1.0 + CELL_SLACK),
            }
        };
        let offsets = match mode {
            CellMode::Exact => vec![vec![0; dim]],
            CellMode::Scaled { .. } => neighbourhood_offsets(dim),
        };
        let mut grid = Self {
            points,
            tolerance,
            mode,
            cells: HashMap::new(),
            offsets,
        };
        for i in 0..points.nrows() {
            let key = grid.cell_of(i);
            grid.cells.entry(key).or_default().push(i);
        }
        Ok(grid)
    }

    /// Number of non-empty cells.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    fn cell_of(&self, i: usize) -> CellKey {
        (0..self.points.ncols())
            .map(|k| {
                let x = self.points[(i, k)];
                match self.mode {
                    CellMode::Exact => {
                        let x = if x == 0.0 { 0.0 } else { x };
                        x.to_bits() as i64
                    }
                    // `as` saturates on overflow; the exact test below keeps results correct.
                    CellMode::Scaled { cell } => (x / cell).floor() as i64,
                }
            })
            .collect()
    }
}

impl ProximityIndex for UniformGrid<'_> {
    fn len(&self) -> usize {
        self.points.nrows()
    }

    fn neighbors(&self, i: usize) -> Vec<usize> {
        let base = self.cell_of(i);
        let mut out = Vec::new();
        let mut key = base.clone();
        for off in &self.offsets {
            for ((k, b), o) in key.iter_mut().zip(&base).zip(off) {
                *k = b.saturating_add(*o);
            }
            let Some(bucket) = self.cells.get(&key) else {
                continue;
            };
            out.extend(
                bucket
                    .iter()
                    .copied()
                    .filter(|&j| j != i && within_tolerance(self.points, i, j, self.tolerance)),
            );
        }
        // Saturated keys can alias the same cell twice.
        out.sort_unstable();
        out.dedup();
        out
    }
}

/// All offsets in {−1, 0, 1}^dim (3^dim entries; one empty offset for dim = 0).
fn neighbourhood_offsets(dim: usize) -> Vec<Vec<i64>> {
    let mut offsets = vec![Vec::with_capacity(dim)];
    for _ in 0..dim {
        offsets = offsets
            .into_iter()
            .flat_map(|prefix| {
                [-1i64, 0, 1].into_iter().map(move |d| {
                    let mut next = prefix.clone();
                    next.push(d);
                    next
                })
            })
            .collect();
    }
    offsets
}
