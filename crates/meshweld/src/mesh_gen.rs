//! Fixture meshes and reproducible perturbations.
//!
//! Purpose
//! - Small canonical meshes (unit square in 2D, unit cube surface in 3D) for
//!   tests, examples and the CLI `generate` subcommand.
//! - Polygon-soup explosion and seeded jitter to manufacture duplicates with a
//!   known answer: welding an exploded mesh at a small τ recovers the original.
//!
//! Determinism: every random helper takes a `seed` and uses `StdRng`, so a
//! `(params, seed)` pair replays the same output.

use nalgebra::dmatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Elements, Points};

/// Unit square split into two triangles (4 points, 2 elements, D = 2).
pub fn square_2d() -> (Points, Elements) {
    let points: Points = dmatrix![
        0.0, 0.0;
        1.0, 0.0;
        1.0, 1.0;
        0.0, 1.0
    ];
    let elements: Elements = dmatrix![
        0, 1, 2;
        0, 2, 3
    ];
    (points, elements)
}

/// Unit cube surface (8 points, 12 outward-oriented triangles, D = 3).
pub fn cube_3d() -> (Points, Elements) {
    let points: Points = dmatrix![
        0.0, 0.0, 0.0;
        1.0, 0.0, 0.0;
        1.0, 1.0, 0.0;
        0.0, 1.0, 0.0;
        0.0, 0.0, 1.0;
        1.0, 0.0, 1.0;
        1.0, 1.0, 1.0;
        0.0, 1.0, 1.0
    ];
    let elements: Elements = dmatrix![
        0, 2, 1;
        0, 3, 2;
        4, 5, 6;
        4, 6, 7;
        0, 1, 5;
        0, 5, 4;
        1, 2, 6;
        1, 6, 5;
        2, 3, 7;
        2, 7, 6;
        3, 0, 4;
        3, 4, 7
    ];
    (points, elements)
}

/// Polygon soup: every element corner gets its own copy of the point.
///
/// Output element `e` references points `e*K .. e*K + K` in order.
pub fn explode(points: &Points, elements: &Elements) -> (Points, Elements) {
    let (m, k) = elements.shape();
    let soup_points = Points::from_fn(m * k, points.ncols(), |r, c| {
        points[(elements[(r / k, r % k)], c)]
    });
    let soup_elements = Elements::from_fn(m, k, |r, c| r * k + c);
    (soup_points, soup_elements)
}

/// Add uniform noise in `[-amplitude, amplitude]` to every coordinate.
pub fn jitter(points: &Points, amplitude: f64, seed: u64) -> Points {
    if amplitude <= 0.0 {
        return points.clone();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    points.map(|x| x + rng.gen_range(-amplitude..=amplitude))
}

/// `n` points uniform in `[-extent, extent]^dim`.
pub fn random_cloud(n: usize, dim: usize, extent: f64, seed: u64) -> Points {
    let mut rng = StdRng::seed_from_u64(seed);
    let extent = extent.abs();
    Points::from_fn(n, dim, |_, _| {
        if extent == 0.0 {
            0.0
        } else {
            rng.gen_range(-extent..=extent)
        }
    })
}
