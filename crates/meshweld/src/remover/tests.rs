//! Orchestrator scenarios, lifecycle errors and property tests.

use super::*;
use crate::cfg::ProximityBackend;
use crate::mesh_gen::{cube_3d, explode, jitter, square_2d};
use crate::types::within_tolerance;
use nalgebra::dmatrix;
use proptest::prelude::*;

/// Move point 0 onto point 1 and build the expected collapse: points 1.. shift
/// down by one and index 0 is redirected to the survivor (new index 0).
fn collapse_first_into_second(points: &mut Points, elements: &Elements) -> (Points, Elements) {
    let row1 = points.row(1).into_owned();
    points.set_row(0, &row1);
    let n = points.nrows();
    let expected_points = Points::from_fn(n - 1, points.ncols(), |r, c| points[(r + 1, c)]);
    let expected_elements = elements.map(|i| i.saturating_sub(1));
    (expected_points, expected_elements)
}

#[test]
fn pairwise_collapse_2d() {
    let (mut points, elements) = square_2d();
    let (exp_points, exp_elements) = collapse_first_into_second(&mut points, &elements);
    let mut remover = DuplicatedVertexRemoval::new(points, elements.clone()).unwrap();
    let stats = remover.run(1e-3).unwrap();
    assert_eq!(stats.points_out, 3);
    assert_eq!(stats.removed(), 1);
    assert_eq!(remover.points().unwrap(), &exp_points);
    assert_eq!(remover.elements().unwrap(), &exp_elements);
    assert_eq!(remover.elements().unwrap().nrows(), elements.nrows());
    let n_out = remover.points().unwrap().nrows();
    assert!(remover.elements().unwrap().iter().all(|&i| i < n_out));
}

#[test]
fn pairwise_collapse_3d() {
    let (mut points, elements) = cube_3d();
    let (exp_points, exp_elements) = collapse_first_into_second(&mut points, &elements);
    let out = remove_duplicated_vertices(points, elements, 1e-3).unwrap();
    assert_eq!(out.points, exp_points);
    assert_eq!(out.elements, exp_elements);
    assert_eq!(out.index_map.as_slice(), &[0, 0, 1, 2, 3, 4, 5, 6]);
    assert!(out.elements.iter().all(|&i| i < out.points.nrows()));
}

#[test]
fn no_collapse_is_identity() {
    let (points, elements) = cube_3d();
    let out = remove_duplicated_vertices(points.clone(), elements.clone(), 1e-3).unwrap();
    assert_eq!(out.points, points);
    assert_eq!(out.elements, elements);
    assert_eq!(out.index_map.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn chain_collapse_merges_transitively() {
    // d(0,1) = d(1,2) = 0.8 ≤ τ = 1, d(0,2) = 1.6 > τ; point 3 is isolated.
    let points: Points = dmatrix![0.0, 0.0; 0.8, 0.0; 1.6, 0.0; 5.0, 5.0];
    let elements: Elements = dmatrix![0, 1, 3; 1, 2, 3];
    let out = remove_duplicated_vertices(points, elements, 1.0).unwrap();
    assert_eq!(out.points, dmatrix![1.6, 0.0; 5.0, 5.0]);
    assert_eq!(out.index_map.survivors(), &[2, 3]);
    assert_eq!(out.elements, dmatrix![0, 0, 1; 0, 0, 1]);
}

#[test]
fn welding_a_soup_recovers_shared_vertices() {
    let (points, elements) = square_2d();
    let (soup_p, soup_e) = explode(&points, &elements);
    let out = remove_duplicated_vertices(soup_p, soup_e, 1e-6).unwrap();
    // Survivors are the last copy of each original point: soup 1, 3, 4, 5.
    assert_eq!(out.index_map.survivors(), &[1, 3, 4, 5]);
    assert_eq!(
        out.points,
        dmatrix![1.0, 0.0; 0.0, 0.0; 1.0, 1.0; 0.0, 1.0]
    );
    assert_eq!(out.elements, dmatrix![1, 0, 2; 1, 2, 3]);
}

#[test]
fn jittered_soup_welds_back_to_the_cube() {
    let (points, elements) = cube_3d();
    let (soup_p, soup_e) = explode(&points, &elements);
    let noisy = jitter(&soup_p, 1e-5, 42);
    for backend in [ProximityBackend::Grid, ProximityBackend::KdTree] {
        let mut remover = DuplicatedVertexRemoval::new(noisy.clone(), soup_e.clone()).unwrap();
        remover
            .run_with(&WeldCfg {
                tolerance: 1e-3,
                backend,
            })
            .unwrap();
        let out_p = remover.points().unwrap();
        let out_e = remover.elements().unwrap();
        assert_eq!(out_p.nrows(), 8);
        // Each corner still sits where the original cube corner was.
        for e in 0..elements.nrows() {
            for c in 0..3 {
                let got = out_p.row(out_e[(e, c)]);
                let want = points.row(elements[(e, c)]);
                assert!((got - want).amax() <= 1e-5);
            }
        }
    }
}

#[test]
fn empty_mesh_is_legal() {
    let mut remover =
        DuplicatedVertexRemoval::new(Points::zeros(0, 3), Elements::zeros(0, 3)).unwrap();
    let stats = remover.run(0.1).unwrap();
    assert_eq!(stats.points_out, 0);
    assert_eq!(remover.points().unwrap().shape(), (0, 3));
    assert_eq!(remover.elements().unwrap().shape(), (0, 3));
}

#[test]
fn out_of_range_index_fails_at_construction() {
    let (points, _) = square_2d();
    let err = DuplicatedVertexRemoval::new(points, dmatrix![0, 1, 4]).unwrap_err();
    assert_eq!(
        err,
        WeldError::IndexOutOfRange {
            element: 0,
            corner: 2,
            index: 4,
            num_points: 4
        }
    );
    // Elements without points are always out of range.
    assert!(DuplicatedVertexRemoval::new(Points::zeros(0, 2), dmatrix![0, 0, 0]).is_err());
}

#[test]
fn non_finite_coordinates_fail_at_construction() {
    let points: Points = dmatrix![0.0, f64::INFINITY];
    let err = DuplicatedVertexRemoval::new(points, Elements::zeros(0, 3)).unwrap_err();
    assert_eq!(err, WeldError::NonFiniteCoordinate { point: 0, axis: 1 });
}

#[test]
fn accessors_before_run_report_not_run_yet() {
    let (points, elements) = square_2d();
    let remover = DuplicatedVertexRemoval::new(points, elements).unwrap();
    assert_eq!(remover.points().unwrap_err(), WeldError::NotRunYet);
    assert_eq!(remover.elements().unwrap_err(), WeldError::NotRunYet);
    assert_eq!(remover.index_map().unwrap_err(), WeldError::NotRunYet);
    assert_eq!(remover.into_output().unwrap_err(), WeldError::NotRunYet);
}

#[test]
fn invalid_tolerance_keeps_previous_results() {
    let (mut points, elements) = square_2d();
    let row1 = points.row(1).into_owned();
    points.set_row(0, &row1);
    let mut remover = DuplicatedVertexRemoval::new(points, elements).unwrap();
    assert!(matches!(
        remover.run(-1.0),
        Err(WeldError::InvalidTolerance { .. })
    ));
    assert_eq!(remover.points().unwrap_err(), WeldError::NotRunYet);
    remover.run(1e-3).unwrap();
    let before = remover.points().unwrap().clone();
    assert!(remover.run(f64::NAN).is_err());
    assert_eq!(remover.points().unwrap(), &before);
}

#[test]
fn rerun_replaces_cached_results() {
    let points: Points = dmatrix![0.0; 0.5; 2.0];
    let elements: Elements = dmatrix![0, 1; 1, 2];
    let mut remover = DuplicatedVertexRemoval::new(points, elements).unwrap();
    assert_eq!(remover.run(0.1).unwrap().points_out, 3);
    assert_eq!(remover.run(0.6).unwrap().points_out, 2);
    assert_eq!(remover.elements().unwrap(), &dmatrix![0, 0; 0, 1]);
    assert_eq!(remover.run(f64::INFINITY).unwrap().points_out, 1);
    assert_eq!(remover.points().unwrap(), &dmatrix![2.0]);
}

#[test]
fn importance_levels_choose_the_survivor() {
    let points: Points = dmatrix![0.0, 0.0; 0.0, 0.0; 0.0, 0.0; 3.0, 0.0];
    let elements: Elements = dmatrix![0, 1, 3; 2, 1, 3];
    let mut remover = DuplicatedVertexRemoval::new(points, elements).unwrap();
    assert_eq!(
        remover.set_importance_levels(vec![1, 2]).unwrap_err(),
        WeldError::ImportanceLength {
            expected: 4,
            got: 2
        }
    );
    remover.set_importance_levels(vec![0, 5, 0, 0]).unwrap();
    remover.run(0.0).unwrap();
    assert_eq!(remover.index_map().unwrap().survivors(), &[1, 3]);
    assert_eq!(remover.elements().unwrap(), &dmatrix![0, 0, 1; 0, 0, 1]);
    remover.clear_importance_levels();
    remover.run(0.0).unwrap();
    assert_eq!(remover.index_map().unwrap().survivors(), &[2, 3]);
}

// ---- properties ----

/// Independent class computation by flood fill over the O(N²) relation.
fn reference_max_rep(points: &Points, tolerance: f64) -> Vec<usize> {
    let n = points.nrows();
    let mut comp = vec![usize::MAX; n];
    for start in 0..n {
        if comp[start] != usize::MAX {
            continue;
        }
        let mut stack = vec![start];
        let mut members = Vec::new();
        comp[start] = start;
        while let Some(i) = stack.pop() {
            members.push(i);
            for j in 0..n {
                if comp[j] == usize::MAX && within_tolerance(points, i, j, tolerance) {
                    comp[j] = start;
                    stack.push(j);
                }
            }
        }
        let max = *members.iter().max().unwrap();
        for m in members {
            comp[m] = max;
        }
    }
    comp
}

/// Lattice points (spacing 0.5) so that many pairs sit exactly at τ.
fn mesh_strategy() -> impl Strategy<Value = (Points, Elements, f64)> {
    (1usize..=3, 0usize..30).prop_flat_map(|(dim, n)| {
        let coords = prop::collection::vec(0i32..5, n * dim);
        let elements = if n == 0 {
            Just(Vec::new()).boxed()
        } else {
            prop::collection::vec(0..n, 0..=(3 * 8)).boxed()
        };
        let tol = prop::sample::select(vec![0.0, 0.5, 0.75, 1.0]);
        (Just(dim), Just(n), coords, elements, tol).prop_map(|(dim, n, coords, idx, tol)| {
            let points = Points::from_fn(n, dim, |r, c| coords[r * dim + c] as f64 * 0.5);
            let m = idx.len() / 3;
            let elements = Elements::from_fn(m, 3, |r, c| idx[r * 3 + c]);
            (points, elements, tol)
        })
    })
}

proptest! {
    #[test]
    fn prop_weld_invariants((points, elements, tol) in mesh_strategy()) {
        let out = remove_duplicated_vertices(points.clone(), elements.clone(), tol).unwrap();
        let n_new = out.points.nrows();
        let map = out.index_map.as_slice();

        // Partition: image of the map is exactly 0..N'.
        let mut hit = vec![false; n_new];
        for &v in map {
            prop_assert!(v < n_new);
            hit[v] = true;
        }
        prop_assert!(hit.iter().all(|&h| h));

        // Representative maximality against an independent flood fill.
        let reference = reference_max_rep(&points, tol);
        for i in 0..points.nrows() {
            prop_assert_eq!(out.index_map.survivors()[map[i]], reference[i]);
        }

        // Order preservation and unmodified coordinates.
        let survivors = out.index_map.survivors();
        prop_assert!(survivors.windows(2).all(|w| w[0] < w[1]));
        for (k, &s) in survivors.iter().enumerate() {
            prop_assert_eq!(out.points.row(k), points.row(s));
        }

        // Index validity and shape preservation.
        prop_assert_eq!(out.elements.shape(), elements.shape());
        prop_assert!(out.elements.iter().all(|&i| i < n_new));
        for (old, new) in elements.iter().zip(out.elements.iter()) {
            prop_assert_eq!(map[*old], *new);
        }
    }

    #[test]
    fn prop_backends_agree((points, elements, tol) in mesh_strategy()) {
        let run = |backend| {
            let mut r = DuplicatedVertexRemoval::new(points.clone(), elements.clone()).unwrap();
            r.run_with(&WeldCfg { tolerance: tol, backend }).unwrap();
            r.into_output().unwrap()
        };
        let reference = run(ProximityBackend::BruteForce);
        prop_assert_eq!(run(ProximityBackend::Grid), reference.clone());
        prop_assert_eq!(run(ProximityBackend::KdTree), reference);
    }

    #[test]
    fn prop_rewelding_is_stable_when_survivors_are_separated((points, elements, tol) in mesh_strategy()) {
        let first = remove_duplicated_vertices(points, elements, tol).unwrap();
        let n1 = first.points.nrows();
        let separated = (0..n1).all(|i| (i + 1..n1).all(|j| !within_tolerance(&first.points, i, j, tol)));
        let second = remove_duplicated_vertices(first.points.clone(), first.elements.clone(), tol).unwrap();
        prop_assert!(second.points.nrows() <= n1);
        if separated {
            prop_assert_eq!(second.points.nrows(), n1);
            prop_assert_eq!(second.elements, first.elements);
        }
    }
}
