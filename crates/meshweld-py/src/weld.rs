//! `remove_duplicated_vertices` binding (kept separate so `lib.rs` stays tiny).

use crate::common::{elements_from_py, map_weld_err, points_from_py, rows_of};
use meshweld::{DuplicatedVertexRemoval, ProximityBackend, WeldCfg};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

type WeldResult = (Vec<Vec<f64>>, Vec<Vec<usize>>, Vec<usize>);

/// Merge vertices within `tol`; returns `(vertices, faces, index_map)`.
///
/// `importance` (one int per vertex) picks the survivor of each group; ties
/// and the default keep the largest original index.
#[pyfunction]
#[pyo3(signature = (vertices, faces, tol, importance=None, backend="auto"))]
pub fn remove_duplicated_vertices(
    vertices: Vec<Vec<f64>>,
    faces: Vec<Vec<usize>>,
    tol: f64,
    importance: Option<Vec<i64>>,
    backend: &str,
) -> PyResult<WeldResult> {
    let backend: ProximityBackend = backend.parse().map_err(PyValueError::new_err)?;
    let mut remover = DuplicatedVertexRemoval::new(points_from_py(vertices)?, elements_from_py(faces)?)
        .map_err(map_weld_err)?;
    if let Some(levels) = importance {
        remover.set_importance_levels(levels).map_err(map_weld_err)?;
    }
    remover
        .run_with(&WeldCfg {
            tolerance: tol,
            backend,
        })
        .map_err(map_weld_err)?;
    let out = remover.into_output().map_err(map_weld_err)?;
    Ok((
        rows_of(&out.points),
        rows_of(&out.elements),
        out.index_map.as_slice().to_vec(),
    ))
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(remove_duplicated_vertices, m)?)?;
    Ok(())
}
