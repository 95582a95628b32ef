use meshweld::types::{elements_from_rows, points_from_rows};
use meshweld::{Elements, Points, WeldError};
use nalgebra::DMatrix;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub fn points_from_py(rows: Vec<Vec<f64>>) -> PyResult<Points> {
    points_from_rows(&rows)
        .ok_or_else(|| PyValueError::new_err("vertices must be a rectangular N×D array"))
}

pub fn elements_from_py(rows: Vec<Vec<usize>>) -> PyResult<Elements> {
    elements_from_rows(&rows)
        .ok_or_else(|| PyValueError::new_err("faces must be a rectangular M×K array"))
}

pub fn rows_of<T: nalgebra::Scalar + Copy>(m: &DMatrix<T>) -> Vec<Vec<T>> {
    m.row_iter().map(|r| r.iter().copied().collect()).collect()
}

pub fn map_weld_err(err: WeldError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
