//! PyO3 bindings for `meshweld`.
//!
//! Notes
//! - Keep bindings thin and predictable; inputs/outputs are nested lists so the
//!   Python side can wrap them in NumPy arrays without a NumPy build dependency.
//! - All validation lives in the Rust crate; errors surface as `ValueError`.

mod common;
mod weld;

use pyo3::prelude::*;

#[pymodule]
fn meshweld_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", meshweld::VERSION)?;
    weld::register(m)?;
    Ok(())
}
