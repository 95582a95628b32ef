//! Tolerance-based duplicate vertex removal for indexed meshes.
//!
//! Given N points in D dimensions and M fixed-arity elements indexing them,
//! collapse every group of points connected by within-τ chains to a single
//! survivor and rewrite the element indices so the mesh stays consistent.
//!
//! Pipeline (one blocking pass, see `remover`):
//! `proximity` → `equivalence` → `representative` → `compact`.
//!
//! API Policy
//! - `DuplicatedVertexRemoval` and `remove_duplicated_vertices` are the entry
//!   points; the stage modules are public for tests, benches and experiments.
//! - Topology is not repaired: elements that degenerate after a collapse are
//!   kept as-is.

pub mod api;
pub mod cfg;
pub mod compact;
pub mod equivalence;
pub mod error;
pub mod mesh_gen;
pub mod proximity;
pub mod remover;
pub mod representative;
pub mod types;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{ProximityBackend, WeldCfg};
pub use error::WeldError;
pub use remover::{remove_duplicated_vertices, DuplicatedVertexRemoval, WeldOutput};
pub use types::{Elements, Points, WeldStats};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::{ProximityBackend, WeldCfg, DEFAULT_TOLERANCE};
    pub use crate::compact::IndexMap;
    pub use crate::error::WeldError;
    pub use crate::remover::{remove_duplicated_vertices, DuplicatedVertexRemoval, WeldOutput};
    pub use crate::types::{elements_from_rows, points_from_rows, Elements, Points, WeldStats};
}
