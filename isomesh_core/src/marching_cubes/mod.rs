//! Marching Cubes mesh extraction.
//!
//! This module provides the per-cell half of the algorithm:
//!
//! - Compile-time lookup tables for cube configurations
//! - The cube classifier and edge interpolator
//! - Functions for processing individual cells
//!
//! # Example
//!
//! ```ignore
//! use isomesh_core::marching_cubes::process_cell_no_alloc;
//! use isomesh_core::{FieldView, LatticeCoord};
//!
//! let field = FieldView::new(1, &samples)?;
//! let patch = process_cell_no_alloc(&field, LatticeCoord::new(0, 0, 0), 0.5);
//! for triangle in patch.triangle_positions() {
//!     // ...
//! }
//! ```

mod algorithm;
mod tables;

pub use algorithm::{
    classify_cell, compute_cube_index, edge_parameter, interpolate_vertex, process_cell_no_alloc,
    CellPatch, DEGENERATE_EPSILON,
};
pub use tables::{
    canonical_config, CORNER_OFFSETS, EDGES_PER_CELL, EDGE_TABLE, EDGE_VERTICES,
    MAX_TRIANGLES_PER_CELL, SENTINEL, TRI_TABLE,
};

#[cfg(any(feature = "std", feature = "alloc"))]
pub use algorithm::process_cell;
