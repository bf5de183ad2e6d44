//! # isomesh_core
//!
//! Pure Marching Cubes algorithms over uniformly sampled scalar fields.
//!
//! This crate holds everything that happens inside a single cell: lattice
//! addressing, the triangulation tables, the cube classifier, the edge
//! interpolator and the cell mesher. Parallel sampling and mesh assembly live
//! in `isomesh_rs`.
//!
//! ## Features
//!
//! - **no_std compatible**: Works in embedded environments with the `alloc` feature
//! - **Pure algorithms**: No field storage beyond a borrowed [`FieldView`]
//! - **Compile-time tables**: Lookup tables re-indexed by `const fn`
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables standard library support
//! - `alloc`: Enables heap allocation (Vec, etc.) without full std
//! - `serde`: Derives `Serialize`/`Deserialize` for [`Point3`]
//!
//! ## Modules
//!
//! - [`types`]: Core data types (Point3, LatticeCoord)
//! - [`coords`]: Row-major lattice addressing and vertex slot numbering
//! - [`traits`]: Sample access abstraction (ScalarGrid) and corner numbering
//! - [`field`]: Borrowed, validated view over a flat sample slice
//! - [`marching_cubes`]: Tables, classifier, interpolator, cell mesher
//! - [`error`]: Error types
//!
//! ## Usage
//!
//! ```
//! use isomesh_core::prelude::*;
//!
//! // One cell, corner (0,0,0) above the threshold, everything else below.
//! let mut samples = [0.0f32; 8];
//! samples[0] = 1.0;
//! let field = FieldView::new(1, &samples).unwrap();
//!
//! let patch = process_cell_no_alloc(&field, LatticeCoord::new(0, 0, 0), 0.5);
//! assert_eq!(patch.config(), 0xFE);
//! assert_eq!(patch.triangles().len(), 1);
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Conditional std/alloc support
#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

// Internal alloc prelude for conditional compilation
#[cfg(feature = "std")]
mod alloc_prelude {
    pub use std::vec::Vec;
}

#[cfg(all(feature = "alloc", not(feature = "std")))]
mod alloc_prelude {
    pub use alloc::vec::Vec;
}

pub mod coords;
pub mod error;
pub mod field;
pub mod marching_cubes;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
///
/// Provides the most commonly used types and functions.
pub mod prelude {
    pub use crate::coords::{
        lattice_coord, lattice_index, lattice_len, samples_per_axis, vertex_slot,
        vertex_slot_count, MAX_RESOLUTION,
    };
    pub use crate::error::CoreError;
    pub use crate::field::FieldView;
    pub use crate::marching_cubes::{
        classify_cell, compute_cube_index, edge_parameter, interpolate_vertex,
        process_cell_no_alloc, CellPatch,
    };
    pub use crate::traits::{corner_from_index, index_from_corner, ScalarGrid};
    pub use crate::types::{LatticeCoord, Point3};

    #[cfg(any(feature = "std", feature = "alloc"))]
    pub use crate::marching_cubes::process_cell;
}

// Re-export everything at crate root for convenience
pub use coords::{
    check_resolution, lattice_coord, lattice_index, lattice_len, samples_per_axis, vertex_slot,
    vertex_slot_count, MAX_RESOLUTION,
};
pub use error::CoreError;
pub use field::FieldView;
pub use marching_cubes::{CellPatch, EDGES_PER_CELL, MAX_TRIANGLES_PER_CELL};
pub use traits::{corner_from_index, index_from_corner, ScalarGrid};
pub use types::{LatticeCoord, Point3};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use marching_cubes::process_cell_no_alloc;

    /// Analytic sphere sampled on demand, radius in grid units.
    struct SphereField {
        resolution: u32,
        center: Point3,
        radius: f32,
    }

    impl ScalarGrid for SphereField {
        fn resolution(&self) -> u32 {
            self.resolution
        }

        fn sample(&self, coord: LatticeCoord) -> f32 {
            (Point3::from(coord) - self.center).length() / self.radius
        }
    }

    #[test]
    fn test_sphere_cells_emit_bounded_patches() {
        let field = SphereField {
            resolution: 8,
            center: Point3::splat(4.0),
            radius: 3.0,
        };

        let mut total_triangles = 0;
        for index in 0..lattice_len(8) {
            let cell = lattice_coord(index, 8);
            let patch = process_cell_no_alloc(&field, cell, 1.0);

            assert!(patch.triangles().len() <= MAX_TRIANGLES_PER_CELL);
            for tri in patch.triangle_positions() {
                for v in &tri {
                    // Vertices stay within the originating cell.
                    let lo = Point3::from(cell);
                    let hi = lo + Point3::splat(1.0);
                    assert!(v.x >= lo.x && v.x <= hi.x);
                    assert!(v.y >= lo.y && v.y <= hi.y);
                    assert!(v.z >= lo.z && v.z <= hi.z);

                    // And close to the true surface.
                    let r = (*v - field.center).length();
                    assert!((r - field.radius).abs() < 0.5, "radius {}", r);
                }
            }
            total_triangles += patch.triangles().len();
        }

        assert!(total_triangles > 50, "got {}", total_triangles);
        assert!(total_triangles < 2000, "got {}", total_triangles);
    }

    #[test]
    fn test_classification_is_reproducible() {
        let field = SphereField {
            resolution: 8,
            center: Point3::splat(4.0),
            radius: 3.0,
        };

        for index in 0..lattice_len(8) {
            let cell = lattice_coord(index, 8);
            let a = marching_cubes::classify_cell(&field, cell, 1.0);
            let b = marching_cubes::classify_cell(&field, cell, 1.0);
            assert_eq!(a, b);
        }
    }
}
