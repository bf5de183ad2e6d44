//! # isomesh_rs
//!
//! Parallel isosurface mesh generation for regenerating voxel terrain.
//!
//! A density function is sampled over a uniform `(N+1)^3` lattice, every one of
//! the `N^3` cells is triangulated with marching cubes, and the result is
//! assembled into vertex, triangle and color buffers ready for upload:
//!
//! - **Sampling**: every lattice point is independent and evaluated on rayon
//! - **Meshing**: each cell owns a fixed block of 12 vertex slots, so cells
//!   write disjoint memory; triangles are gathered under a mutex
//! - **Publishing**: [`generate`] is pure; [`SurfaceSlot`] keeps the latest
//!   result and discards results older than the published one
//!
//! ## Quick Start
//!
//! ```
//! use isomesh_rs::{generate, MeshConfig, SurfaceSlot};
//!
//! let hills = |x: f32, y: f32, z: f32| {
//!     let height = 0.3 + 0.1 * (x * 0.7).sin() * (z * 0.7).cos();
//!     (y * 0.25 - height + 0.5).clamp(0.0, 1.0)
//! };
//!
//! let slot = SurfaceSlot::new();
//! let config = MeshConfig::new(16).with_noise_scale(0.25).with_scroll(0.5);
//!
//! for frame in 0..3 {
//!     let ticket = slot.begin();
//!     let result = generate(&config.at_time(frame as f32 / 60.0), &hills)?;
//!     slot.publish(ticket, result);
//! }
//!
//! let mesh = slot.current().expect("terrain crosses the surface level");
//! println!("{} triangles", mesh.triangle_count());
//! # Ok::<(), isomesh_rs::IsoMeshError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`MeshConfig`], [`ColorGradient`],
//!   [`Rgba`] and the core value types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod density;
mod error;
mod extract;
mod field;
mod generate;
mod mesh;
mod slot;

pub use config::{ColorGradient, MeshConfig, Rgba};
pub use density::DensityFn;
pub use error::{IsoMeshError, Result};
pub use extract::{extract, Extraction};
pub use field::{SamplingParams, ScalarField};
pub use generate::generate;
pub use mesh::{Mesh, MeshResult, MeshStats};
pub use slot::{SurfaceSlot, Ticket};

// Re-export isomesh_core types for convenience
pub use isomesh_core::{CoreError, FieldView, LatticeCoord, Point3, ScalarGrid, MAX_RESOLUTION};

/// Prelude module for convenient imports.
///
/// ```
/// use isomesh_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ColorGradient, MeshConfig, Rgba};
    pub use crate::density::DensityFn;
    pub use crate::error::{IsoMeshError, Result};
    pub use crate::generate::generate;
    pub use crate::mesh::{Mesh, MeshResult, MeshStats};
    pub use crate::slot::SurfaceSlot;

    pub use isomesh_core::Point3;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(x: f32, y: f32, z: f32) -> f32 {
        let d = ((x - 4.0).powi(2) + (y - 4.0).powi(2) + (z - 4.0).powi(2)).sqrt();
        (d / 8.0).min(1.0)
    }

    #[test]
    fn test_basic_workflow() {
        let config = MeshConfig::new(8).with_noise_scale(1.0).with_surface_level(0.3);
        let mesh = generate(&config, &sphere).unwrap().into_mesh().unwrap();

        assert_eq!(mesh.vertices.len(), config.vertex_slots());
        let stats = mesh.stats();
        assert!(stats.triangle_count > 10);

        // Radius 2.4 sphere around (4, 4, 4)
        assert!((stats.bbox_min.x - 1.6).abs() < 0.2, "{:?}", stats.bbox_min);
        assert!((stats.bbox_max.y - 6.4).abs() < 0.2, "{:?}", stats.bbox_max);
    }

    #[test]
    fn test_field_then_extract() {
        let params = SamplingParams {
            scale: 1.0,
            offset_x: 0.0,
            offset_z: 0.0,
        };
        let field = ScalarField::sample(8, &params, &sphere).unwrap();
        let extraction = extract(&field, 0.3).unwrap();

        let config = MeshConfig::new(8).with_noise_scale(1.0).with_surface_level(0.3);
        let mesh = generate(&config, &sphere).unwrap().into_mesh().unwrap();

        assert_eq!(extraction.vertices, mesh.vertices);
        assert_eq!(extraction.triangles.len(), mesh.triangles.len());
    }

    #[test]
    fn test_slot_publication() {
        let slot = SurfaceSlot::new();
        let config = MeshConfig::new(8).with_noise_scale(1.0).with_surface_level(0.3);

        let ticket = slot.begin();
        slot.publish(ticket, generate(&config, &sphere).unwrap());
        assert!(slot.current().is_some());

        let ticket = slot.begin();
        slot.publish(ticket, generate(&config.with_surface_level(0.0), &sphere).unwrap());
        assert!(slot.current().is_none());
        assert_eq!(slot.version(), 2);
    }
}
