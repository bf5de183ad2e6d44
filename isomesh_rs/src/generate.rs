//! One-shot regeneration: configuration and density in, mesh out.

use instant::Instant;
use rayon::prelude::*;

use crate::config::MeshConfig;
use crate::density::DensityFn;
use crate::error::Result;
use crate::extract::{extract, Extraction};
use crate::field::ScalarField;
use crate::mesh::{Mesh, MeshResult};

/// Build the isosurface mesh for `config` over `density`.
///
/// Sampling finishes before meshing starts. With `config.threads > 0` both
/// phases run on a dedicated pool of that size, otherwise on rayon's global
/// pool. Nothing is shared between calls; publishing the result is up to the
/// caller (see [`SurfaceSlot`](crate::SurfaceSlot)).
///
/// # Errors
/// * `InvalidConfiguration` if `config` fails [`MeshConfig::validate`]; no
///   memory is allocated in that case
/// * `ThreadPool` if the dedicated pool cannot be built
///
/// # Example
///
/// ```
/// use isomesh_rs::{generate, MeshConfig, MeshResult};
///
/// let config = MeshConfig::new(8)
///     .with_noise_scale(1.0)
///     .with_surface_level(0.45);
/// let ground = |_x: f32, y: f32, _z: f32| y / 8.0;
///
/// match generate(&config, &ground).unwrap() {
///     MeshResult::Surface(mesh) => assert!(mesh.triangle_count() > 0),
///     MeshResult::NoSurface => unreachable!(),
/// }
/// ```
pub fn generate<D: DensityFn + ?Sized>(config: &MeshConfig, density: &D) -> Result<MeshResult> {
    config.validate()?;

    if config.threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        pool.install(|| run(config, density))
    } else {
        run(config, density)
    }
}

fn run<D: DensityFn + ?Sized>(config: &MeshConfig, density: &D) -> Result<MeshResult> {
    let start = Instant::now();

    let field = ScalarField::sample(config.grid_size, &config.sampling(), density)?;
    let sampled = start.elapsed();
    log::debug!(
        "sampled {} points in {:.2?}",
        field.values().len(),
        sampled
    );

    let Extraction {
        vertices,
        triangles,
    } = extract(&field, config.surface_level)?;
    let meshed = start.elapsed();
    log::debug!(
        "meshed {} cells in {:.2?}",
        config.cell_count(),
        meshed - sampled
    );

    if triangles.is_empty() {
        log::debug!(
            "no surface at level {} for grid size {}",
            config.surface_level,
            config.grid_size
        );
        return Ok(MeshResult::NoSurface);
    }

    let gradient = config.colors;
    let grid_size = config.grid_size;
    let colors = vertices
        .par_iter()
        .map(|v| gradient.at_height(v.y, grid_size))
        .collect();

    log::info!(
        "generated {} triangles (grid {}^3) in {:.2?}",
        triangles.len(),
        grid_size,
        start.elapsed()
    );

    Ok(MeshResult::Surface(Mesh {
        vertices,
        triangles,
        colors,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IsoMeshError;

    #[test]
    fn test_generate_rejects_invalid_config() {
        let config = MeshConfig::new(0);
        let err = generate(&config, &|_: f32, _: f32, _: f32| 0.0).unwrap_err();
        assert!(matches!(
            err,
            IsoMeshError::InvalidConfiguration {
                field: "grid_size",
                ..
            }
        ));
    }

    #[test]
    fn test_generate_uniform_field_has_no_surface() {
        let config = MeshConfig::new(1);
        let result = generate(&config, &|_: f32, _: f32, _: f32| 0.3).unwrap();
        assert_eq!(result, MeshResult::NoSurface);
    }

    #[test]
    fn test_generate_on_dedicated_pool() {
        let ground = |_x: f32, y: f32, _z: f32| y * 0.25;
        let config = MeshConfig::new(4).with_noise_scale(1.0);

        let global = generate(&config, &ground).unwrap();
        let pooled = generate(&config.with_threads(2), &ground).unwrap();

        let (a, b) = (global.into_mesh().unwrap(), pooled.into_mesh().unwrap());
        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.triangle_count(), b.triangle_count());
    }

    #[test]
    fn test_colors_follow_height() {
        let ground = |_x: f32, y: f32, _z: f32| y * 0.25;
        let config = MeshConfig::new(4).with_noise_scale(1.0);
        let mesh = generate(&config, &ground).unwrap().into_mesh().unwrap();

        assert_eq!(mesh.colors.len(), mesh.vertices.len());
        for tri in &mesh.triangles {
            for &i in tri {
                let expected = config.colors.at_height(mesh.vertices[i as usize].y, 4);
                assert_eq!(mesh.colors[i as usize], expected);
            }
        }
    }
}
