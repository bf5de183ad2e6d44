//! Dense scalar field sampled from a density function.
//!
//! Samples are stored flat in the row-major order defined by
//! [`isomesh_core::lattice_index`]; sampling runs in parallel with rayon.

use rayon::prelude::*;

use isomesh_core::{
    lattice_coord, lattice_index, lattice_len, samples_per_axis, FieldView, LatticeCoord,
    ScalarGrid,
};

use crate::density::DensityFn;
use crate::error::Result;

/// Mapping from lattice coordinates to density-function coordinates.
///
/// `value[i, j, k] = density(i * scale + offset_x, j * scale, k * scale + offset_z)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    /// World step per lattice step.
    pub scale: f32,
    /// Added to the x coordinate.
    pub offset_x: f32,
    /// Added to the z coordinate.
    pub offset_z: f32,
}

impl SamplingParams {
    /// Density-function coordinates of a lattice point.
    #[inline]
    pub fn world_position(&self, coord: LatticeCoord) -> (f32, f32, f32) {
        (
            coord.x as f32 * self.scale + self.offset_x,
            coord.y as f32 * self.scale,
            coord.z as f32 * self.scale + self.offset_z,
        )
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_z: 0.0,
        }
    }
}

/// Owned, immutable grid of `(N + 1)^3` samples for `N` cells per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    resolution: u32,
    values: Vec<f32>,
}

impl ScalarField {
    /// Sample `density` over the lattice of a `resolution`-cell grid.
    ///
    /// Every lattice point is evaluated independently on the rayon pool that
    /// is current when this is called.
    ///
    /// # Errors
    /// Returns `ResolutionOutOfRange` (before allocating) for unmeshable resolutions.
    pub fn sample<D: DensityFn + ?Sized>(
        resolution: u32,
        params: &SamplingParams,
        density: &D,
    ) -> Result<Self> {
        isomesh_core::check_resolution(resolution)?;

        let dim = samples_per_axis(resolution);
        let mut values = vec![0.0f32; lattice_len(dim)];
        values.par_iter_mut().enumerate().for_each(|(index, value)| {
            let (x, y, z) = params.world_position(lattice_coord(index, dim));
            *value = density.density(x, y, z);
        });

        Ok(Self { resolution, values })
    }

    /// Wrap existing samples, validating their count.
    ///
    /// # Errors
    /// * `ResolutionOutOfRange` for unmeshable resolutions
    /// * `FieldSizeMismatch` if `values.len() != (resolution + 1)^3`
    pub fn from_values(resolution: u32, values: Vec<f32>) -> Result<Self> {
        FieldView::new(resolution, &values)?;
        Ok(Self { resolution, values })
    }

    /// Samples in row-major order.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Consume the field and return its samples.
    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}

impl ScalarGrid for ScalarField {
    #[inline]
    fn resolution(&self) -> u32 {
        self.resolution
    }

    #[inline]
    fn sample(&self, coord: LatticeCoord) -> f32 {
        self.values[lattice_index(coord, self.samples_per_axis())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IsoMeshError;
    use isomesh_core::CoreError;

    #[test]
    fn test_sample_matches_density() {
        let params = SamplingParams {
            scale: 0.5,
            offset_x: 10.0,
            offset_z: -2.0,
        };
        let density = |x: f32, y: f32, z: f32| x * 100.0 + y * 10.0 + z;
        let field = ScalarField::sample(3, &params, &density).unwrap();

        assert_eq!(field.values().len(), 64);
        for index in 0..64 {
            let coord = lattice_coord(index, 4);
            let (x, y, z) = params.world_position(coord);
            assert_eq!(field.sample(coord), density(x, y, z));
        }
    }

    #[test]
    fn test_sample_is_row_major() {
        let params = SamplingParams::default();
        let field = ScalarField::sample(2, &params, &|x: f32, y: f32, z: f32| {
            x * 9.0 + y * 3.0 + z
        })
        .unwrap();

        for (index, &value) in field.values().iter().enumerate() {
            assert_eq!(value, index as f32);
        }
    }

    #[test]
    fn test_sample_rejects_zero_resolution() {
        let err = ScalarField::sample(0, &SamplingParams::default(), &|_: f32, _: f32, _: f32| 0.0)
            .unwrap_err();
        assert_eq!(
            err,
            IsoMeshError::Core(CoreError::ResolutionOutOfRange { resolution: 0 })
        );
    }

    #[test]
    fn test_from_values_validates_length() {
        assert!(ScalarField::from_values(1, vec![0.0; 8]).is_ok());

        let err = ScalarField::from_values(2, vec![0.0; 8]).unwrap_err();
        assert_eq!(
            err,
            IsoMeshError::Core(CoreError::FieldSizeMismatch {
                expected: 27,
                got: 8
            })
        );
    }
}
