//! Borrowed view over a flat scalar field.

use crate::coords::{check_resolution, lattice_index, lattice_len, samples_per_axis};
use crate::error::CoreError;
use crate::traits::ScalarGrid;
use crate::types::LatticeCoord;

/// A read-only [`ScalarGrid`] over a row-major slice of `(N + 1)^3` samples.
///
/// Construction validates the slice length once, so every in-range lookup is
/// a plain index.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    resolution: u32,
    values: &'a [f32],
}

impl<'a> FieldView<'a> {
    /// Wrap `values` as a field of `resolution` cells per axis.
    ///
    /// # Errors
    /// * `ResolutionOutOfRange` if `resolution` is zero or not addressable
    /// * `FieldSizeMismatch` if `values.len() != (resolution + 1)^3`
    pub fn new(resolution: u32, values: &'a [f32]) -> Result<Self, CoreError> {
        check_resolution(resolution)?;
        let expected = lattice_len(samples_per_axis(resolution));
        if values.len() != expected {
            return Err(CoreError::FieldSizeMismatch {
                expected,
                got: values.len(),
            });
        }
        Ok(Self { resolution, values })
    }

    /// The underlying samples in row-major order.
    #[inline]
    pub fn values(&self) -> &'a [f32] {
        self.values
    }
}

impl ScalarGrid for FieldView<'_> {
    #[inline]
    fn resolution(&self) -> u32 {
        self.resolution
    }

    #[inline]
    fn sample(&self, coord: LatticeCoord) -> f32 {
        self.values[lattice_index(coord, self.samples_per_axis())]
    }
}
