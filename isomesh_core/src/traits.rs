//! Traits for storage abstraction in isomesh_core.
//!
//! The cell mesher only needs read access to lattice samples, so downstream
//! crates can mesh any storage that implements [`ScalarGrid`].

use crate::coords::samples_per_axis;
use crate::types::LatticeCoord;

/// Read access to a cube lattice of `(resolution + 1)^3` scalar samples.
///
/// Implementors must answer every coordinate with components in
/// `0..=resolution`; the mesher never asks for anything else.
pub trait ScalarGrid {
    /// Number of cells per axis (`N`).
    fn resolution(&self) -> u32;

    /// The sample stored at a lattice point.
    fn sample(&self, coord: LatticeCoord) -> f32;

    /// Number of samples per axis (`N + 1`).
    #[inline]
    fn samples_per_axis(&self) -> u32 {
        samples_per_axis(self.resolution())
    }

    /// The 8 corner samples of the cell anchored at `cell`, in corner order.
    #[inline]
    fn corner_values(&self, cell: LatticeCoord) -> [f32; 8] {
        let mut values = [0.0f32; 8];
        for (corner, value) in values.iter_mut().enumerate() {
            *value = self.sample(cell.offset(corner_from_index(corner)));
        }
        values
    }
}

impl<G: ScalarGrid + ?Sized> ScalarGrid for &G {
    #[inline]
    fn resolution(&self) -> u32 {
        (**self).resolution()
    }

    #[inline]
    fn sample(&self, coord: LatticeCoord) -> f32 {
        (**self).sample(coord)
    }
}

/// Convert a corner index (0-7) to a corner offset tuple (i, j, k).
///
/// Corners are numbered in binary order, one bit per axis:
/// ```text
/// Corner:  0      1      2      3      4      5      6      7
/// Offset: (0,0,0)(1,0,0)(0,1,0)(1,1,0)(0,0,1)(1,0,1)(0,1,1)(1,1,1)
/// ```
#[inline]
pub const fn corner_from_index(idx: usize) -> (u32, u32, u32) {
    let idx = idx & 7;
    ((idx & 1) as u32, ((idx >> 1) & 1) as u32, ((idx >> 2) & 1) as u32)
}

/// Convert a corner offset tuple (i, j, k) to a corner index (0-7).
///
/// This is the inverse of `corner_from_index`.
#[inline]
pub const fn index_from_corner(corner: (u32, u32, u32)) -> usize {
    ((corner.0 & 1) | ((corner.1 & 1) << 1) | ((corner.2 & 1) << 2)) as usize
}
