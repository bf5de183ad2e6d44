//! Lattice addressing for the flat scalar field and the per-cell vertex blocks.
//!
//! Every 1D index in the workspace goes through [`lattice_index`] and its
//! inverse [`lattice_coord`]. The layout is row-major with `x` varying slowest:
//!
//! ```text
//! index(x, y, z) = x * dim^2 + y * dim + z
//! ```
//!
//! Samples use `dim = resolution + 1`, cells use `dim = resolution`.

use crate::error::CoreError;
use crate::marching_cubes::EDGES_PER_CELL;
use crate::types::LatticeCoord;

/// Largest resolution whose vertex slots (`resolution^3 * 12`) are all
/// addressable by a `u32` triangle index.
pub const MAX_RESOLUTION: u32 = 710;

/// Flatten a lattice coordinate into a 1D index for a cube of side `dim`.
///
/// # Example
/// ```
/// use isomesh_core::coords::lattice_index;
/// use isomesh_core::types::LatticeCoord;
///
/// // 3x3x3 lattice: (1, 2, 0) -> 1*9 + 2*3 + 0
/// assert_eq!(lattice_index(LatticeCoord::new(1, 2, 0), 3), 15);
/// ```
#[inline]
pub fn lattice_index(coord: LatticeCoord, dim: u32) -> usize {
    debug_assert!(
        coord.within(dim),
        "lattice coordinate {:?} outside dimension {}",
        coord,
        dim
    );
    let dim = dim as usize;
    (coord.x as usize * dim + coord.y as usize) * dim + coord.z as usize
}

/// Recover the lattice coordinate of a 1D index for a cube of side `dim`.
///
/// This is the inverse of [`lattice_index`].
#[inline]
pub fn lattice_coord(index: usize, dim: u32) -> LatticeCoord {
    let d = dim as usize;
    debug_assert!(index < d * d * d, "index {} outside dimension {}", index, dim);
    let z = index % d;
    let y = (index / d) % d;
    let x = index / (d * d);
    LatticeCoord::new(x as u32, y as u32, z as u32)
}

/// Number of points in a cube lattice of side `dim`.
#[inline]
pub const fn lattice_len(dim: u32) -> usize {
    let d = dim as usize;
    d * d * d
}

/// Samples per axis for a field of `resolution` cells per axis.
#[inline]
pub const fn samples_per_axis(resolution: u32) -> u32 {
    resolution + 1
}

/// Number of vertex slots reserved for a mesh of `resolution^3` cells.
#[inline]
pub const fn vertex_slot_count(resolution: u32) -> usize {
    lattice_len(resolution) * EDGES_PER_CELL
}

/// Global vertex slot of a cell-local edge vertex.
#[inline]
pub const fn vertex_slot(cell_index: usize, edge: usize) -> usize {
    cell_index * EDGES_PER_CELL + edge
}

/// Check that a resolution is meshable.
///
/// # Errors
/// Returns `ResolutionOutOfRange` for zero or for values above [`MAX_RESOLUTION`].
#[inline]
pub fn check_resolution(resolution: u32) -> Result<(), CoreError> {
    if resolution == 0 || resolution > MAX_RESOLUTION {
        Err(CoreError::ResolutionOutOfRange { resolution })
    } else {
        Ok(())
    }
}
