//! Parallel marching cubes over every cell of a uniform grid.
//!
//! Cell `b` (numbered with [`lattice_coord`] over `N` cells per axis) owns the
//! vertex slots `b * 12 .. b * 12 + 12`. The vertex buffer is sized once and
//! handed out in disjoint 12-slot chunks, so vertex writes need no locking.
//! Triangles go through a single mutex-guarded list, taken once per
//! non-empty cell.

use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;

use isomesh_core::marching_cubes::process_cell_no_alloc;
use isomesh_core::{
    check_resolution, lattice_coord, vertex_slot, vertex_slot_count, Point3, ScalarGrid,
    EDGES_PER_CELL,
};

use crate::error::Result;

/// Raw output of an extraction pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// `N^3 * 12` slots; only slots on crossed edges are meaningful.
    pub vertices: Vec<Point3>,
    /// Slot index triples, unordered across cells.
    pub triangles: Vec<[u32; 3]>,
}

impl Extraction {
    /// True when no cell produced a triangle.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Extract the `iso_value` surface of `grid` on the current rayon pool.
///
/// # Errors
/// `ResolutionOutOfRange` if the grid's vertex slots are not addressable with `u32`.
pub fn extract<G>(grid: &G, iso_value: f32) -> Result<Extraction>
where
    G: ScalarGrid + Sync + ?Sized,
{
    let resolution = grid.resolution();
    check_resolution(resolution)?;

    let mut vertices = vec![Point3::splat(0.0); vertex_slot_count(resolution)];
    let triangles = Mutex::new(Vec::new());

    vertices
        .par_chunks_mut(EDGES_PER_CELL)
        .enumerate()
        .for_each(|(cell_index, slots)| {
            let cell = lattice_coord(cell_index, resolution);
            let patch = process_cell_no_alloc(grid, cell, iso_value);
            if patch.is_empty() {
                return;
            }

            let active = patch.active_edges();
            for (edge, slot) in slots.iter_mut().enumerate() {
                if active & (1 << edge) != 0 {
                    *slot = patch.vertices()[edge];
                }
            }

            let base = vertex_slot(cell_index, 0) as u32;
            let mut out = triangles.lock().unwrap_or_else(PoisonError::into_inner);
            out.extend(patch.triangles().iter().map(|tri| {
                [
                    base + u32::from(tri[0]),
                    base + u32::from(tri[1]),
                    base + u32::from(tri[2]),
                ]
            }));
        });

    Ok(Extraction {
        vertices,
        triangles: triangles.into_inner().unwrap_or_else(PoisonError::into_inner),
    })
}
