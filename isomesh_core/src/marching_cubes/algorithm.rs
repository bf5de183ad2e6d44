//! Marching Cubes cell classification, edge interpolation, and triangle emission.

use crate::traits::{corner_from_index, ScalarGrid};
use crate::types::{LatticeCoord, Point3};

use super::tables::{
    EDGES_PER_CELL, EDGE_TABLE, EDGE_VERTICES, MAX_TRIANGLES_PER_CELL, SENTINEL, TRI_TABLE,
};

/// Corner values closer than this are treated as equal when interpolating.
pub const DEGENERATE_EPSILON: f32 = 1e-10;

/// Interpolation parameter of the iso-crossing along an edge.
///
/// Returns `t` in `[0, 1]` such that `lerp(v0, v1, t) == iso_value` when the
/// crossing lies on the edge. Equal corner values (or a NaN ratio) fall back
/// to the midpoint, `t = 0.5`.
#[inline]
pub fn edge_parameter(v0: f32, v1: f32, iso_value: f32) -> f32 {
    let denom = v1 - v0;
    if libm::fabsf(denom) < DEGENERATE_EPSILON {
        return 0.5;
    }

    let t = (iso_value - v0) / denom;
    if t.is_nan() {
        return 0.5;
    }

    t.clamp(0.0, 1.0)
}

/// Interpolate vertex position along an edge where the field crosses the iso-value.
///
/// # Arguments
/// * `p0` - Position of the first corner
/// * `p1` - Position of the second corner
/// * `v0` - Sample at the first corner
/// * `v1` - Sample at the second corner
/// * `iso_value` - The surface threshold
///
/// # Returns
/// A point on the segment `p0..=p1`.
#[inline]
pub fn interpolate_vertex(p0: Point3, p1: Point3, v0: f32, v1: f32, iso_value: f32) -> Point3 {
    p0.lerp(p1, edge_parameter(v0, v1, iso_value))
}

/// Compute the cube configuration index from corner samples.
///
/// Bit `i` is set when corner `i` is below `iso_value`.
#[inline]
pub fn compute_cube_index(corner_values: &[f32; 8], iso_value: f32) -> usize {
    let mut index = 0;
    for (i, &val) in corner_values.iter().enumerate() {
        if val < iso_value {
            index |= 1 << i;
        }
    }
    index
}

/// Classify the cell anchored at `cell`.
#[inline]
pub fn classify_cell<G: ScalarGrid + ?Sized>(grid: &G, cell: LatticeCoord, iso_value: f32) -> usize {
    compute_cube_index(&grid.corner_values(cell), iso_value)
}

/// Surface patch emitted by a single cell.
///
/// Vertices live in 12 local slots addressed by edge index; only the slots of
/// edges crossed by the surface are written. Triangles reference those slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPatch {
    config: u8,
    vertices: [Point3; EDGES_PER_CELL],
    triangles: [[u8; 3]; MAX_TRIANGLES_PER_CELL],
    triangle_count: usize,
}

impl CellPatch {
    const fn empty(config: u8) -> Self {
        Self {
            config,
            vertices: [Point3::splat(0.0); EDGES_PER_CELL],
            triangles: [[0; 3]; MAX_TRIANGLES_PER_CELL],
            triangle_count: 0,
        }
    }

    /// Configuration index of the cell.
    #[inline]
    pub fn config(&self) -> u8 {
        self.config
    }

    /// Edge mask of the slots holding interpolated vertices.
    #[inline]
    pub fn active_edges(&self) -> u16 {
        EDGE_TABLE[self.config as usize]
    }

    /// True when the cell emits no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangle_count == 0
    }

    /// The 12 local vertex slots, indexed by edge.
    #[inline]
    pub fn vertices(&self) -> &[Point3; EDGES_PER_CELL] {
        &self.vertices
    }

    /// Emitted triangles as local slot indices, in table order.
    #[inline]
    pub fn triangles(&self) -> &[[u8; 3]] {
        &self.triangles[..self.triangle_count]
    }

    /// Emitted triangles resolved to positions.
    pub fn triangle_positions(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.triangles().iter().map(move |tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }
}

/// Process a single cell without dynamic allocation.
///
/// # Arguments
/// * `grid` - Lattice providing the samples
/// * `cell` - Cell anchor, each component in `0..resolution`
/// * `iso_value` - The surface threshold
///
/// # Returns
/// The cell's patch: up to 5 triangles over up to 12 edge vertices. Positions
/// are in grid units, on the edges of the cell.
pub fn process_cell_no_alloc<G: ScalarGrid + ?Sized>(
    grid: &G,
    cell: LatticeCoord,
    iso_value: f32,
) -> CellPatch {
    debug_assert!(
        cell.within(grid.resolution()),
        "cell {:?} outside resolution {}",
        cell,
        grid.resolution()
    );

    let corner_values = grid.corner_values(cell);
    let cube_index = compute_cube_index(&corner_values, iso_value);

    let mut patch = CellPatch::empty(cube_index as u8);
    let tri_list = &TRI_TABLE[cube_index];
    if tri_list[0] == SENTINEL {
        return patch;
    }

    let anchor = Point3::from(cell);
    let edge_flags = EDGE_TABLE[cube_index];
    for (edge_idx, &(c0, c1)) in EDGE_VERTICES.iter().enumerate() {
        if (edge_flags & (1 << edge_idx)) != 0 {
            patch.vertices[edge_idx] = interpolate_vertex(
                anchor + Point3::from(LatticeCoord::from(corner_from_index(c0))),
                anchor + Point3::from(LatticeCoord::from(corner_from_index(c1))),
                corner_values[c0],
                corner_values[c1],
                iso_value,
            );
        }
    }

    for tri in tri_list.chunks_exact(3) {
        if tri[0] == SENTINEL || patch.triangle_count == MAX_TRIANGLES_PER_CELL {
            break;
        }
        patch.triangles[patch.triangle_count] = [tri[0] as u8, tri[1] as u8, tri[2] as u8];
        patch.triangle_count += 1;
    }

    patch
}

/// Process a single cell and return its triangles as positions.
#[cfg(any(feature = "std", feature = "alloc"))]
pub fn process_cell<G: ScalarGrid + ?Sized>(
    grid: &G,
    cell: LatticeCoord,
    iso_value: f32,
) -> crate::alloc_prelude::Vec<[Point3; 3]> {
    process_cell_no_alloc(grid, cell, iso_value)
        .triangle_positions()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single cell with explicit corner samples.
    struct CornerGrid {
        values: [f32; 8],
    }

    impl ScalarGrid for CornerGrid {
        fn resolution(&self) -> u32 {
            1
        }

        fn sample(&self, coord: LatticeCoord) -> f32 {
            let corner = crate::traits::index_from_corner((coord.x, coord.y, coord.z));
            self.values[corner]
        }
    }

    #[test]
    fn test_edge_parameter_midpoint() {
        assert!((edge_parameter(0.2, 0.8, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_edge_parameter_degenerate() {
        assert_eq!(edge_parameter(0.4, 0.4, 0.5), 0.5);
        assert_eq!(edge_parameter(f32::NAN, 1.0, 0.5), 0.5);
    }

    #[test]
    fn test_edge_parameter_clamps() {
        assert_eq!(edge_parameter(0.6, 0.9, 0.5), 0.0);
        assert_eq!(edge_parameter(0.1, 0.2, 0.5), 1.0);
    }

    #[test]
    fn test_interpolate_vertex_midpoint() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(1.0, 0.0, 0.0);

        let result = interpolate_vertex(p0, p1, 0.2, 0.8, 0.5);
        assert!((result.x - 0.5).abs() < 1e-6);
        assert_eq!(result.y, 0.0);
        assert_eq!(result.z, 0.0);
    }

    #[test]
    fn test_compute_cube_index() {
        let values = [1.0; 8];
        assert_eq!(compute_cube_index(&values, 0.5), 0);

        let values = [0.0; 8];
        assert_eq!(compute_cube_index(&values, 0.5), 255);

        let mut values = [1.0; 8];
        values[0] = 0.0;
        assert_eq!(compute_cube_index(&values, 0.5), 1);

        values[1] = 0.0;
        assert_eq!(compute_cube_index(&values, 0.5), 3);
    }

    #[test]
    fn test_value_at_threshold_is_not_below() {
        let values = [0.5; 8];
        assert_eq!(compute_cube_index(&values, 0.5), 0);
    }

    #[test]
    fn test_uniform_cells_are_empty() {
        let below = CornerGrid { values: [0.3; 8] };
        let patch = process_cell_no_alloc(&below, LatticeCoord::new(0, 0, 0), 0.5);
        assert_eq!(patch.config(), 0xFF);
        assert!(patch.is_empty());

        let above = CornerGrid { values: [0.7; 8] };
        let patch = process_cell_no_alloc(&above, LatticeCoord::new(0, 0, 0), 0.5);
        assert_eq!(patch.config(), 0x00);
        assert!(patch.is_empty());
    }

    #[test]
    fn test_single_corner_emits_one_triangle() {
        let mut values = [1.0; 8];
        values[0] = 0.0;
        let grid = CornerGrid { values };

        let patch = process_cell_no_alloc(&grid, LatticeCoord::new(0, 0, 0), 0.5);
        assert_eq!(patch.config(), 1);
        assert_eq!(patch.triangles().len(), 1);

        // Edges 0, 3 and 8 meet at corner 0.
        let mut edges: [u8; 3] = patch.triangles()[0];
        edges.sort_unstable();
        assert_eq!(edges, [0, 3, 8]);

        let v = patch.vertices();
        assert_eq!(v[0], Point3::new(0.5, 0.0, 0.0));
        assert_eq!(v[3], Point3::new(0.0, 0.5, 0.0));
        assert_eq!(v[8], Point3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_patch_vertices_lie_on_cell() {
        let grid = CornerGrid {
            values: [0.1, 0.9, 0.4, 0.7, 0.8, 0.2, 0.6, 0.3],
        };
        let patch = process_cell_no_alloc(&grid, LatticeCoord::new(0, 0, 0), 0.5);

        assert!(!patch.is_empty());
        assert!(patch.triangles().len() <= MAX_TRIANGLES_PER_CELL);
        for tri in patch.triangle_positions() {
            for v in &tri {
                assert!(v.is_finite());
                assert!((0.0..=1.0).contains(&v.x));
                assert!((0.0..=1.0).contains(&v.y));
                assert!((0.0..=1.0).contains(&v.z));
            }
        }
    }

    #[test]
    #[cfg(any(feature = "std", feature = "alloc"))]
    fn test_alloc_and_no_alloc_match() {
        let grid = CornerGrid {
            values: [0.1, 0.9, 0.4, 0.7, 0.8, 0.2, 0.6, 0.3],
        };
        let cell = LatticeCoord::new(0, 0, 0);

        let alloc_triangles = process_cell(&grid, cell, 0.5);
        let patch = process_cell_no_alloc(&grid, cell, 0.5);

        assert_eq!(alloc_triangles.len(), patch.triangles().len());
        for (a, b) in alloc_triangles.iter().zip(patch.triangle_positions()) {
            assert_eq!(*a, b);
        }
    }
}
