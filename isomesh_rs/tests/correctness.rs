//! Property-based tests for the extracted surface.

use isomesh_core::marching_cubes::{compute_cube_index, CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES};
use isomesh_core::{lattice_coord, Point3, ScalarGrid, MAX_TRIANGLES_PER_CELL};
use isomesh_rs::{extract, generate, Mesh, MeshConfig, ScalarField};
use proptest::prelude::*;

const RESOLUTION: u32 = 3;
const SAMPLES: usize = 64;

/// Samples on a 1/16 grid, so `1 - v` is exact.
fn dyadic_samples() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec((0u8..=16).prop_map(|k| f32::from(k) / 16.0), SAMPLES)
}

/// Thresholds halfway between sample levels, never equal to a sample.
fn dyadic_threshold() -> impl Strategy<Value = f32> {
    (0u8..16).prop_map(|m| (f32::from(m) + 0.5) / 16.0)
}

fn corner_position(cell: Point3, corner: usize) -> Point3 {
    let (x, y, z) = CORNER_OFFSETS[corner];
    cell + Point3::new(x as f32, y as f32, z as f32)
}

fn sorted_triangles(triangles: &[[u32; 3]]) -> Vec<[u32; 3]> {
    let mut sorted = triangles.to_vec();
    sorted.sort_unstable();
    sorted
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every referenced vertex lies on the cube edge its slot names.
    #[test]
    fn vertices_lie_on_cell_edges(
        values in prop::collection::vec(0.0f32..1.0, SAMPLES),
        threshold in 0.05f32..0.95,
    ) {
        let field = ScalarField::from_values(RESOLUTION, values).unwrap();
        let extraction = extract(&field, threshold).unwrap();

        for &slot in extraction.triangles.iter().flatten() {
            let cell_index = slot as usize / 12;
            let edge = slot as usize % 12;
            let anchor = Point3::from(lattice_coord(cell_index, RESOLUTION));
            let (c0, c1) = EDGE_VERTICES[edge];
            let a = corner_position(anchor, c0);
            let b = corner_position(anchor, c1);
            let v = extraction.vertices[slot as usize];

            let lo = a.min(b);
            let hi = a.max(b);
            prop_assert!(v.x >= lo.x && v.x <= hi.x, "{:?} not on {:?}..{:?}", v, a, b);
            prop_assert!(v.y >= lo.y && v.y <= hi.y, "{:?} not on {:?}..{:?}", v, a, b);
            prop_assert!(v.z >= lo.z && v.z <= hi.z, "{:?} not on {:?}..{:?}", v, a, b);

            // The edge must actually be crossed
            let config = compute_cube_index(&field.corner_values(lattice_coord(cell_index, RESOLUTION)), threshold);
            prop_assert!(EDGE_TABLE[config] & (1 << edge) != 0);
        }
    }

    /// No cell emits more than five triangles.
    #[test]
    fn cells_emit_bounded_triangles(
        values in prop::collection::vec(0.0f32..1.0, SAMPLES),
        threshold in 0.05f32..0.95,
    ) {
        let field = ScalarField::from_values(RESOLUTION, values).unwrap();
        let extraction = extract(&field, threshold).unwrap();

        let mut per_cell = [0usize; 27];
        for tri in &extraction.triangles {
            per_cell[tri[0] as usize / 12] += 1;
        }
        prop_assert!(per_cell.iter().all(|&n| n <= MAX_TRIANGLES_PER_CELL));
    }

    /// Same input, same vertex array and same triangle set.
    #[test]
    fn extraction_is_idempotent(
        values in prop::collection::vec(0.0f32..1.0, SAMPLES),
        threshold in 0.05f32..0.95,
    ) {
        let field = ScalarField::from_values(RESOLUTION, values).unwrap();
        let first = extract(&field, threshold).unwrap();
        let second = extract(&field, threshold).unwrap();

        prop_assert_eq!(&first.vertices, &second.vertices);
        prop_assert_eq!(sorted_triangles(&first.triangles), sorted_triangles(&second.triangles));
    }

    /// Inverting samples and threshold complements every configuration and
    /// keeps the crossing points.
    #[test]
    fn inverted_field_is_complementary(
        values in dyadic_samples(),
        threshold in dyadic_threshold(),
    ) {
        let inverted: Vec<f32> = values.iter().map(|v| 1.0 - v).collect();
        let field = ScalarField::from_values(RESOLUTION, values).unwrap();
        let inverse = ScalarField::from_values(RESOLUTION, inverted).unwrap();

        for index in 0..27 {
            let cell = lattice_coord(index, RESOLUTION);
            let config = compute_cube_index(&field.corner_values(cell), threshold);
            let flipped = compute_cube_index(&inverse.corner_values(cell), 1.0 - threshold);
            prop_assert_eq!(config ^ 0xFF, flipped);
        }

        let a = extract(&field, threshold).unwrap();
        let b = extract(&inverse, 1.0 - threshold).unwrap();
        prop_assert_eq!(a.vertices, b.vertices);
        prop_assert_eq!(a.triangles.is_empty(), b.triangles.is_empty());
    }

    /// A field entirely on one side of the threshold has no surface.
    #[test]
    fn uniform_side_has_no_surface(
        level in 0.1f32..0.9,
        above in any::<bool>(),
        grid_size in 1u32..6,
    ) {
        let value = if above { 0.95 } else { 0.05 };
        let config = MeshConfig::new(grid_size).with_surface_level(level);
        let result = generate(&config, &move |_: f32, _: f32, _: f32| value).unwrap();
        prop_assert!(!result.is_surface());
    }
}

/// Counts faces whose normal points toward and away from `center`.
fn facing_counts(mesh: &Mesh, center: Point3) -> (usize, usize) {
    let (mut inward, mut outward) = (0, 0);
    for [a, b, c] in mesh.triangle_positions() {
        let normal = (b - a).cross(c - a);
        if normal.length() < 1e-6 {
            continue;
        }
        let centroid = (a + b + c) / 3.0;
        if normal.dot(centroid - center) < 0.0 {
            inward += 1;
        } else {
            outward += 1;
        }
    }
    (inward, outward)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// All faces of a closed sphere wind the same way, toward the low samples.
    #[test]
    fn sphere_faces_wind_consistently(
        cx in 4.0f32..6.0,
        cy in 4.0f32..6.0,
        cz in 4.0f32..6.0,
        level in 0.25f32..0.4,
    ) {
        let center = Point3::new(cx, cy, cz);
        let config = MeshConfig::new(10).with_noise_scale(1.0).with_surface_level(level);

        let distance = move |x: f32, y: f32, z: f32| (Point3::new(x, y, z) - center).length() / 10.0;
        let mesh = generate(&config, &distance).unwrap().into_mesh().unwrap();
        let (inward, outward) = facing_counts(&mesh, center);
        prop_assert!(inward > 0);
        prop_assert_eq!(outward, 0, "{} faces inward, {} outward", inward, outward);

        // Flipping the field flips which side is low, so every face turns around
        let inverted = move |x: f32, y: f32, z: f32| 1.0 - distance(x, y, z);
        let config = config.with_surface_level(1.0 - level);
        let mesh = generate(&config, &inverted).unwrap().into_mesh().unwrap();
        let (inward, outward) = facing_counts(&mesh, center);
        prop_assert!(outward > 0);
        prop_assert_eq!(inward, 0, "{} faces inward, {} outward", inward, outward);
    }
}
