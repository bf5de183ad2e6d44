//! Assembled mesh buffers and derived data.

use isomesh_core::Point3;

use crate::config::Rgba;

/// Triangle mesh in grid-unit coordinates.
///
/// `vertices` and `colors` have the same length. Triangles index into both;
/// slots that no triangle references carry no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex index triples.
    pub triangles: Vec<[u32; 3]>,
    /// One color per vertex.
    pub colors: Vec<Rgba>,
}

/// Outcome of a regeneration.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshResult {
    /// At least one triangle was produced.
    Surface(Mesh),
    /// The threshold does not cross the field anywhere.
    NoSurface,
}

impl MeshResult {
    /// True for [`MeshResult::Surface`].
    pub fn is_surface(&self) -> bool {
        matches!(self, MeshResult::Surface(_))
    }

    /// Borrow the mesh, if any.
    pub fn mesh(&self) -> Option<&Mesh> {
        match self {
            MeshResult::Surface(mesh) => Some(mesh),
            MeshResult::NoSurface => None,
        }
    }

    /// Take the mesh, if any.
    pub fn into_mesh(self) -> Option<Mesh> {
        match self {
            MeshResult::Surface(mesh) => Some(mesh),
            MeshResult::NoSurface => None,
        }
    }
}

impl From<Mesh> for MeshResult {
    fn from(mesh: Mesh) -> Self {
        if mesh.triangles.is_empty() {
            MeshResult::NoSurface
        } else {
            MeshResult::Surface(mesh)
        }
    }
}

impl Mesh {
    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Triangles resolved to corner positions.
    pub fn triangle_positions(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.triangles.iter().map(move |tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }

    fn referenced(&self) -> Vec<bool> {
        let mut used = vec![false; self.vertices.len()];
        for tri in &self.triangles {
            for &i in tri {
                used[i as usize] = true;
            }
        }
        used
    }

    /// Compute summary statistics.
    pub fn stats(&self) -> MeshStats {
        let mut stats = MeshStats::from_triangles(self.triangle_positions());
        stats.vertex_count = self.referenced().iter().filter(|&&u| u).count();
        stats
    }

    /// Copy of the mesh holding only referenced vertices.
    ///
    /// Vertex order is preserved and triangles are remapped; triangle order is
    /// unchanged. `colors` must hold one entry per vertex.
    pub fn compact(&self) -> Mesh {
        debug_assert_eq!(
            self.colors.len(),
            self.vertices.len(),
            "mesh has {} colors for {} vertices",
            self.colors.len(),
            self.vertices.len()
        );
        let used = self.referenced();
        let mut remap = vec![u32::MAX; self.vertices.len()];
        let mut vertices = Vec::new();
        let mut colors = Vec::new();

        for (old, _) in used.iter().enumerate().filter(|&(_, &u)| u) {
            remap[old] = vertices.len() as u32;
            vertices.push(self.vertices[old]);
            colors.push(self.colors[old]);
        }

        let triangles = self
            .triangles
            .iter()
            .map(|tri| [remap[tri[0] as usize], remap[tri[1] as usize], remap[tri[2] as usize]])
            .collect();

        Mesh {
            vertices,
            triangles,
            colors,
        }
    }

    /// Area-weighted vertex normals.
    ///
    /// Unit length for referenced vertices, zero for unreferenced slots and
    /// for vertices whose adjacent triangles are all degenerate.
    pub fn vertex_normals(&self) -> Vec<Point3> {
        let mut normals = vec![Point3::splat(0.0); self.vertices.len()];

        for tri in &self.triangles {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| self.vertices[i as usize]);
            // Cross product length is twice the area, so this is area weighted.
            let face = (b - a).cross(c - a);
            for &i in tri {
                normals[i as usize] = normals[i as usize] + face;
            }
        }

        for n in &mut normals {
            *n = if n.length() > f32::EPSILON {
                n.normalize()
            } else {
                Point3::splat(0.0)
            };
        }

        normals
    }
}

/// Mesh statistics after extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Number of distinct vertices referenced by triangles.
    pub vertex_count: usize,
    /// Sum of triangle areas.
    pub surface_area: f32,
    /// Bounding box minimum.
    pub bbox_min: Point3,
    /// Bounding box maximum.
    pub bbox_max: Point3,
}

impl MeshStats {
    /// Compute statistics from triangle corner positions.
    ///
    /// `vertex_count` counts corners (`3 * triangle_count`); [`Mesh::stats`]
    /// replaces it with the number of distinct referenced vertices. With no
    /// triangles the bounding box collapses to the origin.
    pub fn from_triangles<I>(triangles: I) -> Self
    where
        I: IntoIterator<Item = [Point3; 3]>,
    {
        let mut triangle_count = 0;
        let mut surface_area = 0.0;
        let mut bbox_min = Point3::splat(f32::MAX);
        let mut bbox_max = Point3::splat(f32::MIN);

        for tri in triangles {
            triangle_count += 1;
            for v in tri {
                bbox_min = bbox_min.min(v);
                bbox_max = bbox_max.max(v);
            }

            let e1 = tri[1] - tri[0];
            let e2 = tri[2] - tri[0];
            surface_area += e1.cross(e2).length() * 0.5;
        }

        if triangle_count == 0 {
            bbox_min = Point3::splat(0.0);
            bbox_max = Point3::splat(0.0);
        }

        Self {
            triangle_count,
            vertex_count: triangle_count * 3,
            surface_area,
            bbox_min,
            bbox_max,
        }
    }
}
