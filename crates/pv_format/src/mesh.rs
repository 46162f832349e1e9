use std::fmt;

use gfx_maths::*;

use crate::material::PhongMaterial;

/// A packed vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    /// Normal used when a face does not reference one
    pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];
}

impl Default for Vertex {
    fn default() -> Self {
        Vertex {
            position: Vec3::zero(),
            normal: Vertex::DEFAULT_NORMAL.into(),
            uv: Vec2::new(0.0, 0.0),
        }
    }
}

/// A run of triangles drawn with a single material.
#[derive(Debug, Clone, Default)]
pub struct Submesh {
    pub material: PhongMaterial,
    /// Indices into [`MeshData::vertices`], three per triangle
    pub indices: Vec<u32>,
}

impl Submesh {
    pub fn new(material: PhongMaterial) -> Self {
        Submesh {
            material,
            indices: Vec::new(),
        }
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Axis aligned bounding box stored as center and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub center: Vec3,
    pub extent: Vec3,
}

impl BoundingBox {
    /// Returns `None` if `points` is empty.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let (mut min, mut max) = (first, first);

        for p in points {
            min = Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }

        Some(BoundingBox {
            center: (max + min) / 2.0,
            extent: max - min,
        })
    }

    /// Size of the longest axis
    pub fn max_extent(&self) -> f32 {
        self.extent.x.max(self.extent.y).max(self.extent.z)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox {
            center: Vec3::zero(),
            extent: Vec3::zero(),
        }
    }
}

/// Counts of the raw attribute data the mesh was built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub positions: usize,
    pub texcoords: usize,
    pub normals: usize,
    pub triangles: usize,
}

/// A fully welded mesh. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    vertices: Vec<Vertex>,
    submeshes: Vec<Submesh>,
    bounds: BoundingBox,
    stats: MeshStats,
}

impl MeshData {
    pub fn new(
        vertices: Vec<Vertex>,
        submeshes: Vec<Submesh>,
        bounds: BoundingBox,
        stats: MeshStats,
    ) -> Self {
        MeshData {
            vertices,
            submeshes,
            bounds,
            stats,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn submeshes(&self) -> &[Submesh] {
        &self.submeshes
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn center(&self) -> Vec3 {
        self.bounds.center
    }

    pub fn extent(&self) -> Vec3 {
        self.bounds.extent
    }

    pub fn stats(&self) -> MeshStats {
        self.stats
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_submeshes(&self) -> usize {
        self.submeshes.len()
    }

    pub fn num_positions(&self) -> usize {
        self.stats.positions
    }

    pub fn num_texcoords(&self) -> usize {
        self.stats.texcoords
    }

    pub fn num_normals(&self) -> usize {
        self.stats.normals
    }

    pub fn num_triangles(&self) -> usize {
        self.stats.triangles
    }
}

impl fmt::Display for MeshData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Positions: {}", self.stats.positions)?;
        writeln!(f, "# Texcoords: {}", self.stats.texcoords)?;
        writeln!(f, "# Normals: {}", self.stats.normals)?;
        writeln!(f, "# Vertices: {}", self.vertices.len())?;
        writeln!(f, "# Triangles: {}", self.stats.triangles)?;
        writeln!(f)?;

        writeln!(f, "Total {} submeshes loaded", self.submeshes.len())?;
        for (i, submesh) in self.submeshes.iter().enumerate() {
            writeln!(f, "Submesh {} with material: {}", i, submesh.material.name)?;
            writeln!(f, "Num. triangles in the submesh: {}", submesh.num_triangles())?;
        }
        writeln!(f)?;

        let (c, e) = (self.bounds.center, self.bounds.extent);
        writeln!(f, "Model center: {}, {}, {}", c.x, c.y, c.z)?;
        write!(f, "Model extent: {} x {} x {}", e.x, e.y, e.z)
    }
}
