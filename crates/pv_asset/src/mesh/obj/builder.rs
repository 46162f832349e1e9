use gfx_maths::*;

use log::{debug, warn};
use pv_format::material::PhongMaterial;
use pv_format::mesh::{BoundingBox, MeshData, MeshStats, Submesh, Vertex};

use super::face::{self, FaceError, StreamLengths};
use super::meta::ObjMeta;
use super::parser::ObjError;
use super::welder::{VertexKey, VertexWelder};
use crate::mesh::mtl::MaterialLibrary;

/// The directives that can start a new submesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    Material,
    Group,
    Face,
}

#[derive(Debug)]
pub(crate) struct ObjSubmesh {
    pub(crate) material: PhongMaterial,
    /// Triangle corners, three per triangle
    pub(crate) corners: Vec<VertexKey>,
}

#[derive(Debug, Default)]
pub(crate) struct ObjMeshBuilder {
    pub(crate) meta: ObjMeta,
    pub(crate) positions: Vec<Vec3>,
    pub(crate) texcoords: Vec<Vec2>,
    pub(crate) normals: Vec<Vec3>,
    pub(crate) submeshes: Vec<ObjSubmesh>,
    pub(crate) materials: Option<MaterialLibrary>,
    pub(crate) last_boundary: Option<Boundary>,
    pub(crate) triangles: usize,
}

impl ObjMeshBuilder {
    pub(crate) fn new(meta: ObjMeta) -> Self {
        ObjMeshBuilder {
            meta,
            ..Default::default()
        }
    }

    pub(crate) fn add_materials(&mut self, library: MaterialLibrary) {
        match &mut self.materials {
            Some(materials) => materials.merge(library),
            None => self.materials = Some(library),
        }
    }

    /// Starts a new submesh for `usemtl`. Unknown names get the default material.
    pub(crate) fn use_material(&mut self, name: &str) {
        let material = match self.materials.as_ref().map(|library| library.get(name)) {
            Some(Some(material)) => material.clone(),
            Some(None) => {
                warn!("Unknown material \"{}\", using the default material", name);
                PhongMaterial::default()
            }
            None => PhongMaterial::default(),
        };

        self.open_submesh(material);
        self.last_boundary = Some(Boundary::Material);
    }

    pub(crate) fn set_group(&mut self, name: &str) {
        debug!("Group: \"{}\"", name);
        self.last_boundary = Some(Boundary::Group);
    }

    fn open_submesh(&mut self, material: PhongMaterial) {
        debug!(
            "Submesh {} with material: {}",
            self.submeshes.len(),
            material.name
        );
        self.submeshes.push(ObjSubmesh {
            material,
            corners: Vec::new(),
        });
    }

    pub(crate) fn push_position(&mut self, position: [f32; 3]) {
        self.positions.push(position.into());
    }

    pub(crate) fn push_uv(&mut self, uv: [f32; 2]) {
        self.texcoords.push(uv.into());
    }

    pub(crate) fn push_normal(&mut self, normal: [f32; 3]) {
        self.normals.push(normal.into());
    }

    pub(crate) fn lengths(&self) -> StreamLengths {
        StreamLengths {
            positions: self.positions.len(),
            texcoords: self.texcoords.len(),
            normals: self.normals.len(),
        }
    }

    pub(crate) fn push_face(&mut self, tokens: &[&str]) -> Result<(), FaceError> {
        let triangles = face::parse_face(tokens, self.lengths())?;

        // a face directly after `g` opens a submesh that keeps the active material
        let inherited = match self.last_boundary {
            Some(Boundary::Group) => self.submeshes.last().map(|s| s.material.clone()),
            _ => None,
        };
        if let Some(material) = inherited {
            self.open_submesh(material);
        } else if self.submeshes.is_empty() {
            self.open_submesh(PhongMaterial::default());
        }
        self.last_boundary = Some(Boundary::Face);
        self.triangles += triangles.len();

        if let Some(submesh) = self.submeshes.last_mut() {
            submesh.corners.extend(triangles.into_iter().flatten());
        }
        Ok(())
    }

    /// Welds all submeshes into one vertex pool and computes the bounds.
    pub(crate) fn build_mesh(self) -> Result<MeshData, ObjError> {
        let mut welder = VertexWelder::new(&self.positions, &self.texcoords, &self.normals);

        let mut submeshes: Vec<Submesh> = Vec::with_capacity(self.submeshes.len());
        for obj_submesh in self.submeshes {
            if obj_submesh.corners.is_empty() {
                debug!("Dropping submesh without faces: {}", obj_submesh.material.name);
                continue;
            }

            let mut submesh = Submesh::new(obj_submesh.material);
            submesh.indices = obj_submesh
                .corners
                .into_iter()
                .map(|key| welder.weld(key))
                .collect::<Result<_, _>>()?;
            submeshes.push(submesh);
        }
        debug!("Welded {} vertices", welder.len());

        let mut vertices = welder.into_vertices();
        let mut bounds = BoundingBox::from_points(vertices.iter().map(|v| &v.position))
            .ok_or(ObjError::EmptyMesh)?;
        if self.meta.normalize {
            bounds = normalize(&mut vertices, bounds);
        }

        let stats = MeshStats {
            positions: self.positions.len(),
            texcoords: self.texcoords.len(),
            normals: self.normals.len(),
            triangles: self.triangles,
        };
        Ok(MeshData::new(vertices, submeshes, bounds, stats))
    }
}

/// Moves the mesh to the origin and scales it so its longest axis spans 1.0.
pub(crate) fn normalize(vertices: &mut [Vertex], bounds: BoundingBox) -> BoundingBox {
    let center = bounds.center;
    let mut size = bounds.max_extent();
    if size <= 0.0 {
        warn!("Mesh has no extent, only centering it");
        size = 1.0;
    }

    for vertex in vertices.iter_mut() {
        vertex.position = (vertex.position - center) / size;
    }

    BoundingBox {
        center: Vec3::zero(),
        extent: bounds.extent / size,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn builder_with_square() -> ObjMeshBuilder {
        let mut builder = ObjMeshBuilder::new(ObjMeta { normalize: false });
        builder.push_position([0.0, 0.0, 0.0]);
        builder.push_position([1.0, 0.0, 0.0]);
        builder.push_position([1.0, 1.0, 0.0]);
        builder.push_position([0.0, 1.0, 0.0]);
        builder
    }

    fn positions(mesh: &MeshData) -> Vec<Vec3> {
        mesh.vertices().iter().map(|v| v.position).collect()
    }

    #[test]
    fn test_face_without_submesh_opens_default() -> Result<(), FaceError> {
        let mut builder = builder_with_square();
        builder.push_face(&["1", "2", "3", "4"])?;

        assert_eq!(builder.submeshes.len(), 1);
        assert_eq!(builder.submeshes[0].material.name, "Default");
        assert_eq!(builder.submeshes[0].corners.len(), 6);
        assert_eq!(builder.triangles, 2);
        Ok(())
    }

    #[test]
    fn test_group_boundaries() -> Result<(), FaceError> {
        let mut builder = builder_with_square();
        builder.push_face(&["1", "2", "3"])?;
        // consecutive groups only open a single submesh
        builder.set_group("a");
        builder.set_group("b");
        builder.push_face(&["1", "3", "4"])?;
        builder.push_face(&["1", "2", "4"])?;
        // a group without faces opens nothing
        builder.set_group("c");
        builder.use_material("unknown");
        builder.push_face(&["2", "3", "4"])?;

        let sizes: Vec<usize> = builder.submeshes.iter().map(|s| s.corners.len()).collect();
        assert_eq!(sizes, vec![3, 6, 3]);
        Ok(())
    }

    #[test]
    fn test_group_keeps_active_material() -> Result<(), FaceError> {
        let mut library = MaterialLibrary::default();
        library.insert(PhongMaterial::new("red"));

        let mut builder = builder_with_square();
        builder.add_materials(library);
        builder.use_material("red");
        builder.set_group("body");
        builder.push_face(&["1", "2", "3"])?;

        assert_eq!(builder.submeshes.len(), 2);
        assert_eq!(builder.submeshes[1].material.name, "red");
        Ok(())
    }

    #[test]
    fn test_build_welds_across_submeshes() -> Result<(), ObjError> {
        let mut builder = builder_with_square();
        builder.use_material("a");
        builder.push_face(&["1", "2", "3"]).unwrap();
        builder.use_material("b");
        builder.push_face(&["1", "3", "4"]).unwrap();

        let mesh = builder.build_mesh()?;
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.submeshes()[0].indices, vec![0, 1, 2]);
        assert_eq!(mesh.submeshes()[1].indices, vec![0, 2, 3]);
        assert_eq!(mesh.num_triangles(), 2);
        Ok(())
    }

    #[test]
    fn test_empty_submeshes_are_dropped() -> Result<(), ObjError> {
        let mut builder = builder_with_square();
        builder.use_material("a");
        builder.use_material("b");
        builder.push_face(&["1", "2", "3"]).unwrap();

        let mesh = builder.build_mesh()?;
        assert_eq!(mesh.num_submeshes(), 1);
        Ok(())
    }

    #[test]
    fn test_empty_mesh() {
        let builder = ObjMeshBuilder::new(ObjMeta::default());
        assert!(matches!(builder.build_mesh(), Err(ObjError::EmptyMesh)));
    }

    #[test]
    fn test_forward_references_are_welded() -> Result<(), ObjError> {
        let mut builder = ObjMeshBuilder::new(ObjMeta { normalize: false });
        builder.push_face(&["1", "2", "3"]).unwrap();
        builder.push_position([0.0, 0.0, 0.0]);
        builder.push_position([1.0, 0.0, 0.0]);
        builder.push_position([0.0, 1.0, 0.0]);

        let mesh = builder.build_mesh()?;
        assert_eq!(mesh.num_vertices(), 3);
        Ok(())
    }

    #[test]
    fn test_normalize() -> Result<(), ObjError> {
        let mut builder = ObjMeshBuilder::new(ObjMeta { normalize: true });
        builder.push_position([2.0, 2.0, 2.0]);
        builder.push_position([6.0, 2.0, 2.0]);
        builder.push_position([6.0, 4.0, 3.0]);
        builder.push_face(&["1", "2", "3"]).unwrap();

        let mesh = builder.build_mesh()?;
        assert_eq!(mesh.center(), Vec3::zero());
        assert_eq!(mesh.extent(), Vec3::new(1.0, 0.5, 0.25));
        assert_eq!(
            positions(&mesh),
            vec![
                Vec3::new(-0.5, -0.25, -0.125),
                Vec3::new(0.5, -0.25, -0.125),
                Vec3::new(0.5, 0.25, 0.125),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut vertices: Vec<Vertex> = [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.5]]
            .iter()
            .map(|p| Vertex {
                position: (*p).into(),
                ..Vertex::default()
            })
            .collect();

        let bounds = BoundingBox::from_points(vertices.iter().map(|v| &v.position)).unwrap();
        let first = normalize(&mut vertices, bounds);
        let snapshot: Vec<Vec3> = vertices.iter().map(|v| v.position).collect();

        let bounds = BoundingBox::from_points(vertices.iter().map(|v| &v.position)).unwrap();
        assert_eq!(bounds, first);
        let second = normalize(&mut vertices, bounds);

        assert_eq!(second, first);
        assert_eq!(second.center, Vec3::zero());
        assert_eq!(second.max_extent(), 1.0);
        assert_eq!(
            vertices.iter().map(|v| v.position).collect::<Vec<_>>(),
            snapshot
        );
    }

    #[test]
    fn test_normalize_degenerate() {
        let mut vertices = vec![Vertex {
            position: Vec3::new(3.0, 3.0, 3.0),
            ..Vertex::default()
        }];
        let bounds = BoundingBox::from_points(vertices.iter().map(|v| &v.position)).unwrap();
        let bounds = normalize(&mut vertices, bounds);

        assert_eq!(vertices[0].position, Vec3::zero());
        assert_eq!(bounds.extent, Vec3::zero());
    }
}
