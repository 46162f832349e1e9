use std::collections::HashMap;
use std::fmt;

use gfx_maths::*;
use pv_format::mesh::Vertex;

/// The attribute streams of an obj file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Texcoord,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Position => "position",
            Attribute::Texcoord => "texcoord",
            Attribute::Normal => "normal",
        })
    }
}

/// The 0-based attribute indices a face corner references. `None` marks an
/// attribute the face does not provide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VertexKey {
    pub position: Option<u32>,
    pub texcoord: Option<u32>,
    pub normal: Option<u32>,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeldError {
    #[error("Face corner does not reference a position")]
    MissingPosition,
    #[error("Face references {kind} {index}, but only {len} exist")]
    IndexOutOfRange {
        kind: Attribute,
        index: u32,
        len: usize,
    },
}

/// Collapses face corners with the same [`VertexKey`] into a single packed vertex.
///
/// One welder is shared by all submeshes of a mesh, so identical corners in
/// different submeshes reference the same vertex.
pub(crate) struct VertexWelder<'a> {
    positions: &'a [Vec3],
    texcoords: &'a [Vec2],
    normals: &'a [Vec3],
    lookup: HashMap<VertexKey, u32>,
    vertices: Vec<Vertex>,
}

impl<'a> VertexWelder<'a> {
    pub(crate) fn new(positions: &'a [Vec3], texcoords: &'a [Vec2], normals: &'a [Vec3]) -> Self {
        VertexWelder {
            positions,
            texcoords,
            normals,
            lookup: HashMap::new(),
            vertices: Vec::new(),
        }
    }

    /// Returns the packed index for `key`, creating the vertex on first use.
    pub(crate) fn weld(&mut self, key: VertexKey) -> Result<u32, WeldError> {
        if let Some(index) = self.lookup.get(&key) {
            return Ok(*index);
        }

        let vertex = self.resolve(key)?;
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        self.lookup.insert(key, index);
        Ok(index)
    }

    fn resolve(&self, key: VertexKey) -> Result<Vertex, WeldError> {
        let position = key.position.ok_or(WeldError::MissingPosition)?;
        let mut vertex = Vertex {
            position: fetch(Attribute::Position, self.positions, position)?,
            ..Vertex::default()
        };
        if let Some(texcoord) = key.texcoord {
            vertex.uv = fetch(Attribute::Texcoord, self.texcoords, texcoord)?;
        }
        if let Some(normal) = key.normal {
            vertex.normal = fetch(Attribute::Normal, self.normals, normal)?;
        }
        Ok(vertex)
    }

    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }

    pub(crate) fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}

fn fetch<T: Copy>(kind: Attribute, data: &[T], index: u32) -> Result<T, WeldError> {
    data.get(index as usize)
        .copied()
        .ok_or(WeldError::IndexOutOfRange {
            kind,
            index,
            len: data.len(),
        })
}

#[cfg(test)]
mod test {
    use super::*;

    fn key(position: u32, texcoord: Option<u32>, normal: Option<u32>) -> VertexKey {
        VertexKey {
            position: Some(position),
            texcoord,
            normal,
        }
    }

    #[test]
    fn test_weld_deduplicates() -> Result<(), WeldError> {
        let positions = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)];
        let texcoords = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)];
        let mut welder = VertexWelder::new(&positions, &texcoords, &[]);

        assert_eq!(welder.weld(key(0, Some(0), None))?, 0);
        assert_eq!(welder.weld(key(1, Some(1), None))?, 1);
        assert_eq!(welder.weld(key(0, Some(0), None))?, 0);
        // same position, different texcoord is a different vertex
        assert_eq!(welder.weld(key(0, Some(1), None))?, 2);
        assert_eq!(welder.len(), 3);
        Ok(())
    }

    #[test]
    fn test_identity_is_the_index_triple() -> Result<(), WeldError> {
        // two positions with identical coordinates stay separate vertices
        let positions = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 3.0)];
        let mut welder = VertexWelder::new(&positions, &[], &[]);

        assert_eq!(welder.weld(key(0, None, None))?, 0);
        assert_eq!(welder.weld(key(1, None, None))?, 1);
        Ok(())
    }

    #[test]
    fn test_defaults_for_absent_attributes() -> Result<(), WeldError> {
        let positions = [Vec3::new(1.0, 2.0, 3.0)];
        let normals = [Vec3::new(0.0, 0.0, 1.0)];
        let mut welder = VertexWelder::new(&positions, &[], &normals);
        welder.weld(key(0, None, None))?;
        welder.weld(key(0, None, Some(0)))?;

        let vertices = welder.into_vertices();
        assert_eq!(vertices[0].position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(vertices[0].uv, Vec2::new(0.0, 0.0));
        assert_eq!(vertices[0].normal, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(vertices[1].normal, Vec3::new(0.0, 0.0, 1.0));
        Ok(())
    }

    #[test]
    fn test_weld_errors() {
        let positions = [Vec3::zero()];
        let mut welder = VertexWelder::new(&positions, &[], &[]);

        assert_eq!(
            welder.weld(VertexKey::default()),
            Err(WeldError::MissingPosition)
        );
        assert_eq!(
            welder.weld(key(0, Some(0), None)),
            Err(WeldError::IndexOutOfRange {
                kind: Attribute::Texcoord,
                index: 0,
                len: 0
            })
        );
        assert_eq!(
            welder.weld(key(4, None, None)),
            Err(WeldError::IndexOutOfRange {
                kind: Attribute::Position,
                index: 4,
                len: 1
            })
        );
        assert_eq!(welder.len(), 0);
    }
}
