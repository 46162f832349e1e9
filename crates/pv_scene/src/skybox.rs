use std::f32::consts::PI;
use std::path::Path;
use std::sync::Arc;

use gfx_maths::*;
use log::{info, warn};
use pv_asset::TextureLoader;
use pv_format::texture::Texture;

use crate::error::SceneError;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexPT {
    pub position: Vec3,
    pub texcoord: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct SphereMesh {
    pub vertices: Vec<VertexPT>,
    pub indices: Vec<u32>,
}

pub const MIN_SLICES: u32 = 3;
pub const MIN_STACKS: u32 = 2;
pub const MAX_SEGMENTS: u32 = 1024;

/// Builds a UV sphere seen from the inside. The seam column is duplicated so
/// the texcoords span the full `[0, 1]` range in both directions.
///
/// `slices` is clamped to `MIN_SLICES..=MAX_SEGMENTS` and `stacks` to
/// `MIN_STACKS..=MAX_SEGMENTS`.
pub fn create_sphere(slices: u32, stacks: u32, radius: f32) -> SphereMesh {
    let (requested_slices, requested_stacks) = (slices, stacks);
    let slices = slices.clamp(MIN_SLICES, MAX_SEGMENTS);
    let stacks = stacks.clamp(MIN_STACKS, MAX_SEGMENTS);
    if (slices, stacks) != (requested_slices, requested_stacks) {
        warn!(
            "Sphere with {} slices and {} stacks is out of range, using {} and {}",
            requested_slices, requested_stacks, slices, stacks
        );
    }

    let mut vertices = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
    let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);

    for stack in 0..=stacks {
        let v = stack as f32 / stacks as f32;
        let theta = v * PI;
        for slice in 0..=slices {
            let u = slice as f32 / slices as f32;
            let phi = u * 2.0 * PI;
            vertices.push(VertexPT {
                position: Vec3::new(
                    radius * theta.sin() * phi.cos(),
                    radius * theta.cos(),
                    radius * theta.sin() * phi.sin(),
                ),
                texcoord: Vec2::new(u, 1.0 - v),
            });
        }
    }

    for stack in 0..stacks {
        for slice in 0..slices {
            let current = stack * (slices + 1) + slice;
            let next = current + slices + 1;

            indices.extend_from_slice(&[current, next, current + 1]);
            indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    SphereMesh { vertices, indices }
}

/// Environment sphere textured with an equirectangular panorama.
#[derive(Debug)]
pub struct Skybox {
    sphere: SphereMesh,
    panorama: Arc<Texture>,
    rotation_deg: f32,
}

impl Skybox {
    pub fn new(
        panorama: &Path,
        slices: u32,
        stacks: u32,
        radius: f32,
        loader: &dyn TextureLoader,
    ) -> Result<Self, SceneError> {
        let texture = loader
            .load(panorama)
            .map_err(|source| SceneError::Panorama {
                path: panorama.to_owned(),
                source,
            })?;
        info!(
            "Loaded skybox panorama {} ({}x{})",
            panorama.display(),
            texture.width,
            texture.height
        );

        Ok(Skybox {
            sphere: create_sphere(slices, stacks, radius),
            panorama: Arc::new(texture),
            rotation_deg: 0.0,
        })
    }

    pub fn sphere(&self) -> &SphereMesh {
        &self.sphere
    }

    pub fn panorama(&self) -> &Arc<Texture> {
        &self.panorama
    }

    /// Rotation around the y axis in degrees
    pub fn rotation(&self) -> f32 {
        self.rotation_deg
    }

    pub fn set_rotation(&mut self, rotation_deg: f32) {
        self.rotation_deg = rotation_deg;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sphere_counts() {
        for (slices, stacks) in [(36, 18), (4, 2), (3, 2)] {
            let sphere = create_sphere(slices, stacks, 1.0);
            assert_eq!(
                sphere.vertices.len() as u32,
                (slices + 1) * (stacks + 1)
            );
            assert_eq!(sphere.indices.len() as u32, slices * stacks * 6);
            assert!(sphere
                .indices
                .iter()
                .all(|i| (*i as usize) < sphere.vertices.len()));
        }
    }

    #[test]
    fn test_sphere_radius_and_texcoords() {
        let radius = 50.0;
        let sphere = create_sphere(36, 18, radius);

        for vertex in &sphere.vertices {
            assert!((vertex.position.magnitude() - radius).abs() < 1e-3);

            let uv = vertex.texcoord;
            assert!((0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y));
        }

        let first = sphere.vertices[0];
        let last = sphere.vertices[sphere.vertices.len() - 1];
        assert_eq!(first.texcoord, Vec2::new(0.0, 1.0));
        assert_eq!(last.texcoord, Vec2::new(1.0, 0.0));
        assert_eq!(first.position.y, radius);
    }

    #[test]
    fn test_sphere_segments_are_clamped() {
        let sphere = create_sphere(0, 0, 1.0);
        assert_eq!(sphere.vertices.len(), 4 * 3);
        assert_eq!(sphere.indices.len(), 3 * 2 * 6);
        assert!(sphere
            .vertices
            .iter()
            .all(|v| v.position.magnitude().is_finite() && v.texcoord.x.is_finite()));

        let sphere = create_sphere(u32::MAX, u32::MAX, 1.0);
        let segments = (MAX_SEGMENTS + 1) as usize;
        assert_eq!(sphere.vertices.len(), segments * segments);
        assert_eq!(
            sphere.indices.len(),
            (MAX_SEGMENTS * MAX_SEGMENTS * 6) as usize
        );
        assert!(sphere
            .indices
            .iter()
            .all(|i| (*i as usize) < sphere.vertices.len()));
    }
}
