use std::sync::Arc;

use gfx_maths::*;

use crate::texture::Texture;

/// The texture slots a [`PhongMaterial`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// `map_Bump`, sampled as a tangent space normal map
    Normal,
    /// `map_Ka`
    Ambient,
    /// `map_Kd`
    Diffuse,
    /// `map_Ks`
    Specular,
    /// `map_Ns`
    Shininess,
}

impl MapKind {
    pub const ALL: [MapKind; 5] = [
        MapKind::Normal,
        MapKind::Ambient,
        MapKind::Diffuse,
        MapKind::Specular,
        MapKind::Shininess,
    ];

    /// Maps a `.mtl` directive like `map_Kd` to its slot.
    pub fn from_directive(directive: &str) -> Option<Self> {
        match directive {
            "map_Bump" => Some(MapKind::Normal),
            "map_Ka" => Some(MapKind::Ambient),
            "map_Kd" => Some(MapKind::Diffuse),
            "map_Ks" => Some(MapKind::Specular),
            "map_Ns" => Some(MapKind::Shininess),
            _ => None,
        }
    }
}

/// A texture map referenced by a material.
///
/// The path is kept even if decoding failed; the map only counts as present
/// when a texture is attached.
#[derive(Debug, Clone)]
pub struct MaterialMap {
    /// Path as written in the material file
    pub path: String,
    pub texture: Option<Arc<Texture>>,
}

impl MaterialMap {
    pub fn is_present(&self) -> bool {
        self.texture.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct PhongMaterial {
    pub name: String,
    pub ka: Vec3,
    pub kd: Vec3,
    pub ks: Vec3,
    pub ns: f32,
    pub map_bump: Option<MaterialMap>,
    pub map_ka: Option<MaterialMap>,
    pub map_kd: Option<MaterialMap>,
    pub map_ks: Option<MaterialMap>,
    pub map_ns: Option<MaterialMap>,
}

impl PhongMaterial {
    pub const DEFAULT_NAME: &'static str = "Default";

    pub fn new(name: &str) -> Self {
        PhongMaterial {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn map(&self, kind: MapKind) -> Option<&MaterialMap> {
        match kind {
            MapKind::Normal => self.map_bump.as_ref(),
            MapKind::Ambient => self.map_ka.as_ref(),
            MapKind::Diffuse => self.map_kd.as_ref(),
            MapKind::Specular => self.map_ks.as_ref(),
            MapKind::Shininess => self.map_ns.as_ref(),
        }
    }

    pub fn set_map(&mut self, kind: MapKind, map: MaterialMap) {
        let slot = match kind {
            MapKind::Normal => &mut self.map_bump,
            MapKind::Ambient => &mut self.map_ka,
            MapKind::Diffuse => &mut self.map_kd,
            MapKind::Specular => &mut self.map_ks,
            MapKind::Shininess => &mut self.map_ns,
        };
        *slot = Some(map);
    }

    /// Whether the slot holds a successfully decoded texture
    pub fn has_map(&self, kind: MapKind) -> bool {
        self.map(kind).map_or(false, MaterialMap::is_present)
    }

    pub fn texture(&self, kind: MapKind) -> Option<&Arc<Texture>> {
        self.map(kind).and_then(|map| map.texture.as_ref())
    }
}

impl Default for PhongMaterial {
    fn default() -> Self {
        PhongMaterial {
            name: PhongMaterial::DEFAULT_NAME.into(),
            ka: Vec3::zero(),
            kd: Vec3::zero(),
            ks: Vec3::zero(),
            ns: 0.0,
            map_bump: None,
            map_ka: None,
            map_kd: None,
            map_ks: None,
            map_ns: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::texture::PixelFormat;

    fn texture() -> Arc<Texture> {
        Arc::new(Texture {
            path: "white.png".into(),
            width: 1,
            height: 1,
            format: PixelFormat::R8,
            pixels: vec![255],
        })
    }

    #[test]
    fn test_default_material() {
        let material = PhongMaterial::default();
        assert_eq!(material.name, "Default");
        assert_eq!(material.kd, Vec3::zero());
        assert!(MapKind::ALL.iter().all(|kind| !material.has_map(*kind)));
    }

    #[test]
    fn test_map_presence() {
        let mut material = PhongMaterial::new("brick");
        material.set_map(
            MapKind::Diffuse,
            MaterialMap {
                path: "brick.png".into(),
                texture: Some(texture()),
            },
        );
        material.set_map(
            MapKind::Specular,
            MaterialMap {
                path: "missing.png".into(),
                texture: None,
            },
        );

        assert!(material.has_map(MapKind::Diffuse));
        assert!(!material.has_map(MapKind::Specular));
        assert_eq!(material.map(MapKind::Specular).unwrap().path, "missing.png");
        assert!(material.map(MapKind::Normal).is_none());
    }

    #[test]
    fn test_clone_shares_texture() {
        let mut material = PhongMaterial::new("brick");
        material.set_map(
            MapKind::Ambient,
            MaterialMap {
                path: "white.png".into(),
                texture: Some(texture()),
            },
        );

        let copy = material.clone();
        let (a, b) = (
            material.texture(MapKind::Ambient).unwrap(),
            copy.texture(MapKind::Ambient).unwrap(),
        );
        assert!(Arc::ptr_eq(a, b));
        assert_eq!(Arc::strong_count(a), 2);

        drop(material);
        assert_eq!(Arc::strong_count(copy.texture(MapKind::Ambient).unwrap()), 1);
    }

    #[test]
    fn test_directive() {
        assert_eq!(MapKind::from_directive("map_Bump"), Some(MapKind::Normal));
        assert_eq!(MapKind::from_directive("map_Ns"), Some(MapKind::Shininess));
        assert_eq!(MapKind::from_directive("map_d"), None);
    }
}
