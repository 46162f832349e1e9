use std::path::Path;

use gfx_maths::*;
use log::info;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::light::{DirectionalLight, LightManager, PointLight, SpotLight};

/// Settings of the viewer. Every field is optional in the toml file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub lights: LightsConfig,
    pub skybox: SkyboxConfig,
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightsConfig {
    pub ambient: [f32; 3],
    pub point: PointLightConfig,
    pub spot: SpotLightConfig,
    pub directional: DirectionalLightConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointLightConfig {
    pub position: [f32; 3],
    pub intensity: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpotLightConfig {
    pub position: [f32; 3],
    pub intensity: [f32; 3],
    pub direction: [f32; 3],
    pub cutoff_start_deg: f32,
    pub total_width_deg: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DirectionalLightConfig {
    pub direction: [f32; 3],
    pub radiance: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkyboxConfig {
    pub slices: u32,
    pub stacks: u32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Model rotation per frame in degrees
    pub rotation_step: f32,
    pub light_move_speed: f32,
    pub model_scale: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 600,
            height: 600,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            position: [0.0, 1.0, 5.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fovy: 30.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Default for LightsConfig {
    fn default() -> Self {
        LightsConfig {
            ambient: [0.2, 0.2, 0.2],
            point: PointLightConfig::default(),
            spot: SpotLightConfig::default(),
            directional: DirectionalLightConfig::default(),
        }
    }
}

impl Default for PointLightConfig {
    fn default() -> Self {
        PointLightConfig {
            position: [0.8, 0.0, 0.8],
            intensity: [0.5, 0.1, 0.1],
        }
    }
}

impl Default for SpotLightConfig {
    fn default() -> Self {
        SpotLightConfig {
            position: [0.0, 1.0, 0.0],
            intensity: [0.25, 0.25, 0.1],
            direction: [0.0, -1.0, 0.0],
            cutoff_start_deg: 30.0,
            total_width_deg: 45.0,
        }
    }
}

impl Default for DirectionalLightConfig {
    fn default() -> Self {
        DirectionalLightConfig {
            direction: [0.0, 0.0, -1.0],
            radiance: [0.6, 0.6, 0.6],
        }
    }
}

impl Default for SkyboxConfig {
    fn default() -> Self {
        SkyboxConfig {
            slices: 36,
            stacks: 18,
            radius: 50.0,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            rotation_step: 0.005,
            light_move_speed: 0.2,
            model_scale: 1.5,
        }
    }
}

impl ViewerConfig {
    /// Reads the config from `path`, falling back to the defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            info!("No viewer config at {}, using defaults", path.display());
            return Ok(ViewerConfig::default());
        }

        let data = std::fs::read(path)?;
        let config: Self = toml::from_slice(&data)?;
        Ok(config)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.window.width as f32 / self.window.height.max(1) as f32
    }

    /// Creates the ambient term and the point, spot and directional light.
    pub fn light_manager(&self) -> LightManager {
        let lights = &self.lights;
        let mut manager = LightManager {
            ambient: lights.ambient.into(),
            ..LightManager::default()
        };

        manager.add_light(PointLight::new(
            lights.point.position.into(),
            lights.point.intensity.into(),
        ));
        manager.add_light(SpotLight {
            position: lights.spot.position.into(),
            intensity: lights.spot.intensity.into(),
            direction: lights.spot.direction.into(),
            cutoff_start_deg: lights.spot.cutoff_start_deg,
            total_width_deg: lights.spot.total_width_deg,
        });
        manager.add_light(DirectionalLight::new(
            lights.directional.direction.into(),
            lights.directional.radiance.into(),
        ));
        manager
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera.position.into()
    }
}
