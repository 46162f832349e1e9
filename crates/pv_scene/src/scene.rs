use std::path::{Path, PathBuf};

use gfx_maths::*;
use log::{debug, error, info};
use pv_asset::{ImageLoader, TextureLoader};
use pv_format::mesh::MeshData;

use crate::config::ViewerConfig;
use crate::error::SceneError;
use crate::light::{LightManager, Movable};
use crate::skybox::Skybox;

/// How the renderer rasterizes polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Points,
    Lines,
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Input the host application forwards to the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ContinueRotation,
    PauseRotation,
    RotateLeft,
    RotateRight,
    MovePointLight(Direction),
    MoveSpotLight(Direction),
    SetRenderMode(RenderMode),
    LoadMesh(PathBuf),
    UnloadMesh,
    LoadSkybox(PathBuf),
    UnloadSkybox,
}

/// Continuous rotation of the model and the skybox around the y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub enabled: bool,
    pub angle_deg: f32,
    /// `1.0` or `-1.0`
    pub direction: f32,
}

impl Default for RotationState {
    fn default() -> Self {
        RotationState {
            enabled: true,
            angle_deg: 0.0,
            direction: 1.0,
        }
    }
}

impl RotationState {
    pub fn advance(&mut self, step_deg: f32) {
        if self.enabled {
            self.angle_deg += self.direction * step_deg;
        }
    }
}

pub struct Scene {
    config: ViewerConfig,
    loader: Box<dyn TextureLoader>,
    mesh: Option<MeshData>,
    lights: LightManager,
    skybox: Option<Skybox>,
    rotation: RotationState,
    render_mode: RenderMode,
}

impl Scene {
    pub fn new(config: ViewerConfig) -> Self {
        Scene::with_loader(config, Box::new(ImageLoader))
    }

    pub fn with_loader(config: ViewerConfig, loader: Box<dyn TextureLoader>) -> Self {
        let lights = config.light_manager();
        Scene {
            config,
            loader,
            mesh: None,
            lights,
            skybox: None,
            rotation: RotationState::default(),
            render_mode: RenderMode::Fill,
        }
    }

    /// Applies `command`. Returns `false` if it had no effect in the current state.
    pub fn handle(&mut self, command: Command) -> bool {
        debug!("Handling {:?}", command);
        match command {
            Command::ContinueRotation => self.rotation.enabled = true,
            Command::PauseRotation => self.rotation.enabled = false,
            Command::RotateLeft => self.rotation.direction = -1.0,
            Command::RotateRight => self.rotation.direction = 1.0,
            Command::SetRenderMode(mode) => self.render_mode = mode,
            Command::MovePointLight(direction) => {
                let speed = self.config.animation.light_move_speed;
                return match self.lights_mut().and_then(|l| l.point_light_mut()) {
                    Some(light) => {
                        move_light(light, direction, speed);
                        true
                    }
                    None => false,
                };
            }
            Command::MoveSpotLight(direction) => {
                let speed = self.config.animation.light_move_speed;
                return match self.lights_mut().and_then(|l| l.spot_light_mut()) {
                    Some(light) => {
                        move_light(light, direction, speed);
                        true
                    }
                    None => false,
                };
            }
            Command::LoadMesh(path) => {
                if self.mesh.is_some() {
                    return false;
                }
                return match self.load_mesh(&path) {
                    Ok(()) => true,
                    Err(err) => {
                        error!("{}: {}", path.display(), err);
                        false
                    }
                };
            }
            Command::UnloadMesh => {
                if self.mesh.take().is_none() {
                    return false;
                }
                self.skybox = None;
                info!("The model was deleted");
            }
            Command::LoadSkybox(path) => {
                if self.mesh.is_none() || self.skybox.is_some() {
                    return false;
                }
                return match self.load_skybox(&path) {
                    Ok(()) => true,
                    Err(err) => {
                        error!("{}", err);
                        false
                    }
                };
            }
            Command::UnloadSkybox => {
                if self.skybox.take().is_none() {
                    return false;
                }
                info!("The skybox texture was deleted");
            }
        }
        true
    }

    fn load_mesh(&mut self, path: &Path) -> Result<(), SceneError> {
        let meta = pv_asset::parse_meta(path)?;
        let mesh = pv_asset::load_with(path, &meta, self.loader.as_ref())?;
        info!("\n{}", mesh);

        self.mesh = Some(mesh);
        self.lights = self.config.light_manager();
        self.rotation = RotationState::default();
        Ok(())
    }

    fn load_skybox(&mut self, path: &Path) -> Result<(), SceneError> {
        let settings = self.config.skybox;
        let mut skybox = Skybox::new(
            path,
            settings.slices,
            settings.stacks,
            settings.radius,
            self.loader.as_ref(),
        )?;
        skybox.set_rotation(self.rotation.angle_deg);
        self.skybox = Some(skybox);
        Ok(())
    }

    /// Advances the rotation by one frame.
    pub fn tick(&mut self) {
        self.rotation.advance(self.config.animation.rotation_step);
        if let Some(skybox) = &mut self.skybox {
            skybox.set_rotation(self.rotation.angle_deg);
        }
    }

    /// Model matrix: uniform scale followed by the rotation around y.
    pub fn world_matrix(&self) -> Mat4 {
        let scale = self.config.animation.model_scale;
        Mat4::local_to_world(
            Vec3::zero(),
            Quaternion::axis_angle(Vec3::new(0.0, 1.0, 0.0), self.rotation.angle_deg.to_radians()),
            Vec3::new(scale, scale, scale),
        )
    }

    pub fn mesh(&self) -> Option<&MeshData> {
        self.mesh.as_ref()
    }

    /// Lights only take part while a model is loaded.
    pub fn lights(&self) -> Option<&LightManager> {
        self.mesh.as_ref().map(|_| &self.lights)
    }

    fn lights_mut(&mut self) -> Option<&mut LightManager> {
        match self.mesh {
            Some(_) => Some(&mut self.lights),
            None => None,
        }
    }

    pub fn skybox(&self) -> Option<&Skybox> {
        self.skybox.as_ref()
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}

fn move_light<L: Movable>(light: &mut L, direction: Direction, speed: f32) {
    match direction {
        Direction::Left => light.move_left(speed),
        Direction::Right => light.move_right(speed),
        Direction::Up => light.move_up(speed),
        Direction::Down => light.move_down(speed),
    }
}
