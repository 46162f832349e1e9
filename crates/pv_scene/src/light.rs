use gfx_maths::*;

/// Distance a light moves per unit of speed.
const MOVE_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub intensity: Vec3,
    pub direction: Vec3,
    /// Angle from the axis where the falloff starts
    pub cutoff_start_deg: f32,
    /// Angle from the axis where the light ends
    pub total_width_deg: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    direction: Vec3,
    pub radiance: Vec3,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: Vec3) -> Self {
        PointLight {
            position,
            intensity,
        }
    }
}

impl DirectionalLight {
    /// `direction` is normalized.
    pub fn new(direction: Vec3, radiance: Vec3) -> Self {
        DirectionalLight {
            direction: normalized(direction),
            radiance,
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl From<PointLight> for Light {
    fn from(value: PointLight) -> Self {
        Light::Point(value)
    }
}

impl From<SpotLight> for Light {
    fn from(value: SpotLight) -> Self {
        Light::Spot(value)
    }
}

impl From<DirectionalLight> for Light {
    fn from(value: DirectionalLight) -> Self {
        Light::Directional(value)
    }
}

/// Lights with a position that can be moved in the view plane.
pub trait Movable {
    fn position(&self) -> Vec3;
    fn position_mut(&mut self) -> &mut Vec3;
    fn intensity(&self) -> Vec3;

    fn move_left(&mut self, speed: f32) {
        *self.position_mut() += Vec3::new(-MOVE_STEP * speed, 0.0, 0.0);
    }

    fn move_right(&mut self, speed: f32) {
        *self.position_mut() += Vec3::new(MOVE_STEP * speed, 0.0, 0.0);
    }

    fn move_up(&mut self, speed: f32) {
        *self.position_mut() += Vec3::new(0.0, MOVE_STEP * speed, 0.0);
    }

    fn move_down(&mut self, speed: f32) {
        *self.position_mut() += Vec3::new(0.0, -MOVE_STEP * speed, 0.0);
    }

    /// Color the light marker is drawn with.
    fn visualization_color(&self) -> Vec3 {
        normalized(self.intensity())
    }
}

impl Movable for PointLight {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn position_mut(&mut self) -> &mut Vec3 {
        &mut self.position
    }

    fn intensity(&self) -> Vec3 {
        self.intensity
    }
}

impl Movable for SpotLight {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn position_mut(&mut self) -> &mut Vec3 {
        &mut self.position
    }

    fn intensity(&self) -> Vec3 {
        self.intensity
    }
}

pub struct LightManager {
    pub ambient: Vec3,
    pub directional_lights: Vec<DirectionalLight>,
    pub point_lights: Vec<PointLight>,
    pub spot_lights: Vec<SpotLight>,
}

impl Default for LightManager {
    fn default() -> Self {
        LightManager {
            ambient: Vec3::zero(),
            directional_lights: Vec::new(),
            point_lights: Vec::new(),
            spot_lights: Vec::new(),
        }
    }
}

impl LightManager {
    pub fn add_light<T: Into<Light>>(&mut self, l: T) {
        use Light::*;
        match l.into() {
            Directional(dl) => {
                self.directional_lights.push(dl);
            }
            Point(pl) => {
                self.point_lights.push(pl);
            }
            Spot(sl) => {
                self.spot_lights.push(sl);
            }
        }
    }

    pub fn point_light_mut(&mut self) -> Option<&mut PointLight> {
        self.point_lights.first_mut()
    }

    pub fn spot_light_mut(&mut self) -> Option<&mut SpotLight> {
        self.spot_lights.first_mut()
    }

    pub fn num_lights(&self) -> usize {
        self.directional_lights.len() + self.point_lights.len() + self.spot_lights.len()
    }
}

/// Unit vector in the direction of `v`, zero stays zero.
pub(crate) fn normalized(v: Vec3) -> Vec3 {
    if v.sqr_magnitude() > 0.0 {
        v.normalized()
    } else {
        v
    }
}
