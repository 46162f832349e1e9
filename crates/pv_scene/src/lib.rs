pub mod config;
pub mod error;
pub mod light;
pub mod scene;
pub mod skybox;

pub use config::ViewerConfig;
pub use error::{ConfigError, SceneError};
pub use light::{DirectionalLight, Light, LightManager, Movable, PointLight, SpotLight};
pub use scene::{Command, Direction, RenderMode, RotationState, Scene};
pub use skybox::{create_sphere, Skybox, SphereMesh, VertexPT};
