pub mod animation;
pub mod camera;
pub mod color;
pub mod constants;
pub mod font;
pub mod indicator;
pub mod mesh;
pub mod params;
#[cfg(feature = "gpu")]
pub mod render;
pub mod runtime;
pub mod scene;
pub mod texture;
pub mod uniforms;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static BACKGROUND_WGSL: &str = include_str!("../shaders/background.wgsl");

pub use animation::{AnimationRule, Animator, FrameParams, OrbitState};
pub use camera::{Camera, OrbitControls, Viewport};
pub use color::{ColorParseError, Rgb};
pub use font::{BlockFont, FontError};
pub use params::{ChangeSet, ParamError, ParamKey, ParamStore, ParamValue};
#[cfg(feature = "gpu")]
pub use render::{GpuState, RenderError};
pub use runtime::{FrameClock, SceneRuntime};
pub use scene::{EntityId, Scene, SceneConfig, SceneVariant};
pub use texture::{ImageSlot, TextureError, TextureImage};
