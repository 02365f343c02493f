pub mod cluster;
pub mod constants;
pub mod damper;
pub mod dynamic;
pub mod particle;
pub mod scene;
pub mod stage;

pub use cluster::*;
pub use constants::*;
pub use damper::*;
pub use dynamic::*;
pub use particle::*;
pub use scene::*;
pub use stage::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
