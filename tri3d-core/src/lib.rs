/// tri3d core library - matrix builders and scene state
///
/// Stateless pieces of the pipeline: model, view and projection matrices,
/// arbitrary-axis rotation, the demo geometry and the per-run scene state.

pub mod error;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use error::{Error, Result};
pub use geometry::{Mesh, Triangle, Vertex};
pub use projection::{projection_matrix, view_matrix, Camera, CameraFrame, Perspective};
pub use scene::{FrameTransforms, ModelRotation, SceneState};
pub use transform::{Transform, Transform4};
