/// Per-run scene state: one rotating object and one camera
use nalgebra::Vector3;

use crate::projection::Camera;
use crate::transform::{Transform, Transform4};

/// How the model matrix is derived from the current angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelRotation {
    /// Rotate about Z
    ZAxis,
    /// Rotate about an arbitrary axis, used as given
    Axis(Vector3<f32>),
}

impl ModelRotation {
    pub fn matrix(&self, angle: f32) -> Transform4 {
        match self {
            ModelRotation::ZAxis => Transform::model_matrix(angle),
            ModelRotation::Axis(axis) => Transform::rotation_matrix(axis, angle),
        }
    }
}

/// Angle (degrees), camera and rotation mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneState {
    pub angle: f32,
    pub camera: Camera,
    pub rotation: ModelRotation,
}

/// Matrices for one frame, rebuilt from scratch every time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransforms {
    pub model: Transform4,
    pub view: Transform4,
    pub projection: Transform4,
}

impl SceneState {
    pub fn new(angle: f32, camera: Camera, rotation: ModelRotation) -> Self {
        Self {
            angle,
            camera,
            rotation,
        }
    }

    /// Rotate by a delta in degrees
    pub fn rotate(&mut self, delta: f32) {
        self.angle += delta;
    }

    pub fn transforms(&self) -> FrameTransforms {
        FrameTransforms {
            model: self.rotation.matrix(self.angle),
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{projection_matrix, view_matrix, CameraFrame, Perspective};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn camera() -> Camera {
        Camera::new(
            CameraFrame::axis_aligned(Point3::new(0.0, 0.0, 5.0)),
            Perspective::new(45.0, 1.0, 0.1, 50.0).unwrap(),
        )
    }

    #[test]
    fn test_rotate_accumulates() {
        let mut state = SceneState::new(0.0, camera(), ModelRotation::ZAxis);
        state.rotate(10.0);
        state.rotate(10.0);
        state.rotate(-5.0);
        assert!((state.angle - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_transforms_follow_state() {
        let mut state = SceneState::new(0.0, camera(), ModelRotation::ZAxis);
        let first = state.transforms();
        assert_relative_eq!(first.model, Transform4::identity(), epsilon = 1e-6);
        assert_eq!(first.view, view_matrix(&Point3::new(0.0, 0.0, 5.0)));
        assert_relative_eq!(first.projection, projection_matrix(45.0, 1.0, 0.1, 50.0));

        state.rotate(30.0);
        let second = state.transforms();
        assert_relative_eq!(second.model, Transform::model_matrix(30.0));
        assert_eq!(second.view, first.view);
        assert_eq!(second.projection, first.projection);
    }

    #[test]
    fn test_axis_rotation_mode() {
        let axis = Vector3::new(1.0, 0.0, 1.0);
        let state = SceneState::new(20.0, camera(), ModelRotation::Axis(axis));
        assert_relative_eq!(state.transforms().model, Transform::rotation_matrix(&axis, 20.0));
    }
}
