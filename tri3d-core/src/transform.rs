/// Model and rotation matrices
use nalgebra::{Matrix3, Matrix4, Vector3};

use crate::error::{Error, Result};

/// Homogeneous 4x4 transform acting on (x, y, z, 1) column vectors
pub type Transform4 = Matrix4<f32>;

/// Transform builder for the model stage
pub struct Transform;

impl Transform {
    /// Rotation about the Z axis by `angle` degrees
    pub fn model_matrix(angle: f32) -> Transform4 {
        let (s, c) = angle.to_radians().sin_cos();

        #[rustfmt::skip]
        let rotation = Matrix4::new(
            c,  -s,  0.0, 0.0,
            s,   c,  0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * Matrix4::identity()
    }

    /// Rotation about `axis` by `angle` degrees using Rodrigues' formula.
    ///
    /// The axis is used as given. A unit axis yields a rigid rotation; any
    /// other length scales and shears the result.
    pub fn rotation_matrix(axis: &Vector3<f32>, angle: f32) -> Transform4 {
        let (s, c) = angle.to_radians().sin_cos();

        #[rustfmt::skip]
        let cross = Matrix3::new(
            0.0,    -axis.z,  axis.y,
            axis.z,  0.0,    -axis.x,
            -axis.y, axis.x,  0.0,
        );

        let r = Matrix3::identity() * c + axis * axis.transpose() * (1.0 - c) + cross * s;
        r.to_homogeneous()
    }

    /// Like [`Transform::rotation_matrix`] but normalizes the axis first
    pub fn try_unit_rotation_matrix(axis: &Vector3<f32>, angle: f32) -> Result<Transform4> {
        let unit = axis.try_normalize(f32::EPSILON).ok_or(Error::DegenerateAxis)?;
        Ok(Self::rotation_matrix(&unit, angle))
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Transform4,
        view: &Transform4,
        projection: &Transform4,
    ) -> Transform4 {
        projection * view * model
    }
}
