/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::{Error, Result};
use crate::transform::Transform4;

/// Translate world space so that `eye` lands on the origin.
///
/// The camera basis is not rotated: this assumes a camera looking down -Z
/// with +Y up. Use [`CameraFrame`] for any other orientation.
pub fn view_matrix(eye: &Point3<f32>) -> Transform4 {
    Matrix4::new_translation(&-eye.coords) * Matrix4::identity()
}

/// Perspective projection for a symmetric frustum.
///
/// `fov` is the vertical field of view in degrees. Near and far are positive
/// distances along the -Z view direction. The near plane maps to z/w = +1
/// and the far plane to z/w = -1.
///
/// Parameters are not checked; see [`Perspective::new`] for the validated
/// form.
pub fn projection_matrix(fov: f32, aspect: f32, near: f32, far: f32) -> Transform4 {
    let t = near * (fov.to_radians() / 2.0).tan();
    let b = -t;
    let r = t * aspect;
    let l = -r;

    // Depth along the view direction.
    let n = -near;
    let f = -far;

    #[rustfmt::skip]
    let ortho_scale = Matrix4::new(
        2.0 / (r - l), 0.0,           0.0,           0.0,
        0.0,           2.0 / (t - b), 0.0,           0.0,
        0.0,           0.0,           2.0 / (n - f), 0.0,
        0.0,           0.0,           0.0,           1.0,
    );

    #[rustfmt::skip]
    let ortho_translate = Matrix4::new(
        1.0, 0.0, 0.0, -(r + l) / 2.0,
        0.0, 1.0, 0.0, -(t + b) / 2.0,
        0.0, 0.0, 1.0, -(n + f) / 2.0,
        0.0, 0.0, 0.0, 1.0,
    );

    #[rustfmt::skip]
    let persp_to_ortho = Matrix4::new(
        n,   0.0, 0.0,   0.0,
        0.0, n,   0.0,   0.0,
        0.0, 0.0, n + f, -n * f,
        0.0, 0.0, 1.0,   0.0,
    );

    ortho_scale * ortho_translate * persp_to_ortho
}

/// Eye position plus an explicit viewing direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub eye: Point3<f32>,
    pub forward: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl CameraFrame {
    pub fn new(eye: Point3<f32>, forward: Vector3<f32>, up: Vector3<f32>) -> Self {
        Self { eye, forward, up }
    }

    /// Frame looking down -Z with +Y up
    pub fn axis_aligned(eye: Point3<f32>) -> Self {
        Self::new(eye, -Vector3::z(), Vector3::y())
    }

    /// True when the frame looks down -Z with +Y up
    pub fn is_axis_aligned(&self) -> bool {
        let aligned = |v: &Vector3<f32>, expected: Vector3<f32>| {
            v.try_normalize(f32::EPSILON)
                .map_or(false, |unit| (unit - expected).norm() < 1e-6)
        };
        aligned(&self.forward, -Vector3::z()) && aligned(&self.up, Vector3::y())
    }

    /// Create the view matrix (camera transformation).
    ///
    /// An axis-aligned frame only needs the eye translation.
    pub fn view_matrix(&self) -> Transform4 {
        if self.is_axis_aligned() {
            return view_matrix(&self.eye);
        }
        let target = self.eye + self.forward;
        Matrix4::look_at_rh(&self.eye, &target, &self.up)
    }
}

/// Validated perspective parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Perspective {
    /// Checks `0 < fov < 180`, `aspect > 0` and `0 < near < far`
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Result<Self> {
        if !(fov > 0.0 && fov < 180.0) {
            return Err(Error::InvalidProjection(format!(
                "field of view must be in (0, 180) degrees, got {fov}"
            )));
        }
        if !(aspect > 0.0 && aspect.is_finite()) {
            return Err(Error::InvalidProjection(format!(
                "aspect ratio must be positive, got {aspect}"
            )));
        }
        if !(near > 0.0) {
            return Err(Error::InvalidProjection(format!(
                "near plane must be positive, got {near}"
            )));
        }
        if !(near < far && far.is_finite()) {
            return Err(Error::InvalidProjection(format!(
                "near plane ({near}) must be closer than far plane ({far})"
            )));
        }
        Ok(Self { fov, aspect, near, far })
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// Create the projection matrix
    pub fn matrix(&self) -> Transform4 {
        projection_matrix(self.fov, self.aspect, self.near, self.far)
    }
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub frame: CameraFrame,
    pub perspective: Perspective,
}

impl Camera {
    pub fn new(frame: CameraFrame, perspective: Perspective) -> Self {
        Self { frame, perspective }
    }

    pub fn view_matrix(&self) -> Transform4 {
        self.frame.view_matrix()
    }

    pub fn projection_matrix(&self) -> Transform4 {
        self.perspective.matrix()
    }
}
