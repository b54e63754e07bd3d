/// Viewer configuration
use std::path::PathBuf;
use std::time::Duration;

use nalgebra::{Point3, Vector3};
use tri3d_core::{Camera, CameraFrame, Perspective};

/// Environment variable overriding the default single-shot output file
pub const OUTPUT_ENV: &str = "TRI3D_OUTPUT";

/// Fixed settings for a run
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub width: usize,
    pub height: usize,
    pub eye: Point3<f32>,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Axis for the arbitrary-axis interactive mode
    pub axis: Vector3<f32>,
    /// Degrees added or removed per key press
    pub angle_step: f32,
    pub key_timeout: Duration,
    pub output: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 700,
            height: 700,
            eye: Point3::new(0.0, 0.0, 5.0),
            fov: 45.0,
            aspect: 1.0,
            near: 0.1,
            far: 50.0,
            axis: Vector3::new(1.0, 0.0, 1.0),
            angle_step: 10.0,
            key_timeout: Duration::from_millis(10),
            output: PathBuf::from("output.png"),
        }
    }
}

impl ViewerConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(output) = std::env::var_os(OUTPUT_ENV).filter(|v| !v.is_empty()) {
            config.output = PathBuf::from(output);
        }
        config
    }

    /// Validated camera for this configuration
    pub fn camera(&self) -> tri3d_core::Result<Camera> {
        let perspective = Perspective::new(self.fov, self.aspect, self.near, self.far)?;
        Ok(Camera::new(CameraFrame::axis_aligned(self.eye), perspective))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!((config.width, config.height), (700, 700));
        assert_eq!(config.eye, Point3::new(0.0, 0.0, 5.0));
        assert_eq!(config.output, PathBuf::from("output.png"));
        assert!(config.camera().is_ok());
    }

    #[test]
    fn test_bad_perspective_is_rejected() {
        let config = ViewerConfig {
            near: 60.0,
            ..ViewerConfig::default()
        };
        assert!(matches!(
            config.camera(),
            Err(tri3d_core::Error::InvalidProjection(_))
        ));
    }
}
