/// Error types for the viewer
use thiserror::Error;

/// Errors raised while drawing or presenting frames
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error(transparent)]
    Core(#[from] tri3d_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
