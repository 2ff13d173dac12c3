use std::path::PathBuf;

use pixgrid_lines::GridParamError;
use pixgrid_sample::SampleParamError;

/// Errors produced by the pipeline, configuration and I/O helpers.
#[derive(thiserror::Error, Debug)]
pub enum PixgridError {
    #[error("input image not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("invalid RGB buffer length (expected {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },

    #[error("cannot encode an empty {width}x{height} image")]
    EmptyImage { width: usize, height: usize },

    #[error(transparent)]
    Grid(#[from] GridParamError),

    #[error(transparent)]
    Sample(#[from] SampleParamError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
