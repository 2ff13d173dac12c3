//! Core types and utilities for pixel-art grid reconstruction.
//!
//! This crate is intentionally small. It holds the raster views the rest of
//! the workspace operates on, the scalar field used for gradient energy, the
//! separable filters shared by the detector, and the [`LineSet`] invariant
//! type. It does *not* depend on any image decoding crate.

mod field;
mod filters;
mod image;
mod line_set;
mod logger;

pub use field::{IntensityGrid, ScalarField};
pub use filters::{convolve_1d, convolve_separable, gaussian_kernel_1d, reflect101, sobel};
pub use image::{rgb_to_gray, GrayImage, GrayImageView, RgbImage, RgbImageView};
pub use line_set::{LineSet, LineSetError};

#[cfg(feature = "tracing")]
pub use logger::{init_tracing, TraceFormat};

pub use logger::init_with_level;
