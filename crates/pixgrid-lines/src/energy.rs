//! Gradient energy and its 8-bit heatmap.

use pixgrid_core::{convolve_separable, gaussian_kernel_1d, sobel, GrayImage, GrayImageView, ScalarField};

#[cfg(feature = "tracing")]
use tracing::instrument;

const HEATMAP_QUANTILE: f32 = 0.99;
const HEATMAP_EPS: f32 = 1e-6;

/// `|gx| + |gy|` of the normalized gray image, after an optional Gaussian
/// blur. Non-positive `sigma` skips the blur.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(gray), fields(width = gray.width, height = gray.height))
)]
pub fn energy_map(gray: &GrayImageView<'_>, sigma: f32) -> ScalarField {
    let mut g = ScalarField::from_gray_normalized(gray);
    if sigma > 0.0 {
        g = convolve_separable(&g, &gaussian_kernel_1d(sigma));
    }
    let (gx, gy) = sobel(&g);
    let data = gx
        .data
        .iter()
        .zip(&gy.data)
        .map(|(a, b)| a.abs() + b.abs())
        .collect();
    ScalarField {
        width: g.width,
        height: g.height,
        data,
    }
}

/// Scale so the 99th percentile maps to 255, clip, and truncate to `u8`.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(energy)))]
pub fn energy_heatmap(energy: &ScalarField) -> GrayImage {
    let scale = energy.quantile(HEATMAP_QUANTILE) + HEATMAP_EPS;
    let data = energy
        .data
        .iter()
        .map(|&v| ((v / scale).clamp(0.0, 1.0) * 255.0) as u8)
        .collect();
    GrayImage {
        width: energy.width,
        height: energy.height,
        data,
    }
}
