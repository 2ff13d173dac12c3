//! Axis projections of an intensity grid and their smoothing.

use pixgrid_core::{convolve_1d, IntensityGrid};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// One value per column (vertical lines).
    X,
    /// One value per row (horizontal lines).
    Y,
}

impl Axis {
    pub fn extent<G: IntensityGrid + ?Sized>(self, grid: &G) -> usize {
        match self {
            Axis::X => grid.width(),
            Axis::Y => grid.height(),
        }
    }
}

/// Sum the grid along the axis orthogonal to `axis`.
pub fn axis_profile<G: IntensityGrid + ?Sized>(grid: &G, axis: Axis) -> Vec<f32> {
    let (w, h) = (grid.width(), grid.height());
    let mut acc = vec![0.0f64; axis.extent(grid)];
    for y in 0..h {
        for x in 0..w {
            let v = grid.intensity(x, y) as f64;
            match axis {
                Axis::X => acc[x] += v,
                Axis::Y => acc[y] += v,
            }
        }
    }
    acc.into_iter().map(|v| v as f32).collect()
}

/// Centre row of an elliptical structuring element of width `size`,
/// normalized to unit sum. `None` when smoothing is disabled.
pub fn smoothing_kernel(size: usize) -> Option<Vec<f32>> {
    if size <= 1 {
        return None;
    }
    // Even widths are centred by padding one trailing zero tap.
    let taps = size | 1;
    let w = 1.0 / size as f32;
    Some((0..taps).map(|i| if i < size { w } else { 0.0 }).collect())
}

pub fn smooth_profile(profile: &[f32], size: usize) -> Vec<f32> {
    match smoothing_kernel(size) {
        Some(k) => convolve_1d(profile, &k),
        None => profile.to_vec(),
    }
}

/// Smoothed x and y profiles of one grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Profiles {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
}

impl Profiles {
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(grid)))]
    pub fn extract<G: IntensityGrid + ?Sized>(grid: &G, smooth: usize) -> Self {
        Self {
            x: smooth_profile(&axis_profile(grid, Axis::X), smooth),
            y: smooth_profile(&axis_profile(grid, Axis::Y), smooth),
        }
    }

    pub fn get(&self, axis: Axis) -> &[f32] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}
