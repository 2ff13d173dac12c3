//! Dense `f32` fields and the scalar-access trait shared by all rasters.

use crate::image::{luma_f32, GrayImage, GrayImageView, RgbImageView};

/// Row-major `f32` field, e.g. normalized intensity or gradient energy.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl ScalarField {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Gray values scaled into `[0, 1]`.
    pub fn from_gray_normalized(src: &GrayImageView<'_>) -> Self {
        Self {
            width: src.width,
            height: src.height,
            data: src.data.iter().map(|&v| v as f32 / 255.0).collect(),
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// `(min, max)` over the field, `None` when empty.
    pub fn range(&self) -> Option<(f32, f32)> {
        let mut it = self.data.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Quantile `q` in `[0, 1]` with linear interpolation between order
    /// statistics. Returns 0 for an empty field.
    pub fn quantile(&self, q: f32) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let mut sorted = self.data.clone();
        sorted.sort_by(f32::total_cmp);
        let pos = q.clamp(0.0, 1.0) as f64 * (sorted.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        let frac = pos - lo as f64;
        (sorted[lo] as f64 + (sorted[hi] as f64 - sorted[lo] as f64) * frac) as f32
    }
}

/// Anything that yields one scalar intensity per pixel.
///
/// Multi-channel rasters reduce to luma.
pub trait IntensityGrid {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn intensity(&self, x: usize, y: usize) -> f32;
}

impl IntensityGrid for ScalarField {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn intensity(&self, x: usize, y: usize) -> f32 {
        self.get(x, y)
    }
}

impl IntensityGrid for GrayImageView<'_> {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn intensity(&self, x: usize, y: usize) -> f32 {
        self.get(x, y) as f32
    }
}

impl IntensityGrid for GrayImage {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn intensity(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x] as f32
    }
}

impl IntensityGrid for RgbImageView<'_> {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn intensity(&self, x: usize, y: usize) -> f32 {
        luma_f32(self.get(x, y))
    }
}
