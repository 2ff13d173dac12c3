use pixgrid_core::{GrayImage, GrayImageView, LineSet};
use serde::{Deserialize, Serialize};

use crate::energy::{energy_heatmap, energy_map};
use crate::interpolate::complete_lines;
use crate::params::{GridLineParams, GridParamError};
use crate::peaks::detect_peaks;
use crate::profile::Profiles;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Detected and completed grid lines of one image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLines {
    pub width: u32,
    pub height: u32,
    /// `[min, max]` of the raw gradient energy, `None` for an empty image.
    pub energy_range: Option<[f32; 2]>,
    /// Peaks found in the x profile (vertical lines).
    pub detected_x: LineSet,
    /// Peaks found in the y profile (horizontal lines).
    pub detected_y: LineSet,
    /// `detected_x` completed by interpolation.
    pub x: LineSet,
    /// `detected_y` completed by interpolation.
    pub y: LineSet,
}

impl GridLines {
    /// `(columns, rows)` of cells.
    pub fn cell_counts(&self) -> (usize, usize) {
        (self.x.cell_count(), self.y.cell_count())
    }

    pub fn cell_count(&self) -> usize {
        let (cx, cy) = self.cell_counts();
        cx * cy
    }
}

/// Gradient-energy grid line detector.
#[derive(Clone, Debug)]
pub struct GridLineDetector {
    params: GridLineParams,
}

impl GridLineDetector {
    pub fn new(params: GridLineParams) -> Result<Self, GridParamError> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &GridLineParams {
        &self.params
    }

    pub fn detect(&self, gray: &GrayImageView<'_>) -> GridLines {
        self.detect_with_heatmap(gray).0
    }

    /// Like [`Self::detect`], also returning the 8-bit energy heatmap the
    /// profiles were taken from.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, gray), fields(width = gray.width, height = gray.height))
    )]
    pub fn detect_with_heatmap(&self, gray: &GrayImageView<'_>) -> (GridLines, GrayImage) {
        let energy = energy_map(gray, self.params.sigma);
        let energy_range = energy.range().map(|(lo, hi)| [lo, hi]);
        if let Some([lo, hi]) = energy_range {
            log::info!("energy range: [{lo:.4}, {hi:.4}]");
        }

        let heatmap = energy_heatmap(&energy);
        let lines = self.lines_from_heatmap(&heatmap, energy_range);
        (lines, heatmap)
    }

    fn lines_from_heatmap(&self, heatmap: &GrayImage, energy_range: Option<[f32; 2]>) -> GridLines {
        let profiles = Profiles::extract(heatmap, self.params.smooth);
        let peak_params = self.params.peak_params();

        let detected_x = detect_peaks(&profiles.x, &peak_params);
        let detected_y = detect_peaks(&profiles.y, &peak_params);
        log::info!(
            "detected {} x lines, {} y lines",
            detected_x.len(),
            detected_y.len()
        );

        let width = heatmap.width as u32;
        let height = heatmap.height as u32;
        let x = complete_lines(&detected_x, width);
        let y = complete_lines(&detected_y, height);
        log::info!(
            "with interpolation: {} x lines, {} y lines, {} cells",
            x.len(),
            y.len(),
            x.cell_count() * y.cell_count()
        );

        GridLines {
            width,
            height,
            energy_range,
            detected_x,
            detected_y,
            x,
            y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_lines(size: usize, every: usize) -> GrayImage {
        let mut img = GrayImage::new(size, size);
        for y in 0..size {
            for x in (every..size).step_by(every) {
                img.data[y * size + x] = 255;
            }
        }
        img
    }

    #[test]
    fn rejects_invalid_params() {
        let params = GridLineParams {
            sigma: f32::NAN,
            ..GridLineParams::default()
        };
        assert!(GridLineDetector::new(params).is_err());
    }

    #[test]
    fn black_image_yields_no_lines() {
        let gray = GrayImage::new(32, 32);
        let det = GridLineDetector::new(GridLineParams::default()).unwrap();
        let lines = det.detect(&gray.view());
        assert!(lines.detected_x.is_empty() && lines.detected_y.is_empty());
        assert!(lines.x.is_empty() && lines.y.is_empty());
        assert_eq!(lines.cell_count(), 0);
        assert_eq!(lines.energy_range, Some([0.0, 0.0]));
    }

    #[test]
    fn finds_one_pixel_lines_every_eight_pixels() {
        let gray = vertical_lines(64, 8);
        // smooth = 5 on purpose: a blurred 1 px line gives twin edge
        // responses on either side, and a five-wide window merges them into
        // one peak on the line itself.
        let params = GridLineParams {
            smooth: 5,
            ..GridLineParams::default()
        };
        let det = GridLineDetector::new(params).unwrap();
        let (lines, heatmap) = det.detect_with_heatmap(&gray.view());

        assert_eq!(lines.detected_x.as_slice(), &[8, 16, 24, 32, 40, 48, 56]);
        // Margins of exactly one gap are not split further.
        assert_eq!(lines.x, lines.detected_x);
        // No horizontal structure.
        assert!(lines.detected_y.is_empty());
        assert_eq!((heatmap.width, heatmap.height), (64, 64));
    }

    #[test]
    fn default_smoothing_locks_onto_the_leading_shoulder() {
        // With a three-wide window each line leaves candidates at -2, 0 and
        // +2; the first one seeds the spacing fold, so the whole grid sits
        // two pixels early and the trailing margin gains a line.
        let gray = vertical_lines(64, 8);
        let det = GridLineDetector::new(GridLineParams::default()).unwrap();
        let lines = det.detect(&gray.view());

        assert_eq!(lines.detected_x.as_slice(), &[6, 14, 22, 30, 38, 46, 54]);
        assert_eq!(lines.x.as_slice(), &[6, 14, 22, 30, 38, 46, 54, 59]);
        assert!(lines.detected_y.is_empty());
    }

    #[test]
    fn serializes_to_plain_arrays() {
        let gray = GrayImage::new(4, 4);
        let det = GridLineDetector::new(GridLineParams::default()).unwrap();
        let json = serde_json::to_value(det.detect(&gray.view())).unwrap();
        assert_eq!(json["x"], serde_json::json!([]));
        assert_eq!(json["width"], serde_json::json!(4));
    }
}
