use pixgrid_core::{rgb_to_gray, GrayImage, RgbImage, RgbImageView};
use pixgrid_lines::{GridLineDetector, GridLineParams, GridLines};
use pixgrid_sample::{draw_grid_overlay, sample_cells, GridColor, SampleParams};
use serde::{Deserialize, Serialize};

use crate::PixgridError;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Full parameter set of one reconstruction run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PixgridParams {
    pub grid: GridLineParams,
    pub sample: SampleParams,
    /// Separator colour drawn between output blocks; `None` draws nothing.
    pub overlay: Option<GridColor>,
}

impl PixgridParams {
    pub fn validate(&self) -> Result<(), PixgridError> {
        self.grid.validate()?;
        self.sample.validate()?;
        Ok(())
    }

    #[inline]
    pub fn show_grid(&self) -> bool {
        self.overlay.is_some()
    }
}

/// Output of [`PixelGridPipeline::run`].
#[derive(Clone, Debug)]
pub struct PixgridResult {
    pub lines: GridLines,
    /// One `pixel_size` block per cell. Empty when no cell was found.
    pub image: RgbImage,
    /// 8-bit energy heatmap the grid lines were detected on.
    pub heatmap: GrayImage,
}

/// Gray conversion, grid detection, cell sampling and optional overlay.
#[derive(Clone, Debug)]
pub struct PixelGridPipeline {
    params: PixgridParams,
    detector: GridLineDetector,
}

impl PixelGridPipeline {
    pub fn new(params: PixgridParams) -> Result<Self, PixgridError> {
        params.validate()?;
        let detector = GridLineDetector::new(params.grid.clone())?;
        Ok(Self { params, detector })
    }

    #[inline]
    pub fn params(&self) -> &PixgridParams {
        &self.params
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, rgb), fields(width = rgb.width, height = rgb.height))
    )]
    pub fn run(&self, rgb: &RgbImageView<'_>) -> Result<PixgridResult, PixgridError> {
        log::info!("image size: {}x{}", rgb.width, rgb.height);
        let gray = rgb_to_gray(rgb);
        let (lines, heatmap) = self.detector.detect_with_heatmap(&gray.view());

        let sample = &self.params.sample;
        let mut image = sample_cells(rgb, &lines.x, &lines.y, sample)?;
        if let Some(color) = self.params.overlay {
            let (cells_x, cells_y) = lines.cell_counts();
            draw_grid_overlay(&mut image, cells_x, cells_y, sample.pixel_size, color);
        }
        log::info!(
            "output size: {}x{} ({} mode, pixel size {})",
            image.width,
            image.height,
            sample.mode,
            sample.pixel_size
        );

        Ok(PixgridResult {
            lines,
            image,
            heatmap,
        })
    }
}

/// Borrow a packed RGB buffer as a view, checking its length.
pub fn rgb_view_from_raw(
    width: usize,
    height: usize,
    data: &[u8],
) -> Result<RgbImageView<'_>, PixgridError> {
    let expected = width * height * 3;
    if data.len() != expected {
        return Err(PixgridError::InvalidBuffer {
            expected,
            got: data.len(),
        });
    }
    Ok(RgbImageView {
        width,
        height,
        data,
    })
}
