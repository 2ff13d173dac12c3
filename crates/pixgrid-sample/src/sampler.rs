use pixgrid_core::{LineSet, RgbImage, RgbImageView};

use crate::params::{SampleMode, SampleParamError, SampleParams};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Half-open cell rectangle `[x0, x1) × [y0, y1)` in source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub x0: usize,
    pub x1: usize,
    pub y0: usize,
    pub y1: usize,
}

impl CellRect {
    /// Integer centre, rounded down.
    #[inline]
    pub fn center(&self) -> (usize, usize) {
        ((self.x0 + self.x1) / 2, (self.y0 + self.y1) / 2)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }
}

/// Truncated per-channel mean over a window already clamped to the raster.
fn window_mean(src: &RgbImageView<'_>, x0: usize, x1: usize, y0: usize, y1: usize) -> Option<[u8; 3]> {
    let (sum, n) = src.rect_sum(x0, x1, y0, y1);
    (n > 0).then(|| sum.map(|s| (s / n) as u8))
}

/// Colour of a single cell.
pub fn sample_cell(src: &RgbImageView<'_>, cell: CellRect, params: &SampleParams) -> [u8; 3] {
    let (w, h) = (src.width, src.height);
    if w == 0 || h == 0 {
        return [0; 3];
    }
    let (cx, cy) = cell.center();
    let center = src.get(cx.min(w - 1), cy.min(h - 1));

    match params.mode {
        SampleMode::Center => center,
        SampleMode::Average => window_mean(
            src,
            cell.x0.min(w),
            cell.x1.min(w),
            cell.y0.min(h),
            cell.y1.min(h),
        )
        .unwrap_or(center),
        SampleMode::Weighted => {
            let ratio = params.weight_ratio as f64;
            let half_w = (cell.width() as f64 * ratio) as usize / 2;
            let half_h = (cell.height() as f64 * ratio) as usize / 2;
            window_mean(
                src,
                cx.saturating_sub(half_w).min(w),
                (cx + half_w).min(w),
                cy.saturating_sub(half_h).min(h),
                (cy + half_h).min(h),
            )
            .unwrap_or(center)
        }
    }
}

/// Sample every cell of the grid into a new raster of
/// `(x.cell_count() * pixel_size) × (y.cell_count() * pixel_size)`.
///
/// Fewer than two lines on either axis gives an empty raster.
/// Output raster size for `cells_x × cells_y` blocks of `pixel_size` pixels.
///
/// Fails when the RGB buffer would not fit in an allocation on this target.
pub fn output_size(
    cells_x: usize,
    cells_y: usize,
    pixel_size: u32,
) -> Result<(usize, usize), SampleParamError> {
    let ps = pixel_size as usize;
    let too_large = SampleParamError::OutputTooLarge {
        cells_x,
        cells_y,
        pixel_size,
    };
    let width = cells_x.checked_mul(ps).ok_or_else(|| too_large.clone())?;
    let height = cells_y.checked_mul(ps).ok_or_else(|| too_large.clone())?;
    match width.checked_mul(height).and_then(|n| n.checked_mul(3)) {
        Some(bytes) if bytes <= isize::MAX as usize => Ok((width, height)),
        _ => Err(too_large),
    }
}

#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(src, x_lines, y_lines, params),
        fields(cells_x = x_lines.cell_count(), cells_y = y_lines.cell_count(), mode = %params.mode)
    )
)]
pub fn sample_cells(
    src: &RgbImageView<'_>,
    x_lines: &LineSet,
    y_lines: &LineSet,
    params: &SampleParams,
) -> Result<RgbImage, SampleParamError> {
    params.validate()?;
    let ps = params.pixel_size as usize;
    let (width, height) = output_size(x_lines.cell_count(), y_lines.cell_count(), params.pixel_size)?;
    let mut out = RgbImage::new(width, height);

    for (i, (x0, x1)) in x_lines.cells().enumerate() {
        for (j, (y0, y1)) in y_lines.cells().enumerate() {
            let cell = CellRect {
                x0: x0 as usize,
                x1: x1 as usize,
                y0: y0 as usize,
                y1: y1 as usize,
            };
            let rgb = sample_cell(src, cell, params);
            out.fill_rect(i * ps, j * ps, ps, ps, rgb);
        }
    }

    log::debug!(
        "sampled {}x{} cells ({} mode) into {}x{}",
        x_lines.cell_count(),
        y_lines.cell_count(),
        params.mode,
        out.width,
        out.height
    );
    Ok(out)
}
