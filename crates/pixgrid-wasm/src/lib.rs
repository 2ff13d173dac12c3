//! WebAssembly bindings for the pixgrid pipeline.
//!
//! Browsers hand over canvas `ImageData` buffers (RGBA, row-major). Alpha is
//! ignored on input and set opaque on output.

use pixgrid::{PixelGridPipeline, PixgridError, PixgridParams};
use pixgrid_core::{GrayImage, RgbImage};
use pixgrid_lines::GridLineParams;
use wasm_bindgen::prelude::*;

/// Sampled output raster plus the grid it was taken from.
#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct SampledImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
    x_lines: Vec<u32>,
    y_lines: Vec<u32>,
}

#[wasm_bindgen]
impl SampledImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA pixels, ready for `new ImageData(...)`. Empty for a zero-cell grid.
    #[wasm_bindgen(getter)]
    pub fn data(&self) -> Vec<u8> {
        self.data.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn x_lines(&self) -> Vec<u32> {
        self.x_lines.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn y_lines(&self) -> Vec<u32> {
        self.y_lines.clone()
    }
}

fn rgba_to_rgb(rgba: &[u8], width: usize, height: usize) -> Result<RgbImage, PixgridError> {
    let expected = width * height * 4;
    if rgba.len() != expected {
        return Err(PixgridError::InvalidBuffer {
            expected,
            got: rgba.len(),
        });
    }
    let mut img = RgbImage::new(width, height);
    for (dst, src) in img.data.chunks_exact_mut(3).zip(rgba.chunks_exact(4)) {
        dst.copy_from_slice(&src[..3]);
    }
    Ok(img)
}

fn rgb_to_rgba(img: &RgbImage) -> Vec<u8> {
    img.data
        .chunks_exact(3)
        .flat_map(|px| [px[0], px[1], px[2], 255])
        .collect()
}

fn gray_to_rgba(img: &GrayImage) -> Vec<u8> {
    img.data.iter().flat_map(|&v| [v, v, v, 255]).collect()
}

fn sample_rgba(
    rgba: &[u8],
    width: usize,
    height: usize,
    params: PixgridParams,
) -> Result<SampledImage, PixgridError> {
    let rgb = rgba_to_rgb(rgba, width, height)?;
    let result = PixelGridPipeline::new(params)?.run(&rgb.view())?;
    Ok(SampledImage {
        width: result.image.width as u32,
        height: result.image.height as u32,
        data: rgb_to_rgba(&result.image),
        x_lines: result.lines.x.into_vec(),
        y_lines: result.lines.y.into_vec(),
    })
}

fn heatmap_rgba(rgba: &[u8], width: usize, height: usize, sigma: f32) -> Result<Vec<u8>, PixgridError> {
    GridLineParams {
        sigma,
        ..GridLineParams::default()
    }
    .validate()?;
    let rgb = rgba_to_rgb(rgba, width, height)?;
    let gray = pixgrid_core::rgb_to_gray(&rgb.view());
    let energy = pixgrid_lines::energy_map(&gray.view(), sigma);
    Ok(gray_to_rgba(&pixgrid_lines::energy_heatmap(&energy)))
}

/// Run the full pipeline on an RGBA buffer.
///
/// `options` is a plain object shaped like `PixgridParams`
/// (`{ grid: {...}, sample: {...}, overlay: "red" }`); missing fields take
/// their defaults and `undefined` / `null` selects all defaults.
#[wasm_bindgen]
pub fn sample_grid(
    rgba: &[u8],
    width: usize,
    height: usize,
    options: JsValue,
) -> Result<SampledImage, JsError> {
    let params: PixgridParams = if options.is_undefined() || options.is_null() {
        PixgridParams::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };
    Ok(sample_rgba(rgba, width, height, params)?)
}

/// 8-bit gradient-energy heatmap of an RGBA buffer, returned as RGBA.
#[wasm_bindgen]
pub fn energy_heatmap(rgba: &[u8], width: usize, height: usize, sigma: f32) -> Result<Vec<u8>, JsError> {
    Ok(heatmap_rgba(rgba, width, height, sigma)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Red/blue checkerboard of 8 px blocks with 1 px black separators.
    fn rgba_with_lines(size: usize) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(size * size * 4);
        for y in 0..size {
            for x in 0..size {
                let rgb = if (x % 8 == 0 && x > 0) || (y % 8 == 0 && y > 0) {
                    [0, 0, 0]
                } else if (x / 8 + y / 8) % 2 == 0 {
                    [230, 40, 40]
                } else {
                    [20, 20, 200]
                };
                rgba.extend_from_slice(&rgb);
                rgba.push(128);
            }
        }
        rgba
    }

    #[test]
    fn rejects_short_buffers() {
        let err = sample_rgba(&[0; 10], 2, 2, PixgridParams::default()).unwrap_err();
        assert!(matches!(
            err,
            PixgridError::InvalidBuffer {
                expected: 16,
                got: 10
            }
        ));
    }

    #[test]
    fn alpha_is_dropped_and_restored_opaque() {
        let rgb = rgba_to_rgb(&[1, 2, 3, 0, 4, 5, 6, 9], 2, 1).unwrap();
        assert_eq!(rgb.data, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(rgb_to_rgba(&rgb), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn samples_outlined_grid() {
        let out = sample_rgba(&rgba_with_lines(64), 64, 64, PixgridParams::default()).unwrap();
        assert_eq!(out.x_lines, vec![8, 16, 24, 32, 40, 48, 56]);
        assert_eq!(out.y_lines, out.x_lines);
        assert_eq!((out.width, out.height), (6, 6));
        assert_eq!(out.data.len(), 6 * 6 * 4);
        assert_eq!(&out.data[..4], &[230, 40, 40, 255]);
        assert_eq!(&out.data[4..8], &[20, 20, 200, 255]);
    }

    #[test]
    fn blank_input_gives_empty_output() {
        let out = sample_rgba(&vec![0; 16 * 16 * 4], 16, 16, PixgridParams::default()).unwrap();
        assert_eq!((out.width, out.height), (0, 0));
        assert!(out.data.is_empty() && out.x_lines.is_empty());
    }

    #[test]
    fn heatmap_matches_input_size() {
        let heat = heatmap_rgba(&rgba_with_lines(32), 32, 32, 1.0).unwrap();
        assert_eq!(heat.len(), 32 * 32 * 4);
        assert!(heat.chunks_exact(4).all(|px| px[0] == px[1] && px[3] == 255));
        assert!(heatmap_rgba(&rgba_with_lines(8), 8, 8, -1.0).is_err());
    }
}
