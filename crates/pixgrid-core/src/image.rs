#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImageView<'_> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

impl GrayImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Borrowed interleaved 8-bit RGB raster.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h*3
}

impl RgbImageView<'_> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Per-channel sums over `[x0, x1) × [y0, y1)` and the pixel count.
    ///
    /// The rectangle must already lie inside the raster.
    pub fn rect_sum(&self, x0: usize, x1: usize, y0: usize, y1: usize) -> ([u64; 3], u64) {
        let mut acc = [0u64; 3];
        for y in y0..y1 {
            let row = &self.data[(y * self.width + x0) * 3..(y * self.width + x1) * 3];
            for px in row.chunks_exact(3) {
                acc[0] += px[0] as u64;
                acc[1] += px[1] as u64;
                acc[2] += px[2] as u64;
            }
        }
        let count = (x1.saturating_sub(x0) * y1.saturating_sub(y0)) as u64;
        (acc, count)
    }
}

/// Owned interleaved 8-bit RGB raster. Zero-sized images are valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    pub fn view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        self.view().get(x, y)
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// Fill `[x, x+w) × [y, y+h)`, clipped to the image bounds.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, rgb: [u8; 3]) {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for yy in y.min(y1)..y1 {
            for xx in x.min(x1)..x1 {
                self.put(xx, yy, rgb);
            }
        }
    }
}

/// BT.601 luma in 14-bit fixed point, matching the usual `RGB -> GRAY`
/// conversion of 8-bit images.
#[inline]
fn luma(rgb: [u8; 3]) -> u8 {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    ((rgb[0] as u32 * R + rgb[1] as u32 * G + rgb[2] as u32 * B + (1 << 13)) >> 14) as u8
}

pub(crate) fn luma_f32(rgb: [u8; 3]) -> f32 {
    luma(rgb) as f32
}

/// Convert an RGB view into an 8-bit grayscale image.
pub fn rgb_to_gray(src: &RgbImageView<'_>) -> GrayImage {
    let data = src
        .data
        .chunks_exact(3)
        .map(|px| luma([px[0], px[1], px[2]]))
        .collect();
    GrayImage {
        width: src.width,
        height: src.height,
        data,
    }
}
