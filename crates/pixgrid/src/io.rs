//! Image loading and saving through the `image` crate.

use std::fs;
use std::path::Path;

use image::ImageReader;
use pixgrid_core::{GrayImage, GrayImageView, RgbImage, RgbImageView};

use crate::PixgridError;

/// Decode an image file into 8-bit RGB. Alpha is dropped.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<image::RgbImage, PixgridError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PixgridError::InputNotFound(path.to_path_buf()));
    }
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img.to_rgb8())
}

/// Borrow an `image::RgbImage` as a core view.
pub fn rgb_view(img: &image::RgbImage) -> RgbImageView<'_> {
    RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Borrow an `image::GrayImage` as a core view.
pub fn gray_view(img: &image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

fn create_parent_dir(path: &Path) -> Result<(), PixgridError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(fs::create_dir_all(dir)?),
        _ => Ok(()),
    }
}

/// Encode an RGB raster; the format follows the file extension.
///
/// Missing parent directories are created. Empty rasters cannot be encoded
/// and are rejected.
pub fn save_rgb(img: &RgbImage, path: impl AsRef<Path>) -> Result<(), PixgridError> {
    let path = path.as_ref();
    if img.is_empty() {
        return Err(PixgridError::EmptyImage {
            width: img.width,
            height: img.height,
        });
    }
    let buf = image::RgbImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
        .ok_or(PixgridError::InvalidBuffer {
            expected: img.width * img.height * 3,
            got: img.data.len(),
        })?;
    create_parent_dir(path)?;
    buf.save(path)?;
    Ok(())
}

/// Encode a grayscale raster, e.g. the energy heatmap.
pub fn save_gray(img: &GrayImage, path: impl AsRef<Path>) -> Result<(), PixgridError> {
    let path = path.as_ref();
    if img.width == 0 || img.height == 0 {
        return Err(PixgridError::EmptyImage {
            width: img.width,
            height: img.height,
        });
    }
    let buf = image::GrayImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
        .ok_or(PixgridError::InvalidBuffer {
            expected: img.width * img.height,
            got: img.data.len(),
        })?;
    create_parent_dir(path)?;
    buf.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_is_reported_before_decoding() {
        let err = load_rgb("no/such/image.png").unwrap_err();
        assert!(matches!(err, PixgridError::InputNotFound(_)));
        assert!(err.to_string().contains("no/such/image.png"));
    }

    #[test]
    fn rgb_png_survives_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.png");
        let mut img = RgbImage::new(3, 2);
        img.put(2, 1, [9, 8, 7]);
        save_rgb(&img, &path).unwrap();

        let loaded = load_rgb(&path).unwrap();
        let view = rgb_view(&loaded);
        assert_eq!((view.width, view.height), (3, 2));
        assert_eq!(view.get(2, 1), [9, 8, 7]);
        assert_eq!(view.get(0, 0), [0, 0, 0]);
    }

    #[test]
    fn empty_images_are_not_encoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let err = save_rgb(&RgbImage::new(0, 0), &path).unwrap_err();
        assert!(matches!(err, PixgridError::EmptyImage { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn gray_png_is_single_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heat.png");
        let mut img = GrayImage::new(4, 4);
        img.data[5] = 200;
        save_gray(&img, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_luma8();
        let view = gray_view(&loaded);
        assert_eq!(view.get(1, 1), 200);
    }
}
