use pixgrid_core::RgbImage;

use crate::color::GridColor;

/// Draw 1 px separators between the `pixel_size` blocks of a sampled image.
///
/// A separator is drawn on the last row/column of every block except the
/// final one on each axis, spanning the full image. Other pixels are left
/// untouched.
pub fn draw_grid_overlay(
    img: &mut RgbImage,
    cells_x: usize,
    cells_y: usize,
    pixel_size: u32,
    color: GridColor,
) {
    let ps = pixel_size as usize;
    if ps == 0 || img.is_empty() {
        return;
    }
    let rgb = color.rgb();
    let (w, h) = (img.width, img.height);

    for i in 0..cells_x.saturating_sub(1) {
        let x = i * ps + ps - 1;
        if x < w {
            img.fill_rect(x, 0, 1, h, rgb);
        }
    }
    for j in 0..cells_y.saturating_sub(1) {
        let y = j * ps + ps - 1;
        if y < h {
            img.fill_rect(0, y, w, 1, rgb);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: [u8; 3] = [10, 20, 30];

    fn canvas(cells_x: usize, cells_y: usize, ps: usize) -> RgbImage {
        let mut img = RgbImage::new(cells_x * ps, cells_y * ps);
        img.fill_rect(0, 0, img.width, img.height, BG);
        img
    }

    #[test]
    fn separators_sit_on_block_edges() {
        let mut img = canvas(3, 2, 4);
        draw_grid_overlay(&mut img, 3, 2, 4, GridColor::Red);
        let red = GridColor::Red.rgb();

        for y in 0..img.height {
            assert_eq!(img.get(3, y), red);
            assert_eq!(img.get(7, y), red);
            // last column stays untouched
            if y != 3 {
                assert_eq!(img.get(11, y), BG);
            }
        }
        for x in 0..img.width {
            assert_eq!(img.get(x, 3), red);
            if ![3, 7].contains(&x) {
                assert_eq!(img.get(x, 7), BG);
            }
        }
        assert_eq!(img.get(0, 0), BG);
        assert_eq!(img.get(5, 5), BG);
    }

    #[test]
    fn single_cell_gets_no_lines() {
        let mut img = canvas(1, 1, 5);
        let before = img.clone();
        draw_grid_overlay(&mut img, 1, 1, 5, GridColor::White);
        assert_eq!(img, before);
    }

    #[test]
    fn unit_pixel_size_paints_every_inner_column() {
        let mut img = canvas(3, 1, 1);
        draw_grid_overlay(&mut img, 3, 1, 1, GridColor::Black);
        assert_eq!(img.get(0, 0), [0, 0, 0]);
        assert_eq!(img.get(1, 0), [0, 0, 0]);
        assert_eq!(img.get(2, 0), BG);
    }

    #[test]
    fn empty_image_is_a_no_op() {
        let mut img = RgbImage::new(0, 0);
        draw_grid_overlay(&mut img, 0, 0, 4, GridColor::Gray);
        assert!(img.is_empty());
    }
}
