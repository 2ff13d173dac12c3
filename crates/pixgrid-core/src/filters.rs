//! Separable smoothing and 3×3 Sobel derivatives with reflect-101 borders.

use crate::field::ScalarField;

/// Reflect an index into `[0, n)` without repeating the edge sample
/// (`-1 -> 1`, `n -> n - 2`). Works for offsets of any magnitude.
#[inline]
pub fn reflect101(i: isize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let n = n as isize;
    let period = 2 * (n - 1);
    let m = i.rem_euclid(period);
    (if m >= n { period - m } else { m }) as usize
}

/// Normalized 1-D Gaussian taps with radius `ceil(3σ)` (at least 1).
///
/// `sigma <= 0` yields the identity kernel `[1.0]`.
pub fn gaussian_kernel_1d(sigma: f32) -> Vec<f32> {
    if sigma.is_nan() || sigma <= 0.0 {
        return vec![1.0];
    }
    let sigma = sigma as f64;
    let radius = (3.0 * sigma).ceil().max(1.0) as i32;
    let s2 = sigma * sigma;
    let mut k: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f64) / (2.0 * s2)).exp() as f32)
        .collect();
    let sum: f32 = k.iter().sum();
    for v in &mut k {
        *v /= sum;
    }
    k
}

/// Convolve a 1-D signal with an odd-length kernel.
pub fn convolve_1d(src: &[f32], k: &[f32]) -> Vec<f32> {
    let r = (k.len() / 2) as isize;
    (0..src.len())
        .map(|i| {
            k.iter().enumerate().fold(0.0f32, |acc, (t, &w)| {
                let j = reflect101(i as isize + t as isize - r, src.len());
                acc + src[j] * w
            })
        })
        .collect()
}

/// Apply the same odd-length kernel horizontally, then vertically.
pub fn convolve_separable(src: &ScalarField, k: &[f32]) -> ScalarField {
    let (w, h) = (src.width, src.height);
    let r = (k.len() / 2) as isize;

    let mut tmp = ScalarField::new(w, h);
    for y in 0..h {
        let row = src.row(y);
        for x in 0..w {
            let mut acc = 0.0f32;
            for (t, &kv) in k.iter().enumerate() {
                acc += row[reflect101(x as isize + t as isize - r, w)] * kv;
            }
            tmp.data[y * w + x] = acc;
        }
    }

    let mut dst = ScalarField::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (t, &kv) in k.iter().enumerate() {
                acc += tmp.get(x, reflect101(y as isize + t as isize - r, h)) * kv;
            }
            dst.data[y * w + x] = acc;
        }
    }
    dst
}

/// 3×3 Sobel derivatives `(gx, gy)`.
///
/// `gx = [-1 0 1; -2 0 2; -1 0 1]`, `gy` is its transpose.
pub fn sobel(src: &ScalarField) -> (ScalarField, ScalarField) {
    let (w, h) = (src.width, src.height);
    let mut gx = ScalarField::new(w, h);
    let mut gy = ScalarField::new(w, h);

    for y in 0..h {
        let y0 = reflect101(y as isize - 1, h);
        let y2 = reflect101(y as isize + 1, h);
        for x in 0..w {
            let x0 = reflect101(x as isize - 1, w);
            let x2 = reflect101(x as isize + 1, w);

            let a00 = src.get(x0, y0);
            let a01 = src.get(x, y0);
            let a02 = src.get(x2, y0);
            let a10 = src.get(x0, y);
            let a12 = src.get(x2, y);
            let a20 = src.get(x0, y2);
            let a21 = src.get(x, y2);
            let a22 = src.get(x2, y2);

            let idx = y * w + x;
            gx.data[idx] = (-a00 + a02) + (-2.0 * a10 + 2.0 * a12) + (-a20 + a22);
            gy.data[idx] = (-a00 - 2.0 * a01 - a02) + (a20 + 2.0 * a21 + a22);
        }
    }
    (gx, gy)
}
