//! Grid line detection for pixel-art reconstruction.
//!
//! ## Quickstart
//!
//! ```
//! use pixgrid_core::GrayImage;
//! use pixgrid_lines::{GridLineDetector, GridLineParams};
//!
//! let gray = GrayImage::new(32, 32);
//! let detector = GridLineDetector::new(GridLineParams::default()).expect("valid params");
//! let lines = detector.detect(&gray.view());
//! assert!(lines.x.is_empty() && lines.y.is_empty());
//! ```
//!
//! Pipeline:
//! 1. Blur the normalized gray image (`sigma`) and take `|gx| + |gy|` Sobel energy.
//! 2. Quantize the energy into an 8-bit heatmap scaled by its 99th percentile.
//! 3. Project the heatmap onto both axes and smooth each profile with a box window.
//! 4. Keep local maxima above `min_energy × max` and drop those closer than
//!    `gap_size - gap_tolerance` to the previously accepted line.
//! 5. Fill leading, interior and trailing gaps using the median spacing.

mod detector;
mod energy;
mod interpolate;
mod params;
mod peaks;
mod profile;

pub use detector::{GridLineDetector, GridLines};
pub use energy::{energy_heatmap, energy_map};
pub use interpolate::{complete_lines, typical_gap, FALLBACK_GAP};
pub use params::{GridLineParams, GridParamError};
pub use peaks::{classify_spacing, detect_peaks, local_maxima, PeakParams, Spacing};
pub use profile::{axis_profile, smooth_profile, smoothing_kernel, Axis, Profiles};
