//! Reconstruct the native pixel grid of upscaled pixel art.
//!
//! Pixel art that was scaled up (often unevenly, or by a generator that only
//! imitates a grid) is reduced back to one pixel per cell: grid lines are found
//! from gradient energy, completed by interpolation, and every cell is sampled
//! into a single colour.
//!
//! ## Quickstart
//!
//! ```no_run
//! use pixgrid::{io, PixelGridPipeline, PixgridParams};
//!
//! # fn main() -> Result<(), pixgrid::PixgridError> {
//! let img = io::load_rgb("sprite.png")?;
//! let pipeline = PixelGridPipeline::new(PixgridParams::default())?;
//! let result = pipeline.run(&io::rgb_view(&img))?;
//! println!("{:?} cells", result.lines.cell_counts());
//! io::save_rgb(&result.image, "sprite_sampled.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `pixgrid::core`: rasters, scalar fields, filters and [`LineSet`].
//! - `pixgrid::lines`: energy map, profiles, peak detection and gap interpolation.
//! - `pixgrid::sample`: per-cell colour sampling and the grid overlay.
//! - [`PixelGridPipeline`]: the end-to-end run from an RGB raster.
//! - [`PixgridConfig`] / [`PixgridReport`]: JSON configuration and run report.
//! - `pixgrid::io` (feature `image`): loading and saving through the `image` crate.

pub use pixgrid_core as core;
pub use pixgrid_lines as lines;
pub use pixgrid_sample as sample;

pub use pixgrid_core::{GrayImage, GrayImageView, LineSet, RgbImage, RgbImageView};
pub use pixgrid_lines::{GridLineDetector, GridLineParams, GridLines};
pub use pixgrid_sample::{GridColor, SampleMode, SampleParams};

mod config;
mod error;
mod pipeline;

#[cfg(feature = "image")]
pub mod io;

pub use config::{PixgridConfig, PixgridReport};
pub use error::PixgridError;
pub use pipeline::{rgb_view_from_raw, PixelGridPipeline, PixgridParams, PixgridResult};
