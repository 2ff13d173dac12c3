//! Rebuild a pixel-art raster from a completed grid.
//!
//! Every cell bounded by consecutive x and y lines becomes one output pixel,
//! magnified to a `pixel_size × pixel_size` block. The colour comes from the
//! cell centre, the whole cell, or a centred window (see [`SampleMode`]).
//! [`draw_grid_overlay`] optionally marks the cell boundaries afterwards.

mod color;
mod overlay;
mod params;
mod sampler;

pub use color::{GridColor, UnknownColor};
pub use overlay::draw_grid_overlay;
pub use params::{SampleMode, SampleParamError, SampleParams, UnknownMode};
pub use sampler::{output_size, sample_cell, sample_cells, CellRect};
