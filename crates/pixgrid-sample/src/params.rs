use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a cell is reduced to one colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleMode {
    /// The single pixel at the cell centre.
    #[default]
    Center,
    /// Mean over the whole cell.
    Average,
    /// Mean over a centred window covering `weight_ratio` of the cell.
    Weighted,
}

impl SampleMode {
    pub const ALL: [SampleMode; 3] = [SampleMode::Center, SampleMode::Average, SampleMode::Weighted];

    pub fn as_str(self) -> &'static str {
        match self {
            SampleMode::Center => "center",
            SampleMode::Average => "average",
            SampleMode::Weighted => "weighted",
        }
    }
}

impl fmt::Display for SampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sampling mode `{0}` (expected center, average or weighted)")]
pub struct UnknownMode(pub String);

impl FromStr for SampleMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SampleMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SampleParamError {
    #[error("pixel_size must be at least 1")]
    ZeroPixelSize,
    #[error("weight_ratio must lie in (0, 1] (got {0})")]
    InvalidWeightRatio(f32),
    #[error("{cells_x}x{cells_y} cells at pixel_size {pixel_size} exceed the addressable output size")]
    OutputTooLarge {
        cells_x: usize,
        cells_y: usize,
        pixel_size: u32,
    },
}

/// Sampling configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleParams {
    pub mode: SampleMode,
    /// Window size relative to the cell, used by [`SampleMode::Weighted`].
    /// Useful values lie in `0.1..=0.9`.
    pub weight_ratio: f32,
    /// Edge length of the block each cell occupies in the output.
    pub pixel_size: u32,
}

impl Default for SampleParams {
    fn default() -> Self {
        Self {
            mode: SampleMode::Center,
            weight_ratio: 0.6,
            pixel_size: 1,
        }
    }
}

impl SampleParams {
    pub fn validate(&self) -> Result<(), SampleParamError> {
        if self.pixel_size == 0 {
            return Err(SampleParamError::ZeroPixelSize);
        }
        if !(self.weight_ratio > 0.0 && self.weight_ratio <= 1.0) {
            return Err(SampleParamError::InvalidWeightRatio(self.weight_ratio));
        }
        Ok(())
    }
}
