//! JSON configuration and report helpers.

use std::{
    fs,
    path::{Path, PathBuf},
};

use pixgrid_core::LineSet;
use pixgrid_sample::SampleMode;
use serde::{Deserialize, Serialize};

use crate::{PixgridError, PixgridParams, PixgridResult};

/// Configuration of one reconstruction run, loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixgridConfig {
    pub image_path: String,
    /// Where to write the sampled image; see [`Self::resolved_output_path`].
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub report_path: Option<String>,
    /// Where to write the 8-bit energy heatmap, if anywhere.
    #[serde(default)]
    pub heatmap_path: Option<String>,
    #[serde(default)]
    pub params: PixgridParams,
}

impl PixgridConfig {
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            output_path: None,
            report_path: None,
            heatmap_path: None,
            params: PixgridParams::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PixgridError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PixgridError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Output image path, defaulting to `out/<stem>_sampled.png`.
    pub fn resolved_output_path(&self) -> PathBuf {
        if let Some(path) = &self.output_path {
            return PathBuf::from(path);
        }
        let stem = Path::new(&self.image_path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        PathBuf::from("out").join(format!("{stem}_sampled.png"))
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixgridReport {
    pub image_path: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub energy_range: Option<[f32; 2]>,
    pub detected_x: LineSet,
    pub detected_y: LineSet,
    pub x_lines: LineSet,
    pub y_lines: LineSet,
    pub cells_x: usize,
    pub cells_y: usize,
    pub mode: SampleMode,
    pub weight_ratio: f32,
    pub pixel_size: u32,
    pub output_width: usize,
    pub output_height: usize,
    /// `None` when nothing was written.
    #[serde(default)]
    pub output_path: Option<String>,
}

impl PixgridReport {
    pub fn new(image_path: &str, params: &PixgridParams, result: &PixgridResult) -> Self {
        let lines = &result.lines;
        let (cells_x, cells_y) = lines.cell_counts();
        Self {
            image_path: image_path.to_string(),
            width: lines.width,
            height: lines.height,
            energy_range: lines.energy_range,
            detected_x: lines.detected_x.clone(),
            detected_y: lines.detected_y.clone(),
            x_lines: lines.x.clone(),
            y_lines: lines.y.clone(),
            cells_x,
            cells_y,
            mode: params.sample.mode,
            weight_ratio: params.sample.weight_ratio,
            pixel_size: params.sample.pixel_size,
            output_width: result.image.width,
            output_height: result.image.height,
            output_path: None,
        }
    }

    pub fn set_output_path(&mut self, path: &Path) {
        self.output_path = Some(path.to_string_lossy().into_owned());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PixgridError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PixgridError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
