use serde::{Deserialize, Serialize};

use crate::peaks::PeakParams;

/// Rejected detector configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridParamError {
    #[error("sigma must be finite and non-negative (got {0})")]
    InvalidSigma(f32),
    #[error("gap_size must be at least 1 pixel")]
    ZeroGapSize,
    #[error("min_energy must lie in [0, 1] (got {0})")]
    InvalidMinEnergy(f32),
}

/// Parameters of the grid line detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLineParams {
    /// Gaussian blur sigma applied before the gradients. `0` disables blur.
    pub sigma: f32,
    /// Expected spacing between grid lines in pixels.
    pub gap_size: u32,
    /// Accepted deviation from `gap_size` in pixels.
    pub gap_tolerance: u32,
    /// Peak threshold as a fraction of the profile maximum.
    pub min_energy: f32,
    /// Profile smoothing window. `0` and `1` disable smoothing.
    pub smooth: usize,
}

impl Default for GridLineParams {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            gap_size: 8,
            gap_tolerance: 2,
            min_energy: 0.15,
            smooth: 3,
        }
    }
}

impl GridLineParams {
    pub fn validate(&self) -> Result<(), GridParamError> {
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(GridParamError::InvalidSigma(self.sigma));
        }
        if self.gap_size == 0 {
            return Err(GridParamError::ZeroGapSize);
        }
        if !(0.0..=1.0).contains(&self.min_energy) {
            return Err(GridParamError::InvalidMinEnergy(self.min_energy));
        }
        Ok(())
    }

    pub fn peak_params(&self) -> PeakParams {
        PeakParams {
            gap_size: self.gap_size,
            gap_tolerance: self.gap_tolerance,
            min_threshold: self.min_energy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GridLineParams::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let p = GridLineParams {
            sigma: -0.5,
            ..GridLineParams::default()
        };
        assert_eq!(p.validate(), Err(GridParamError::InvalidSigma(-0.5)));

        let p = GridLineParams {
            gap_size: 0,
            ..GridLineParams::default()
        };
        assert_eq!(p.validate(), Err(GridParamError::ZeroGapSize));

        let p = GridLineParams {
            min_energy: 1.5,
            ..GridLineParams::default()
        };
        assert_eq!(p.validate(), Err(GridParamError::InvalidMinEnergy(1.5)));

        let p = GridLineParams {
            min_energy: f32::NAN,
            ..GridLineParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn missing_json_fields_take_defaults() {
        let p: GridLineParams = serde_json::from_str(r#"{ "gap_size": 12 }"#).unwrap();
        assert_eq!(p.gap_size, 12);
        assert_eq!(p.gap_tolerance, 2);
        assert_eq!(p.smooth, 3);
    }
}
