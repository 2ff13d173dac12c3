//! Local-maximum detection on a 1-D profile with spacing filtering.

use pixgrid_core::LineSet;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeakParams {
    /// Expected distance between neighbouring lines.
    pub gap_size: u32,
    /// Accepted deviation from `gap_size`.
    pub gap_tolerance: u32,
    /// Relative threshold as a fraction of the profile maximum.
    pub min_threshold: f32,
}

/// Relation of a candidate to the previously accepted peak.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spacing {
    /// Within `gap_size ± gap_tolerance`.
    Regular,
    /// Farther than `gap_size + gap_tolerance`; kept as its own line.
    Wide,
    /// Closer than `gap_size - gap_tolerance`; dropped as a duplicate.
    TooClose,
}

impl Spacing {
    #[inline]
    pub fn accepts(self) -> bool {
        !matches!(self, Spacing::TooClose)
    }
}

pub fn classify_spacing(distance: u32, gap_size: u32, gap_tolerance: u32) -> Spacing {
    let deviation = (distance as i64 - gap_size as i64).abs();
    if deviation <= gap_tolerance as i64 {
        Spacing::Regular
    } else if distance as i64 > gap_size as i64 + gap_tolerance as i64 {
        Spacing::Wide
    } else {
        Spacing::TooClose
    }
}

/// Interior indices strictly above both neighbours and at least `threshold`.
pub fn local_maxima(profile: &[f32], threshold: f32) -> Vec<u32> {
    profile
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0] && w[1] > w[2] && w[1] >= threshold)
        .map(|(i, _)| (i + 1) as u32)
        .collect()
}

/// Detect grid line positions in a profile.
///
/// A flat zero profile yields an empty set. The first candidate always seeds
/// the result; every later candidate is compared against the last accepted
/// line only, so a single wide jump is accepted even when it leaves the final
/// spacing irregular.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(profile), fields(len = profile.len()))
)]
pub fn detect_peaks(profile: &[f32], params: &PeakParams) -> LineSet {
    let max = profile.iter().copied().fold(0.0f32, f32::max);
    if max <= 0.0 {
        return LineSet::new();
    }

    let candidates = local_maxima(profile, params.min_threshold * max);
    log::trace!("{} peak candidates above {:.3}", candidates.len(), params.min_threshold * max);

    let accepted = candidates
        .into_iter()
        .fold(Vec::<u32>::new(), |mut acc, p| {
            let keep = match acc.last() {
                None => true,
                Some(&last) => {
                    classify_spacing(p - last, params.gap_size, params.gap_tolerance).accepts()
                }
            };
            if keep {
                acc.push(p);
            }
            acc
        });

    LineSet::from_unsorted(accepted)
}
