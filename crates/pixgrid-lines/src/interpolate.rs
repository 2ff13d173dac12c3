//! Completion of a sparse line set into a full, roughly uniform grid.
//!
//! Gradient energy finds lines over high-contrast cell boundaries but stays
//! silent between neighbouring cells of the same colour. Missing lines are
//! synthesized by assuming uniform spacing: the typical gap is the median of
//! the detected spacings, and every margin or interior gap that is too wide
//! receives evenly spaced lines.

use pixgrid_core::LineSet;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Typical gap assumed when fewer than two lines were detected.
pub const FALLBACK_GAP: u32 = 8;

/// Interior gaps wider than this multiple of the typical gap are split.
const INTERIOR_SPLIT_RATIO: f64 = 1.5;

/// Median spacing, truncated to whole pixels.
pub fn typical_gap(lines: &LineSet) -> u32 {
    let mut gaps: Vec<u32> = lines.gaps().collect();
    if gaps.is_empty() {
        return FALLBACK_GAP;
    }
    gaps.sort_unstable();
    let n = gaps.len();
    let median = if n % 2 == 1 {
        gaps[n / 2] as f64
    } else {
        (gaps[n / 2 - 1] as f64 + gaps[n / 2] as f64) / 2.0
    };
    median as u32
}

/// Number of lines to insert into a span of `span` pixels.
fn missing_lines(span: u32, gap: u32) -> u32 {
    let n = (span as f64 / gap as f64).round_ties_even() as i64 - 1;
    n.max(1) as u32
}

/// `num` evenly spaced offsets strictly inside `(0, span)`, truncated.
fn even_offsets(span: u32, num: u32) -> impl Iterator<Item = u32> {
    (1..=num).map(move |k| ((k as u64 * span as u64) as f64 / (num + 1) as f64) as u32)
}

/// Complete `lines` so that the grid tiles `[0, limit)`.
///
/// Positions at or beyond `limit` are discarded. An empty input stays empty.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(lines), fields(detected = lines.len()))
)]
pub fn complete_lines(lines: &LineSet, limit: u32) -> LineSet {
    let lines = LineSet::from_unsorted(
        lines.as_slice().iter().copied().filter(|&p| p < limit).collect(),
    );
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return LineSet::new();
    };

    let gap = typical_gap(&lines);
    let mut all = lines.as_slice().to_vec();

    if first > gap {
        let num = missing_lines(first, gap);
        all.extend(even_offsets(first, num));
    }

    for (a, b) in lines.cells() {
        let span = b - a;
        if span as f64 > gap as f64 * INTERIOR_SPLIT_RATIO {
            let num = missing_lines(span, gap);
            all.extend(even_offsets(span, num).map(|o| a + o));
        }
    }

    if (last as i64) < limit as i64 - gap as i64 {
        let span = limit - last;
        let num = missing_lines(span, gap);
        all.extend(even_offsets(span, num).map(|o| last + o));
    }

    let completed = LineSet::from_unsorted(all);
    let added = completed.len() - lines.len();
    if added > 0 {
        log::debug!("interpolated {added} lines (typical gap {gap}px, limit {limit})");
    }
    completed
}
