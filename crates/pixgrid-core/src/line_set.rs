use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineSetError {
    #[error("line positions must be strictly increasing (index {index}: {prev} then {next})")]
    NotIncreasing { index: usize, prev: u32, next: u32 },
}

/// Strictly increasing, duplicate-free grid line positions along one axis.
///
/// `n` lines bound `n - 1` cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct LineSet(Vec<u32>);

impl LineSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Sort and deduplicate arbitrary positions.
    pub fn from_unsorted(mut positions: Vec<u32>) -> Self {
        positions.sort_unstable();
        positions.dedup();
        Self(positions)
    }

    /// Accept positions that already satisfy the invariant.
    pub fn try_from_sorted(positions: Vec<u32>) -> Result<Self, LineSetError> {
        if let Some(index) = positions.windows(2).position(|w| w[0] >= w[1]) {
            return Err(LineSetError::NotIncreasing {
                index: index + 1,
                prev: positions[index],
                next: positions[index + 1],
            });
        }
        Ok(Self(positions))
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<u32> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<u32> {
        self.0.last().copied()
    }

    /// Number of cells bounded by consecutive lines.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Consecutive `(start, end)` pairs, one per cell.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = (u32, u32)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Differences between consecutive lines.
    pub fn gaps(&self) -> impl Iterator<Item = u32> + '_ {
        self.cells().map(|(a, b)| b - a)
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.0
    }
}

impl TryFrom<Vec<u32>> for LineSet {
    type Error = LineSetError;

    fn try_from(v: Vec<u32>) -> Result<Self, Self::Error> {
        Self::try_from_sorted(v)
    }
}

impl From<LineSet> for Vec<u32> {
    fn from(s: LineSet) -> Self {
        s.0
    }
}
