// THEORY:
// `ShareResult` is the single number the whole tool exists to produce: the
// percentage of grid cells attributed to the tracked brand. It is derived, never
// stored as independent state, and the competitor share is its complement, so
// `share + competitor == 100` holds for every reachable state by construction.
//
// Rounding is round-half-up, computed on integers so there is no float
// representation error at the .5 boundary:
//
//     share = floor((200 * selected + total) / (2 * total))
//
// which equals floor(100 * selected / total + 0.5). Examples: 1/2 -> 50,
// 1/3 -> 33, 2/3 -> 67, 1/8 -> 13, 3/8 -> 38.

use crate::error::ShareOutOfRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer shelf-share percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ShareResult(u8);

impl ShareResult {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(100);

    /// Share of `selected` cells out of `total`. `selected` is clamped to `total`;
    /// an empty grid yields zero.
    pub fn from_counts(selected: u64, total: u64) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let selected = u128::from(selected.min(total));
        let total = u128::from(total);
        let percent = (200 * selected + total) / (2 * total);
        // selected <= total bounds the quotient to 100.
        Self(percent as u8)
    }

    /// The tracked brand's share in percent.
    pub fn percent(self) -> u8 {
        self.0
    }

    /// Everything not attributed to the tracked brand, `100 - share`.
    pub fn competitor(self) -> u8 {
        100 - self.0
    }
}

impl fmt::Display for ShareResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Accepts a stored percentage, rejecting anything above 100.
impl TryFrom<u8> for ShareResult {
    type Error = ShareOutOfRange;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        if percent > 100 {
            return Err(ShareOutOfRange(percent));
        }
        Ok(Self(percent))
    }
}

impl From<ShareResult> for u8 {
    fn from(share: ShareResult) -> Self {
        share.0
    }
}
