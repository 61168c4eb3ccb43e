//! Short-window temperature trend estimation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::temperature::Reading;

/// Number of most recent readings considered by [`trend`].
pub const DEFAULT_TREND_WINDOW: usize = 5;

/// Qualitative direction of recent readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trend over the last [`DEFAULT_TREND_WINDOW`] readings.
///
/// `history` must be in chronological order.
pub fn trend(history: &[Reading]) -> Trend {
    trend_with_window(history, DEFAULT_TREND_WINDOW)
}

/// Trend over the last `window` readings.
///
/// Counts adjacent pairs that strictly increase or strictly decrease; equal
/// neighbours count for neither side. The larger count wins, a tie is
/// `Stable`, and fewer than two readings are always `Stable`.
pub fn trend_with_window(history: &[Reading], window: usize) -> Trend {
    let start = history.len().saturating_sub(window);
    let recent = &history[start..];
    if recent.len() < 2 {
        return Trend::Stable;
    }

    let (mut rising, mut falling) = (0usize, 0usize);
    for pair in recent.windows(2) {
        let (prev, next) = (pair[0].temperature, pair[1].temperature);
        if next > prev {
            rising += 1;
        } else if next < prev {
            falling += 1;
        }
    }

    match rising.cmp(&falling) {
        std::cmp::Ordering::Greater => Trend::Rising,
        std::cmp::Ordering::Less => Trend::Falling,
        std::cmp::Ordering::Equal => Trend::Stable,
    }
}
