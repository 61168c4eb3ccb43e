//! Aggregations over temperature history.

use chrono::Duration;

use crate::temperature::Reading;
use crate::types::{round1, Timestamp};

/// Mean temperature rounded to one decimal, or `None` with no readings.
pub fn mean_temperature(readings: &[Reading]) -> Option<f64> {
    if readings.is_empty() {
        return None;
    }
    let sum: f64 = readings.iter().map(|r| r.temperature).sum();
    Some(round1(sum / readings.len() as f64))
}

/// Mean temperature rounded to one decimal; `0.0` when there are no readings.
///
/// The zero default cannot be told apart from a genuine 0°C average. Use
/// [`mean_temperature`] where that matters.
pub fn average_temperature(readings: &[Reading]) -> f64 {
    mean_temperature(readings).unwrap_or(0.0)
}

/// Readings taken at or after `now - hours`, in their original order.
///
/// A window reaching past the representable time range keeps the whole
/// history.
pub fn history_within_window(history: &[Reading], hours: i64, now: Timestamp) -> Vec<Reading> {
    let Some(cutoff) = Duration::try_hours(hours).and_then(|d| now.checked_sub_signed(d)) else {
        return history.to_vec();
    };
    history
        .iter()
        .filter(|r| r.timestamp >= cutoff)
        .cloned()
        .collect()
}
