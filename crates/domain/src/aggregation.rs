//! Pure numeric aggregation over already-fetched readings.
//!
//! Nothing here touches storage: callers fetch readings through the
//! repository ports and hand them in.

use std::collections::BTreeMap;

use crate::id::SensorId;
use crate::period::Delta;
use crate::reading::Reading;
use crate::time::seconds_between;

/// Arithmetic mean of the reading values.
///
/// An empty set averages to `0.0`. A sensor that reported nothing in a
/// window therefore contributes nothing to that window's total.
#[must_use]
pub fn average(readings: &[Reading]) -> f64 {
    if readings.is_empty() {
        return 0.0;
    }
    let sum: f64 = readings.iter().map(|r| r.value).sum();
    #[allow(clippy::cast_precision_loss)]
    let count = readings.len() as f64;
    sum / count
}

/// Largest `|value(a) - value(b)|` over all pairs whose timestamps are at
/// most `tolerance` seconds apart.
///
/// Every pair is compared; the cost is `O(|a| * |b|)`. Returns `None` when
/// either side is empty or no pair falls within the tolerance.
#[must_use]
pub fn max_instant_difference(a: &[Reading], b: &[Reading], tolerance: Delta) -> Option<f64> {
    let tolerance = i64::from(tolerance.as_secs());
    let mut maximum: Option<f64> = None;
    for left in a {
        for right in b {
            if seconds_between(left.recorded_at, right.recorded_at) > tolerance {
                continue;
            }
            let difference = (left.value - right.value).abs();
            maximum = Some(maximum.map_or(difference, |m| m.max(difference)));
        }
    }
    maximum
}

/// Sum of the per-sensor averages of one window.
#[must_use]
pub fn window_total(averages: &BTreeMap<SensorId, f64>) -> f64 {
    averages.values().sum()
}

/// Largest window total, or `None` when no window rose above zero.
#[must_use]
pub fn peak(totals: impl IntoIterator<Item = f64>) -> Option<f64> {
    let peak = totals.into_iter().fold(0.0_f64, f64::max);
    (peak > 0.0).then_some(peak)
}
