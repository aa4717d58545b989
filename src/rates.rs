//! Rate computation for monotonically increasing server counters.
//!
//! Every rate-tracked field in the snapshot is a [`RateMetric`]. The previous
//! raw reading lives next to the current one, so the next refresh can derive
//! a per-second rate without any history structure.

/// Elapsed seconds between two cycle timestamps (milliseconds).
///
/// Returns `None` when there is no baseline yet or the clock did not move
/// forward.
pub fn elapsed_secs(time_ms: i64, time_prev_ms: Option<i64>) -> Option<f64> {
    let prev = time_prev_ms?;
    match time_ms.checked_sub(prev) {
        Some(delta) if delta > 0 => Some(delta as f64 / 1000.0),
        _ => None,
    }
}

/// Compute u64 delta, returning `None` on counter regression (stats reset).
pub fn du64(curr: u64, prev: u64) -> Option<u64> {
    curr.checked_sub(prev)
}

/// A counter together with its previous reading and derived rate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateMetric {
    /// Latest raw value.
    pub value: u64,
    /// Raw value of the previous reading, `None` before the first one.
    pub previous_value: Option<u64>,
    /// Cycle time (ms) of the previous reading.
    pub previous_time_ms: Option<i64>,
    /// Per-second rate between the previous and the latest reading.
    pub rate: f64,
}

impl RateMetric {
    /// Records a new reading taken in the cycle at `now_ms`.
    ///
    /// The delta is divided by the time since this metric's own previous
    /// reading, which may be several cycles back when a slab went missing.
    /// The rate is 0 for the first reading, when the clock did not move
    /// forward, or when the counter went backwards.
    pub fn update(&mut self, new_value: u64, now_ms: i64) {
        let elapsed = elapsed_secs(now_ms, self.previous_time_ms);
        self.rate = match (self.previous_value, elapsed) {
            (Some(prev), Some(dt)) => match du64(new_value, prev) {
                Some(delta) => delta as f64 / dt,
                None => {
                    tracing::warn!(prev, new_value, "counter went backwards, rate reset");
                    0.0
                }
            },
            _ => 0.0,
        };
        self.value = new_value;
        self.previous_value = Some(new_value);
        self.previous_time_ms = Some(now_ms);
    }
}
