//! Refresh pipeline: fetch the three replies and apply them in order.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::model::Snapshot;

use super::apply::{ApplyStats, apply_reply};
use super::traits::{StatsCommand, StatsSource, TransportError};

/// Timing and line counts of one refresh.
#[derive(Debug, Clone, Default)]
pub struct RefreshTiming {
    /// Total refresh time.
    pub total: Duration,
    /// Time spent fetching `stats slabs`.
    pub slabs: Duration,
    /// Time spent fetching `stats items`.
    pub items: Duration,
    /// Time spent fetching `stats`.
    pub general: Duration,
    /// Lines applied / ignored / skipped over all three replies.
    pub lines: ApplyStats,
}

/// Drives one [`StatsSource`] and updates a snapshot in place.
pub struct Collector<S: StatsSource> {
    source: S,
}

impl<S: StatsSource> Collector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Runs one refresh cycle at wall-clock time `now_ms`.
    ///
    /// Slabs, then items, then general stats are fetched and applied; the
    /// cycle time becomes the rate baseline only after all three succeeded.
    /// Any transport failure aborts the cycle.
    pub fn refresh(
        &mut self,
        snapshot: &mut Snapshot,
        now_ms: i64,
    ) -> Result<RefreshTiming, TransportError> {
        let start = Instant::now();
        let mut timing = RefreshTiming::default();
        snapshot.begin_cycle(now_ms);

        for command in StatsCommand::REFRESH_ORDER {
            let fetch_start = Instant::now();
            let text = self.source.fetch(command)?;
            let fetched = fetch_start.elapsed();
            match command {
                StatsCommand::Slabs => timing.slabs = fetched,
                StatsCommand::Items => timing.items = fetched,
                StatsCommand::General => timing.general = fetched,
            }

            let lines = apply_reply(snapshot, command, &text);
            debug!(%command, ?lines, bytes = text.len(), "applied reply");
            timing.lines.applied += lines.applied;
            timing.lines.ignored += lines.ignored;
            timing.lines.skipped += lines.skipped;
        }

        snapshot.end_cycle();
        timing.total = start.elapsed();
        info!(
            source = %self.source.describe(),
            active_slabs = snapshot.slabs.active_count(),
            skipped = timing.lines.skipped,
            elapsed_ms = timing.total.as_millis() as u64,
            slabs_ms = timing.slabs.as_millis() as u64,
            items_ms = timing.items.as_millis() as u64,
            general_ms = timing.general.as_millis() as u64,
            "refresh complete"
        );
        Ok(timing)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    #[cfg(test)]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::ReplaySource;

    const SLABS: &str = include_str!("../../testdata/stats_slabs.txt");
    const ITEMS: &str = include_str!("../../testdata/stats_items.txt");
    const GENERAL: &str = include_str!("../../testdata/stats.txt");

    fn collector() -> Collector<ReplaySource> {
        Collector::new(ReplaySource::new(GENERAL, SLABS, ITEMS))
    }

    #[test]
    fn test_refresh_populates_snapshot() {
        let mut c = collector();
        let mut s = Snapshot::new("localhost", 11211, 100);
        let timing = c.refresh(&mut s, 1_000).unwrap();

        assert_eq!(s.active_slab_ids(), vec![1, 2, 5, 12]);
        assert_eq!(s.global.version, "1.6.21");
        assert_eq!(s.global.memory_limit, 67_108_864);
        assert_eq!(s.slabs.get(1).unwrap().chunk_size, 96);
        assert_eq!(s.items.get(5).unwrap().evicted.value, 17);
        assert_eq!(s.global.time_prev, Some(1_000));

        assert_eq!(timing.lines.skipped, 0);
        assert!(timing.lines.applied > 0);
    }

    #[test]
    fn test_first_refresh_rates_are_zero() {
        let mut c = collector();
        let mut s = Snapshot::new("localhost", 11211, 100);
        c.refresh(&mut s, 1_000).unwrap();
        assert_eq!(s.global.get.rate, 0.0);
        assert_eq!(s.global.set.rate, 0.0);
        assert_eq!(s.slabs.get(1).unwrap().get_hits.rate, 0.0);
        assert_eq!(s.items.get(5).unwrap().evicted.rate, 0.0);
    }

    #[test]
    fn test_second_refresh_computes_rates() {
        let mut c = collector();
        let mut s = Snapshot::new("localhost", 11211, 100);
        c.refresh(&mut s, 0).unwrap();
        let get_before = s.global.get.value;

        c.source_mut().set_reply(
            StatsCommand::General,
            GENERAL.replace(
                &format!("STAT cmd_get {}", get_before),
                &format!("STAT cmd_get {}", get_before + 50),
            ),
        );
        c.refresh(&mut s, 5_000).unwrap();
        assert_eq!(s.global.get.rate, 10.0);
        // Unchanged counters report zero.
        assert_eq!(s.global.set.rate, 0.0);
    }

    #[test]
    fn test_vanished_slab_is_inactive_next_cycle() {
        let mut c = collector();
        let mut s = Snapshot::new("localhost", 11211, 100);
        c.refresh(&mut s, 0).unwrap();

        let without_12: String = SLABS
            .lines()
            .filter(|l| !l.starts_with("STAT 12:"))
            .map(|l| format!("{l}\r\n"))
            .collect();
        c.source_mut().set_reply(StatsCommand::Slabs, without_12);
        c.refresh(&mut s, 5_000).unwrap();
        assert_eq!(s.active_slab_ids(), vec![1, 2, 5]);
    }

    #[test]
    fn test_slab_missing_for_a_cycle_keeps_true_rate() {
        let mut c = Collector::new(ReplaySource::new(
            "END\r\n",
            "STAT 1:cmd_set 100\r\nEND\r\n",
            "END\r\n",
        ));
        let mut s = Snapshot::new("localhost", 11211, 100);
        c.refresh(&mut s, 0).unwrap();

        c.source_mut().set_reply(StatsCommand::Slabs, "END\r\n");
        c.refresh(&mut s, 5_000).unwrap();
        assert!(s.active_slab_ids().is_empty());

        c.source_mut()
            .set_reply(StatsCommand::Slabs, "STAT 1:cmd_set 200\r\nEND\r\n");
        c.refresh(&mut s, 10_000).unwrap();
        // 100 sets over the 10s since the slab was last read.
        assert_eq!(s.slabs.get(1).unwrap().set.rate, 10.0);
    }

    struct FailingSource;

    impl StatsSource for FailingSource {
        fn fetch(&mut self, command: StatsCommand) -> Result<String, TransportError> {
            Err(TransportError::UnexpectedEof { command })
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    #[test]
    fn test_transport_failure_keeps_baseline() {
        let mut c = Collector::new(FailingSource);
        let mut s = Snapshot::new("localhost", 11211, 100);
        let err = c.refresh(&mut s, 1_000).unwrap_err();
        assert!(matches!(
            err,
            TransportError::UnexpectedEof {
                command: StatsCommand::Slabs
            }
        ));
        assert_eq!(s.global.time_prev, None);
    }
}
