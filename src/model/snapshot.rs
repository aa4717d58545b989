//! The long-lived metric snapshot.
//!
//! One [`Snapshot`] is created at startup and updated field by field on every
//! refresh. Slab and item records live in sparse [`SlabTable`]s keyed by slab
//! id; a record is either active (reported in the latest reply) or inactive.
//! Inactive records keep their rate baselines, each stamped with the cycle
//! it was read in.

use std::collections::BTreeMap;

use crate::rates::RateMetric;

use super::fields::{GlobalField, ItemField, SlabField};

/// Slab id above the configured bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("slab id {id} exceeds capacity {capacity}")]
pub struct CapacityError {
    pub id: u32,
    pub capacity: usize,
}

/// A record stored in a [`SlabTable`].
pub trait SlabSlot {
    fn new(slab_id: u32) -> Self;
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

/// Sparse slab-id → record mapping with an explicit id bound.
#[derive(Debug, Clone)]
pub struct SlabTable<T> {
    slots: BTreeMap<u32, T>,
    capacity: usize,
}

impl<T: SlabSlot> SlabTable<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: BTreeMap::new(),
            capacity,
        }
    }

    /// Highest slab id accepted.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Marks every record inactive.
    pub fn deactivate_all(&mut self) {
        for slot in self.slots.values_mut() {
            slot.set_active(false);
        }
    }

    /// Returns the record for `id`, creating it if needed, and marks it
    /// active.
    pub fn activate(&mut self, id: u32) -> Result<&mut T, CapacityError> {
        if id == 0 || id as usize > self.capacity {
            return Err(CapacityError {
                id,
                capacity: self.capacity,
            });
        }
        let slot = self.slots.entry(id).or_insert_with(|| T::new(id));
        slot.set_active(true);
        Ok(slot)
    }

    /// Active record for `id`.
    pub fn get(&self, id: u32) -> Option<&T> {
        self.slots.get(&id).filter(|s| s.is_active())
    }

    /// Record for `id` regardless of activation.
    #[cfg(test)]
    pub fn get_any(&self, id: u32) -> Option<&T> {
        self.slots.get(&id)
    }

    /// Active slab ids in ascending order.
    pub fn active_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots
            .iter()
            .filter(|(_, s)| s.is_active())
            .map(|(id, _)| *id)
    }

    pub fn active_count(&self) -> usize {
        self.slots.values().filter(|s| s.is_active()).count()
    }
}

/// Per-slab metrics from `stats slabs`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlabStat {
    pub slab_id: u32,
    pub active: bool,
    pub chunk_size: u64,
    pub total_pages: u64,
    pub used_chunks: u64,
    pub free_chunks: u64,
    pub mem_requested: u64,
    pub set: RateMetric,
    pub get_hits: RateMetric,
}

impl SlabStat {
    pub fn apply(&mut self, field: SlabField, value: u64, now_ms: i64) {
        match field {
            SlabField::ChunkSize => self.chunk_size = value,
            SlabField::TotalPages => self.total_pages = value,
            SlabField::UsedChunks => self.used_chunks = value,
            SlabField::FreeChunks => self.free_chunks = value,
            SlabField::MemRequested => self.mem_requested = value,
            SlabField::CmdSet => self.set.update(value, now_ms),
            SlabField::GetHits => self.get_hits.update(value, now_ms),
        }
    }

    /// Bytes allocated to the slab but not requested by stored items.
    pub fn wasted_bytes(&self, page_size: u64) -> u64 {
        self.total_pages
            .saturating_mul(page_size)
            .saturating_sub(self.mem_requested)
    }
}

impl SlabSlot for SlabStat {
    fn new(slab_id: u32) -> Self {
        Self {
            slab_id,
            ..Self::default()
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Per-slab item metrics from `stats items`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemStat {
    pub slab_id: u32,
    pub active: bool,
    pub item_count: u64,
    pub evicted: RateMetric,
    /// Seconds since the last access of the most recently evicted item.
    pub evicted_age_seconds: u64,
}

impl ItemStat {
    pub fn apply(&mut self, field: ItemField, value: u64, now_ms: i64) {
        match field {
            ItemField::Number => self.item_count = value,
            ItemField::Evicted => self.evicted.update(value, now_ms),
            ItemField::EvictedTime => self.evicted_age_seconds = value,
        }
    }
}

impl SlabSlot for ItemStat {
    fn new(slab_id: u32) -> Self {
        Self {
            slab_id,
            ..Self::default()
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Server-wide metrics from `stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalStat {
    pub server: String,
    pub port: u16,
    /// Wall-clock time of the current cycle (ms since epoch).
    pub time: i64,
    /// Time of the last completed cycle, `None` before the first one.
    pub time_prev: Option<i64>,
    pub uptime: u64,
    pub version: String,
    pub memory_limit: u64,
    pub get: RateMetric,
    pub set: RateMetric,
    pub evictions: RateMetric,
    pub total_items: u64,
    pub get_hits: u64,
}

impl GlobalStat {
    fn new(server: &str, port: u16) -> Self {
        Self {
            server: server.to_string(),
            port,
            time: 0,
            time_prev: None,
            uptime: 0,
            version: "N/A".to_string(),
            memory_limit: 0,
            get: RateMetric::default(),
            set: RateMetric::default(),
            evictions: RateMetric::default(),
            total_items: 0,
            get_hits: 0,
        }
    }

    /// Applies a numeric field. `Version` is textual, see [`Self::set_version`].
    pub fn apply(&mut self, field: GlobalField, value: u64, now_ms: i64) {
        match field {
            GlobalField::Uptime => self.uptime = value,
            GlobalField::LimitMaxbytes => self.memory_limit = value,
            GlobalField::TotalItems => self.total_items = value,
            GlobalField::Evictions => self.evictions.update(value, now_ms),
            GlobalField::CmdGet => self.get.update(value, now_ms),
            GlobalField::CmdSet => self.set.update(value, now_ms),
            GlobalField::GetHits => self.get_hits = value,
            GlobalField::Version => {}
        }
    }

    pub fn set_version(&mut self, version: &str) {
        self.version.clear();
        self.version.push_str(version);
    }

    /// `get_hits / cmd_get`, `None` when no get was served yet.
    pub fn hit_ratio(&self) -> Option<f64> {
        (self.get.value > 0).then(|| self.get_hits as f64 / self.get.value as f64)
    }
}

/// Current state of every tracked metric.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub global: GlobalStat,
    pub slabs: SlabTable<SlabStat>,
    pub items: SlabTable<ItemStat>,
}

impl Snapshot {
    pub fn new(server: &str, port: u16, slab_capacity: usize) -> Self {
        Self {
            global: GlobalStat::new(server, port),
            slabs: SlabTable::new(slab_capacity),
            items: SlabTable::new(slab_capacity),
        }
    }

    /// Starts a refresh cycle at `now_ms`.
    pub fn begin_cycle(&mut self, now_ms: i64) {
        self.global.time = now_ms;
    }

    /// Closes the cycle; its time becomes the next rate baseline.
    pub fn end_cycle(&mut self) {
        self.global.time_prev = Some(self.global.time);
    }

    /// Active slab ids in ascending order.
    pub fn active_slab_ids(&self) -> Vec<u32> {
        self.slabs.active_ids().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_creates_and_marks_active() {
        let mut table: SlabTable<SlabStat> = SlabTable::new(100);
        let slab = table.activate(5).unwrap();
        assert_eq!(slab.slab_id, 5);
        assert!(slab.active);
        assert_eq!(table.active_ids().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_activate_out_of_range() {
        let mut table: SlabTable<ItemStat> = SlabTable::new(100);
        assert_eq!(
            table.activate(101).unwrap_err(),
            CapacityError {
                id: 101,
                capacity: 100
            }
        );
        assert!(table.activate(0).is_err());
        assert!(table.activate(100).is_ok());
    }

    #[test]
    fn test_deactivate_keeps_baseline() {
        let mut table: SlabTable<SlabStat> = SlabTable::new(10);
        table
            .activate(2)
            .unwrap()
            .apply(SlabField::CmdSet, 40, 0);
        table.deactivate_all();
        assert!(table.get(2).is_none());
        assert_eq!(table.active_count(), 0);
        let kept = table.get_any(2).unwrap();
        assert_eq!(kept.set.previous_value, Some(40));

        table
            .activate(2)
            .unwrap()
            .apply(SlabField::CmdSet, 60, 2000);
        assert_eq!(table.get(2).unwrap().set.rate, 10.0);
    }

    #[test]
    fn test_active_ids_sorted() {
        let mut table: SlabTable<SlabStat> = SlabTable::new(100);
        for id in [9, 1, 42, 3] {
            table.activate(id).unwrap();
        }
        assert_eq!(table.active_ids().collect::<Vec<_>>(), vec![1, 3, 9, 42]);
    }

    #[test]
    fn test_wasted_bytes() {
        let slab = SlabStat {
            total_pages: 2,
            mem_requested: 1024 * 1024,
            ..SlabStat::default()
        };
        assert_eq!(slab.wasted_bytes(1024 * 1024), 1024 * 1024);

        let over = SlabStat {
            total_pages: 1,
            mem_requested: 2 * 1024 * 1024,
            ..SlabStat::default()
        };
        assert_eq!(over.wasted_bytes(1024 * 1024), 0);
    }

    #[test]
    fn test_hit_ratio() {
        let mut snapshot = Snapshot::new("localhost", 11211, 100);
        assert_eq!(snapshot.global.hit_ratio(), None);
        snapshot.global.apply(GlobalField::CmdGet, 200, 0);
        snapshot.global.apply(GlobalField::GetHits, 150, 0);
        assert_eq!(snapshot.global.hit_ratio(), Some(0.75));
    }

    #[test]
    fn test_cycle_baseline() {
        let mut snapshot = Snapshot::new("localhost", 11211, 100);
        snapshot.begin_cycle(0);
        assert_eq!(snapshot.global.time_prev, None);
        snapshot.global.apply(GlobalField::CmdGet, 100, snapshot.global.time);
        snapshot.end_cycle();

        snapshot.begin_cycle(5000);
        assert_eq!(snapshot.global.time_prev, Some(0));
        snapshot.global.apply(GlobalField::CmdGet, 150, snapshot.global.time);
        snapshot.end_cycle();
        assert_eq!(snapshot.global.get.rate, 10.0);
        assert_eq!(snapshot.global.time_prev, Some(5000));
    }

    #[test]
    fn test_version_default_and_update() {
        let mut snapshot = Snapshot::new("cache-1", 11311, 100);
        assert_eq!(snapshot.global.version, "N/A");
        snapshot.global.set_version("1.6.21");
        assert_eq!(snapshot.global.version, "1.6.21");
        assert_eq!(snapshot.global.server, "cache-1");
        assert_eq!(snapshot.global.port, 11311);
    }
}
