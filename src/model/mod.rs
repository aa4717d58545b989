//! Metric data model.

mod fields;
mod snapshot;

pub use fields::{GlobalField, ItemField, SlabField};
pub use snapshot::{
    CapacityError, GlobalStat, ItemStat, SlabSlot, SlabStat, SlabTable, Snapshot,
};
