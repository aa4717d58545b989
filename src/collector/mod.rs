//! Stats collection for memcached-compatible servers.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │                 Collector                  │
//! │   stats slabs → stats items → stats        │
//! │                                            │
//! │   ┌──────────┐      ┌──────────────────┐   │
//! │   │  parser  │ ───▶ │ apply → Snapshot │   │
//! │   └────▲─────┘      └──────────────────┘   │
//! │        │                                   │
//! │   ┌────┴────────┐                          │
//! │   │ StatsSource │ (trait)                  │
//! │   └────┬────────┘                          │
//! └────────┼───────────────────────────────────┘
//!          │
//!    ┌─────┴──────────┐
//!    │                │
//! ┌──▼────────┐ ┌─────▼────────┐
//! │ TcpSource │ │ ReplaySource │
//! │ (live)    │ │ (offline)    │
//! └───────────┘ └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use mcslab::collector::{Collector, ReplaySource};
//! use mcslab::model::Snapshot;
//!
//! let source = ReplaySource::new(
//!     "STAT cmd_get 10\r\nEND\r\n",
//!     "STAT 1:chunk_size 96\r\nEND\r\n",
//!     "STAT items:1:number 3\r\nEND\r\n",
//! );
//! let mut collector = Collector::new(source);
//! let mut snapshot = Snapshot::new("localhost", 11211, 100);
//! collector.refresh(&mut snapshot, 0).unwrap();
//! assert_eq!(snapshot.active_slab_ids(), vec![1]);
//! ```

mod apply;
#[allow(clippy::module_inception)]
mod collector;
pub mod parser;
pub mod replay;
pub mod tcp;
pub mod traits;

pub use apply::{ApplyStats, apply_reply};
pub use collector::{Collector, RefreshTiming};
pub use replay::ReplaySource;
pub use tcp::TcpSource;
pub use traits::{StatsCommand, StatsSource, TransportError};
