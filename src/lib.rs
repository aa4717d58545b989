//! mcslab - live slab dashboard for memcached-compatible servers.
//!
//! Provides:
//! - `collector` - stats sources (TCP, replay) and the protocol text parser
//! - `model` - the long-lived metric snapshot (global, per-slab, per-item)
//! - `rates` - per-second rate derivation for counters
//! - `view` - pagination and the backend-agnostic render model
//! - `fmt` - formatting helpers (bytes, rates, ratios)
//! - `config` - runtime settings shared by every layer
//! - `tui` - ratatui/crossterm backend and the main loop

pub mod collector;
pub mod config;
pub mod fmt;
pub mod model;
pub mod rates;
pub mod tui;
pub mod view;
