//! Application state management.

use std::time::{Duration, Instant};

use crate::view::Pager;

/// Mutable UI state carried across loop iterations.
#[derive(Debug)]
pub struct AppState {
    /// Counter columns show per-second rates instead of raw values.
    pub show_rates: bool,
    pub pager: Pager,
    /// When data was last loaded; `None` before the first refresh.
    pub last_refresh: Option<Instant>,
}

impl AppState {
    pub fn new(page_capacity: usize) -> Self {
        Self {
            show_rates: false,
            pager: Pager::new(page_capacity),
            last_refresh: None,
        }
    }

    pub fn toggle_rates(&mut self) {
        self.show_rates = !self.show_rates;
    }

    /// True once `interval` has passed since the last refresh.
    pub fn refresh_due(&self, now: Instant, interval: Duration) -> bool {
        match self.last_refresh {
            Some(last) => now.saturating_duration_since(last) >= interval,
            None => true,
        }
    }
}
