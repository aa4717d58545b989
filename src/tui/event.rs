//! Event polling for the TUI.
//!
//! Polls the terminal on the calling thread with a bounded timeout so the
//! main loop stays responsive without a background thread.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Poll timeout elapsed without input.
    Tick,
    /// Key press.
    Key(KeyEvent),
    /// Terminal resize; the next draw picks up the new size.
    Resize,
}

/// Waits up to `tick_rate` for one terminal event.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Returns the next event, or [`Event::Tick`] after the timeout.
    pub fn next(&self) -> io::Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }
        Ok(match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Resize(_, _) => Event::Resize,
            _ => Event::Tick,
        })
    }
}
