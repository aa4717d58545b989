//! Main TUI application.

use std::io;
use std::time::Instant;

use tracing::{info, warn};

use crate::collector::{Collector, StatsSource, TransportError};
use crate::config::Config;
use crate::model::Snapshot;
use crate::view::{RenderModel, build_slab_view};

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;
use super::terminal::TerminalSession;

/// Fatal dashboard errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// Wall-clock time in milliseconds since the Unix epoch.
fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Main TUI application.
pub struct App {
    collector: Collector<Box<dyn StatsSource>>,
    snapshot: Snapshot,
    state: AppState,
    config: Config,
}

impl App {
    /// Creates a new App reading from `source`.
    pub fn new(source: Box<dyn StatsSource>, config: Config) -> Self {
        Self {
            collector: Collector::new(source),
            snapshot: Snapshot::new(&config.host, config.port, config.slab_capacity),
            state: AppState::new(config.page_capacity),
            config,
        }
    }

    /// Runs the dashboard until the user quits or a refresh fails.
    ///
    /// The terminal is restored before this returns, on every path.
    pub fn run(mut self) -> Result<(), AppError> {
        let mut session = TerminalSession::enter()?;
        let events = EventHandler::new(self.config.poll_interval);
        info!(
            source = %self.collector.source().describe(),
            refresh_secs = self.config.refresh_secs(),
            "dashboard started"
        );

        loop {
            let now = Instant::now();
            if self.state.refresh_due(now, self.config.refresh) {
                self.load(now_ms()).inspect_err(|e| warn!(error = %e, "refresh failed"))?;
                self.state.last_refresh = Some(now);
            }

            let model = self.render_model();
            session
                .terminal_mut()
                .draw(|frame| render(frame, &model))?;

            match events.next()? {
                Event::Key(key) => {
                    if self.apply_key(handle_key(key)) {
                        break;
                    }
                }
                Event::Tick | Event::Resize => {}
            }
        }

        info!("dashboard stopped");
        Ok(())
    }

    /// Refreshes the snapshot at `now_ms` and moves the page window.
    pub fn load(&mut self, now_ms: i64) -> Result<(), TransportError> {
        self.collector.refresh(&mut self.snapshot, now_ms)?;
        self.state.pager.advance(self.snapshot.slabs.capacity());
        Ok(())
    }

    /// Builds the cells for the next draw.
    pub fn render_model(&mut self) -> RenderModel {
        let active = self.snapshot.active_slab_ids();
        let window = self.state.pager.window(&active);
        build_slab_view(&self.snapshot, &window, self.state.show_rates, &self.config)
    }

    /// Applies a key action; returns true when the app should quit.
    pub fn apply_key(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Quit => true,
            KeyAction::ToggleRates => {
                self.state.toggle_rates();
                false
            }
            KeyAction::None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::ReplaySource;
    use crate::view::{CellStyle, Column};

    /// `count` active slabs with ids 1..=count.
    fn slabs_reply(count: u32) -> String {
        let mut text = String::new();
        for id in 1..=count {
            text.push_str(&format!("STAT {id}:chunk_size {}\r\n", 96 + id * 8));
            text.push_str(&format!("STAT {id}:total_pages 1\r\n"));
        }
        text.push_str("END\r\n");
        text
    }

    fn app_with(slabs: u32) -> App {
        let source = ReplaySource::new(
            "STAT version 1.6.21\r\nSTAT cmd_get 0\r\nEND\r\n",
            slabs_reply(slabs),
            "END\r\n",
        );
        App::new(Box::new(source), Config::default())
    }

    fn first_slab(model: &RenderModel) -> String {
        model
            .cells
            .iter()
            .filter(|c| c.column == Column::Slab && c.style == CellStyle::Normal)
            .map(|c| c.text.clone())
            .next()
            .unwrap_or_default()
    }

    #[test]
    fn test_page_rotates_on_each_load() {
        let mut app = app_with(45);
        app.load(0).unwrap();
        assert_eq!(first_slab(&app.render_model()), "1");

        app.load(5_000).unwrap();
        assert_eq!(first_slab(&app.render_model()), "21");

        app.load(10_000).unwrap();
        assert_eq!(first_slab(&app.render_model()), "41");

        app.load(15_000).unwrap();
        assert_eq!(first_slab(&app.render_model()), "1");
    }

    #[test]
    fn test_redraw_without_load_keeps_page() {
        let mut app = app_with(25);
        app.load(0).unwrap();
        app.render_model();
        app.load(5_000).unwrap();
        let a = app.render_model();
        let b = app.render_model();
        assert_eq!(a, b);
        assert_eq!(first_slab(&a), "21");
    }

    #[test]
    fn test_toggle_rates_and_quit() {
        let mut app = app_with(1);
        assert!(!app.apply_key(KeyAction::ToggleRates));
        assert!(app.state.show_rates);
        assert!(!app.apply_key(KeyAction::None));
        assert!(app.apply_key(KeyAction::Quit));
    }

    #[test]
    fn test_load_fills_snapshot() {
        let mut app = app_with(3);
        app.load(0).unwrap();
        assert_eq!(app.snapshot.active_slab_ids(), vec![1, 2, 3]);
        assert_eq!(app.snapshot.global.version, "1.6.21");
    }
}
