//! Offline stats source serving pre-captured replies.
//!
//! Useful for demos and for testing the pipeline without a server. Every
//! fetch returns the same reply for a given command.

use std::path::{Path, PathBuf};

use super::traits::{StatsCommand, StatsSource, TransportError};

/// File names looked up by [`ReplaySource::from_dir`].
pub const GENERAL_FILE: &str = "stats.txt";
pub const SLABS_FILE: &str = "stats_slabs.txt";
pub const ITEMS_FILE: &str = "stats_items.txt";

/// Serves three fixed reply blobs.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    general: String,
    slabs: String,
    items: String,
    origin: Option<PathBuf>,
}

impl ReplaySource {
    /// Creates a source from in-memory replies.
    pub fn new(
        general: impl Into<String>,
        slabs: impl Into<String>,
        items: impl Into<String>,
    ) -> Self {
        Self {
            general: general.into(),
            slabs: slabs.into(),
            items: items.into(),
            origin: None,
        }
    }

    /// Loads `stats.txt`, `stats_slabs.txt` and `stats_items.txt` from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TransportError> {
        let dir = dir.as_ref();
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| TransportError::Replay { path, source })
        };
        Ok(Self {
            general: read(GENERAL_FILE)?,
            slabs: read(SLABS_FILE)?,
            items: read(ITEMS_FILE)?,
            origin: Some(dir.to_path_buf()),
        })
    }

    /// Replaces the reply for one command, e.g. to simulate a later cycle.
    pub fn set_reply(&mut self, command: StatsCommand, reply: impl Into<String>) {
        let slot = match command {
            StatsCommand::General => &mut self.general,
            StatsCommand::Slabs => &mut self.slabs,
            StatsCommand::Items => &mut self.items,
        };
        *slot = reply.into();
    }
}

impl StatsSource for ReplaySource {
    fn fetch(&mut self, command: StatsCommand) -> Result<String, TransportError> {
        Ok(match command {
            StatsCommand::General => self.general.clone(),
            StatsCommand::Slabs => self.slabs.clone(),
            StatsCommand::Items => self.items.clone(),
        })
    }

    fn describe(&self) -> String {
        match &self.origin {
            Some(dir) => format!("replay://{}", dir.display()),
            None => "replay://memory".to_string(),
        }
    }
}
