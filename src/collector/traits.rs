//! Abstraction over where raw stats replies come from.
//!
//! The `StatsSource` trait lets the collector read from a live server over
//! TCP or from pre-captured replies for offline use and testing.

use std::io;
use std::path::PathBuf;

/// One of the three requests issued per refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsCommand {
    /// `stats` - server-wide counters.
    General,
    /// `stats slabs` - per-slab allocation data.
    Slabs,
    /// `stats items` - per-slab item and eviction data.
    Items,
}

impl StatsCommand {
    /// Order in which a refresh fetches and applies the replies.
    pub const REFRESH_ORDER: [StatsCommand; 3] =
        [StatsCommand::Slabs, StatsCommand::Items, StatsCommand::General];

    /// Protocol text of the command, without line terminator.
    pub fn as_str(self) -> &'static str {
        match self {
            StatsCommand::General => "stats",
            StatsCommand::Slabs => "stats slabs",
            StatsCommand::Items => "stats items",
        }
    }
}

impl std::fmt::Display for StatsCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to obtain a reply. Fatal for the dashboard.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("cannot resolve {addr}: {source}")]
    Resolve {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("{addr} resolved to no addresses")]
    NoAddress { addr: String },
    #[error("cannot connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("sending `{command}` failed: {source}")]
    Send {
        command: StatsCommand,
        #[source]
        source: io::Error,
    },
    #[error("reading reply to `{command}` failed: {source}")]
    Receive {
        command: StatsCommand,
        #[source]
        source: io::Error,
    },
    #[error("connection closed before END in reply to `{command}`")]
    UnexpectedEof { command: StatsCommand },
    #[error("server rejected `{command}`: {reply}")]
    Server { command: StatsCommand, reply: String },
    #[error("cannot read replay file {}: {source}", path.display())]
    Replay {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Source of raw stats replies.
pub trait StatsSource {
    /// Issues `command` and returns the whole reply text.
    fn fetch(&mut self, command: StatsCommand) -> Result<String, TransportError>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

impl<S: StatsSource + ?Sized> StatsSource for Box<S> {
    fn fetch(&mut self, command: StatsCommand) -> Result<String, TransportError> {
        (**self).fetch(command)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
