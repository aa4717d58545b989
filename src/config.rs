//! Runtime settings shared by the collector, the view layer and the TUI.

use std::time::Duration;

/// Default memcached host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default memcached port.
pub const DEFAULT_PORT: u16 = 11211;
/// Default refresh interval in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 5;
/// Default number of slab rows on one screen.
pub const DEFAULT_PAGE_CAPACITY: usize = 20;
/// Default upper bound for slab ids tracked in the snapshot.
pub const DEFAULT_SLAB_CAPACITY: usize = 100;
/// Slab page size used by memcached (1 MiB).
pub const DEFAULT_PAGE_SIZE: u64 = 1024 * 1024;
/// Eviction ages below this many seconds are highlighted.
pub const DEFAULT_EVICT_AGE_WARN: u64 = 1000;

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server host name or address.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
    /// Time between two data refreshes.
    pub refresh: Duration,
    /// Maximum slab rows rendered per draw.
    pub page_capacity: usize,
    /// Highest slab id the snapshot accepts.
    pub slab_capacity: usize,
    /// Bytes per slab page, used for the WASTED column.
    pub page_size: u64,
    /// Eviction age (seconds) under which a row is flagged.
    pub evict_age_warn: u64,
    /// Bounded wait for a key press between draws.
    pub poll_interval: Duration,
    /// Connect/read/write timeout for the TCP source.
    pub io_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            refresh: Duration::from_secs(DEFAULT_REFRESH_SECS),
            page_capacity: DEFAULT_PAGE_CAPACITY,
            slab_capacity: DEFAULT_SLAB_CAPACITY,
            page_size: DEFAULT_PAGE_SIZE,
            evict_age_warn: DEFAULT_EVICT_AGE_WARN,
            poll_interval: Duration::from_millis(150),
            io_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    /// Refresh interval in whole seconds, as shown in the header.
    pub fn refresh_secs(&self) -> u64 {
        self.refresh.as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 11211);
        assert_eq!(config.refresh_secs(), 5);
        assert_eq!(config.page_capacity, 20);
        assert_eq!(config.slab_capacity, 100);
        assert_eq!(config.page_size, 1_048_576);
    }
}
