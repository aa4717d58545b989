//! mcslab - live slab dashboard for memcached-compatible servers.
//!
//! Usage:
//!   mcslab                          # localhost:11211, refresh every 5s
//!   mcslab -s cache01 -p 11212 -r 2
//!   mcslab -m 40                    # up to 40 slab rows per screen
//!   mcslab --replay ./captured      # offline, from stats*.txt files

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use clap::builder::RangedU64ValueParser;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use mcslab::collector::{ReplaySource, StatsSource, TcpSource};
use mcslab::config::{
    Config, DEFAULT_HOST, DEFAULT_PAGE_CAPACITY, DEFAULT_PORT, DEFAULT_REFRESH_SECS,
};
use mcslab::tui::App;

/// Live slab statistics for memcached-compatible servers.
#[derive(Parser, Debug)]
#[command(
    name = "mcslab",
    about = "Live slab dashboard for memcached",
    version,
    disable_version_flag = true
)]
struct Args {
    /// Refresh interval in seconds.
    #[arg(short, long, default_value_t = DEFAULT_REFRESH_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    refresh: u64,

    /// Server host name or address.
    #[arg(short, long, default_value = DEFAULT_HOST)]
    server: String,

    /// Server port.
    #[arg(short, long, default_value_t = DEFAULT_PORT, value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,

    /// Maximum slab rows per screen.
    #[arg(short, long, default_value_t = DEFAULT_PAGE_CAPACITY, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    max_slabs: usize,

    /// Read replies from stats.txt, stats_slabs.txt and stats_items.txt
    /// in DIR instead of connecting.
    #[arg(long, value_name = "DIR")]
    replay: Option<PathBuf>,

    /// Write logs to this file (no logging otherwise).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log level for --log-file.
    #[arg(long, default_value = "info")]
    log_level: Level,

    /// Connect/read/write timeout in seconds.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Print version.
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            host: self.server.clone(),
            port: self.port,
            refresh: Duration::from_secs(self.refresh),
            page_capacity: self.max_slabs,
            io_timeout: Duration::from_secs(self.timeout),
            ..Config::default()
        }
    }
}

/// Directives from `RUST_LOG` when set, otherwise `mcslab=<level>`.
fn log_filter(level: Level, rust_log: Option<&str>) -> Result<EnvFilter, ParseError> {
    match rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives),
        None => EnvFilter::try_new(format!("mcslab={}", level.as_str().to_lowercase())),
    }
}

/// Sends tracing output to `path`; the terminal belongs to the dashboard.
fn init_logging(
    path: &Path,
    level: Level,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(level, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        if let Err(e) = init_logging(path, args.log_level) {
            eprintln!("Error: cannot open log file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }

    let config = args.config();
    let source: Box<dyn StatsSource> = match args.replay {
        Some(ref dir) => match ReplaySource::from_dir(dir) {
            Ok(source) => Box::new(source),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Box::new(TcpSource::new(
            config.host.clone(),
            config.port,
            config.io_timeout,
        )),
    };

    if let Err(e) = App::new(source, config).run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
