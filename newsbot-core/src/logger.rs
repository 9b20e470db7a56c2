//! Tracing setup for the bot process: plain-text lines on stdout and in an append-only log file.
//!
//! Line format: `YYYY-MM-DD HH:MM:SS LEVEL target: message key=value ...`.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::format::{FmtSpan, Writer};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Used when `RUST_LOG` is unset. Connection pools and HTTP clients are noisy at `info`.
pub const DEFAULT_FILTER: &str = "info,sqlx=warn,hyper=warn,reqwest=warn";

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Opens `path` for appending, creating it and its parent directory if needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)?,
        _ => {}
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Fails if the log file cannot be opened or a subscriber is
/// already set. Load `.env` before calling so `RUST_LOG` is honoured.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    let file = Arc::new(open_log_file(Path::new(log_file_path))?);

    let format = tracing_subscriber::fmt::format()
        .with_timer(LocalTime)
        .with_target(true)
        .with_thread_ids(false);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout.and(file))
        .event_format(format)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false);

    Registry::default()
        .with(env_filter())
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}
