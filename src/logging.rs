//! Logging setup.
//!
//! The filter comes from `PASSWORD_GRID_LOG` (default `warn`). The
//! interactive screen owns stdout and stderr, so it only logs when given a
//! file; the one-shot modes log to stderr.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const FILTER_ENV: &str = "PASSWORD_GRID_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Send logs to `path`, truncating it.
pub fn init_file(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(filter())
        .init();

    tracing::info!(log_file = ?path, "logging initialized");
    Ok(())
}

pub fn init_stderr() {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter())
        .init();
}
