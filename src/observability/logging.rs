//! Tracing setup for the CLI: JSON lines into a daily file under `logs/`,
//! readable text on stdout. `RUST_LOG` replaces the default filter.

use crate::common::constants::{DEFAULT_LOG_FILTER, LOG_DIR, LOG_FILE_PREFIX};
use crate::common::error::Result;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. Hold the returned guard until exit or the
/// tail of the file log is lost.
pub fn init_logging() -> Result<WorkerGuard> {
    fs::create_dir_all(LOG_DIR)?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(LOG_DIR, LOG_FILE_PREFIX));

    tracing_subscriber::registry()
        .with(env_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_target(true).with_writer(std::io::stdout))
        .init();

    Ok(guard)
}

/// Filter from `RUST_LOG`, falling back to the crate default when unset or invalid.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
