//! Logging Infrastructure

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logger.
///
/// `RUST_LOG` takes precedence over `level`. With `log_dir` the output goes
/// to a daily rolling `panel.<date>` file there (the directory is created
/// when missing), otherwise to stderr so it does not mix with rendered
/// pages. `json_format` switches either destination to one JSON object per
/// line.
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let file = match log_dir {
        Some(dir) => Some(Mutex::new(tracing_appender::rolling::daily(
            prepare_log_dir(dir)?,
            "panel",
        ))),
        None => None,
    };

    match (file, json_format) {
        (Some(file), true) => registry
            .with(fmt::layer().json().with_current_span(true).with_writer(file))
            .init(),
        (Some(file), false) => registry
            .with(fmt::layer().with_ansi(false).with_target(false).with_writer(file))
            .init(),
        (None, true) => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        (None, false) => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
    }
    Ok(())
}

fn prepare_log_dir(dir: &Path) -> anyhow::Result<&Path> {
    fs::create_dir_all(dir)
        .map_err(|e| anyhow::anyhow!("cannot create log directory {}: {}", dir.display(), e))?;
    Ok(dir)
}
