//! Global tracing subscriber for the command-line viewer
//!
//! Filtering follows `RUST_LOG` and defaults to `warn`. Output goes to the
//! log file when one is given, otherwise to stderr so stdout stays clean
//! for token dumps.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Fails only if the log file cannot be
/// created; a subscriber installed earlier is left in place.
pub fn init_global(log_file: Option<&Path>) -> io::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter());
    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true),
                )
                .try_init()
        }
        None => registry
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }
    tracing::debug!(log_file = ?log_file, "tracing initialized");
    Ok(())
}
