//! Side channel for the logger's own problems.
//!
//! Runtime I/O failures (a failed rotation, a failed write) never reach the
//! code that called `info` or `error`. They are emitted as `tracing` events
//! instead. Applications that want to see them can install a stderr
//! subscriber with [`init_diagnostics`], or route the crate's events through
//! their own subscriber.

use crate::{Error, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global `tracing` subscriber printing this crate's diagnostics
/// to stderr at `level` and above. `RUST_LOG` overrides `level`.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is
/// already installed.
pub fn init_diagnostics(level: &str) -> Result<()> {
    let spec = effective_filter_spec(level, std::env::var("RUST_LOG").ok());
    let env_filter = EnvFilter::try_new(&spec).map_err(|e| Error::Init(e.to_string()))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Init(e.to_string()))?;

    Ok(())
}

/// Determine the filter, letting a non-empty `RUST_LOG` win.
fn effective_filter_spec(level: &str, rust_log: Option<String>) -> String {
    if let Some(rust_log) = rust_log
        && !rust_log.is_empty()
    {
        return rust_log;
    }

    if level.is_empty() {
        "rotalog=warn".to_string()
    } else {
        format!("rotalog={}", level)
    }
}
