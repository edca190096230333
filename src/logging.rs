// src/logging.rs
//! Tracing subscriber setup shared by the server and the CLI

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

pub const DEFAULT_FILTER: &str = "portfolio_generator=info,folio=info,rocket=warn";
pub const LOG_FILE_VAR: &str = "FOLIO_LOG_FILE";

/// Human-readable output on stderr; JSON lines to `FOLIO_LOG_FILE` when set
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json_layer = match std::env::var(LOG_FILE_VAR) {
        Ok(path) if !path.trim().is_empty() => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_current_span(true)
                    .with_span_list(false),
            )
        }
        _ => None,
    };

    Registry::default()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(json_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
