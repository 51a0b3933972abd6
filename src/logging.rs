// src/logging.rs
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::core::LoggingConfig;

/// `RUST_LOG` wins over the configured level
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log directive: {}", level)),
    }
}

/// Install the global subscriber: JSON or plain lines to the configured file
/// (truncated on startup), otherwise plain lines on stderr.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level)?;

    let result = match &config.file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true) // Clear file on startup
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;

            if config.json {
                tracing_subscriber::registry()
                    .with(
                        fmt::layer()
                            .json()
                            .with_writer(Mutex::new(file))
                            .with_current_span(false)
                            .with_span_list(false),
                    )
                    .with(filter)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                    .with(filter)
                    .try_init()
            }
        }
        None if config.json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .try_init(),
        None => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .try_init(),
    };

    result.context("Failed to install tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_configured_directives() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(build_filter("info").is_ok());
        assert!(build_filter("cvdraft=debug,sqlx=warn").is_ok());
    }
}
