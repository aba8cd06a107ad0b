//! ---
//! exo_section: "01-core-functionality"
//! exo_subsection: "module"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "Shared primitives and utilities for the telemetry runtime."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
use anyhow::Result;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_appender::rolling::daily;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

const LOG_ENV: &str = "EXOGRID_LOG";

static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();
static STDERR_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

/// Available console log formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    StructuredJson,
    #[default]
    Pretty,
}

/// Initialize the tracing subscriber based on configuration and environment variables.
///
/// * `EXOGRID_LOG` overrides the filter (e.g. `info`, `exogrid_sim=debug`). When unset
///   `RUST_LOG` is honoured, finally defaulting to `warn`.
/// * Console output goes to stderr so generated documents on stdout stay clean.
/// * With `file_output` enabled a daily rolling JSON log is written under `directory`.
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Result<()> {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(directive).unwrap_or_else(|err| {
            eprintln!(
                "invalid {} directive ({}); defaulting to warn logging",
                LOG_ENV, err
            );
            EnvFilter::new("warn")
        }),
        Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let (stderr_writer, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    let _ = STDERR_GUARD.set(stderr_guard);

    let console_layer = match config.format {
        LogFormat::StructuredJson => fmt::layer()
            .with_target(false)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .json()
            .with_writer(stderr_writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(stderr_writer)
            .boxed(),
    };

    let file_layer = if config.file_output {
        std::fs::create_dir_all(&config.directory)?;
        let prefix = config
            .file_prefix
            .clone()
            .unwrap_or_else(|| service_name.to_owned());
        let file_appender = daily(
            &config.directory,
            format!("{}-{}.log", prefix, service_name),
        );
        let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
        let _ = FILE_GUARD.set(file_guard);
        Some(
            fmt::layer()
                .with_target(true)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .json()
                .with_writer(file_writer)
                .boxed(),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .ok();

    info!(
        service = %service_name,
        format = ?config.format,
        file_output = config.file_output,
        "tracing initialised"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_uses_kebab_case() {
        let format: LogFormat = parse_format("\"structured-json\"");
        assert_eq!(format, LogFormat::StructuredJson);
    }

    fn parse_format(raw: &str) -> LogFormat {
        #[derive(Deserialize)]
        struct Wrapper {
            format: LogFormat,
        }
        let wrapper: Wrapper = toml::from_str(&format!("format = {raw}")).unwrap();
        wrapper.format
    }

    #[test]
    fn init_with_file_output_creates_directory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = LoggingConfig {
            directory: dir.path().join("logs"),
            file_output: true,
            ..LoggingConfig::default()
        };
        init_tracing("exogrid-test", &config)?;
        assert!(config.directory.is_dir());
        Ok(())
    }
}
