//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! The engine crates only emit `tracing` events; this module installs the
//! subscriber for the `tablekit` binary.
//!
//! # Log Levels
//!
//! - `warn`: contained validator failures, ragged input rows
//! - `info`: files loaded, commands completed
//! - `debug`: sort transitions, filter changes, submit outcomes
//! - `trace`: per-field validation results
//!
//! # Usage
//!
//! ```ignore
//! use tablekit_cli::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::default().with_level(LevelFilter::DEBUG);
//! init_logging(&config).expect("init logging");
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Crates whose events follow the configured level.
const OWN_CRATES: &[&str] = &[
    "tablekit_cli",
    "tablekit_form",
    "tablekit_ingest",
    "tablekit_model",
    "tablekit_table",
];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level for tablekit crates.
    pub level_filter: LevelFilter,
    /// Whether `RUST_LOG` may override `level_filter`.
    pub use_env_filter: bool,
    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    /// Output format.
    pub format: LogFormat,
    /// Optional log file path. When set, logs are appended to the file.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Set the level filter directly.
    #[must_use]
    pub fn with_level(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn with_timestamps(mut self, enable: bool) -> Self {
        self.with_timestamps = enable;
        self
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    /// Set output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log file path (writes to stderr when None).
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// The filter directive string used when `RUST_LOG` does not apply.
    pub fn directives(&self) -> String {
        let level = self.level_filter.to_string().to_lowercase();
        let mut directives = vec!["warn".to_string()];
        directives.extend(OWN_CRATES.iter().map(|name| format!("{name}={level}")));
        directives.join(",")
    }
}

/// Install the global tracing subscriber for the `tablekit` binary.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            fmt_layer(config, Mutex::new(file))
        }
        None => fmt_layer(config, io::stderr),
    };
    tracing_subscriber::registry()
        .with(layer.with_filter(build_env_filter(config)))
        .init();
    Ok(())
}

/// The formatting layer for `config`, writing through `writer`.
fn fmt_layer<W>(config: &LogConfig, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.with_ansi && config.log_file.is_none())
        .with_target(config.with_target);
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, true) => layer.json().boxed(),
        (LogFormat::Json, false) => layer.json().without_time().boxed(),
        (LogFormat::Compact, true) => layer.compact().boxed(),
        (LogFormat::Compact, false) => layer.compact().without_time().boxed(),
        (LogFormat::Pretty, true) => layer.boxed(),
        (LogFormat::Pretty, false) => layer.without_time().boxed(),
    }
}

/// Build an `EnvFilter`, letting `RUST_LOG` win when allowed.
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    // External crates stay at warn level to reduce noise
    EnvFilter::new(config.directives())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_cover_own_crates() {
        let config = LogConfig::default().with_level(LevelFilter::DEBUG);
        let directives = config.directives();
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("tablekit_table=debug"));
        assert!(directives.contains("tablekit_form=debug"));
    }

    #[test]
    fn test_layer_builds_for_every_format() {
        for format in [LogFormat::Pretty, LogFormat::Compact, LogFormat::Json] {
            for timestamps in [true, false] {
                let config = LogConfig::default()
                    .with_format(format)
                    .with_timestamps(timestamps);
                let layer = fmt_layer(&config, io::sink);
                let _ = layer.with_filter(build_env_filter(&config));
            }
        }
    }

    #[test]
    fn test_off_level_directive() {
        let config = LogConfig::default().with_level(LevelFilter::OFF);
        assert!(config.directives().contains("tablekit_cli=off"));
    }
}
