//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The libraries only emit events; this module installs the subscriber that
//! prints them.
//!
//! # Log Levels
//!
//! - `error`: failed commands
//! - `warn`: rejected store actions
//! - `info`: architecture switches, simulation start and end
//! - `debug`: every store action
//! - `trace`: per-epoch training progress
//!
//! `RUST_LOG` replaces the computed filter unless `-v`, `-q` or
//! `--log-level` was given explicitly.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Crates whose events follow the configured level.
const WORKSPACE_TARGETS: [&str; 5] = [
    "nnviz_cli",
    "nnviz_store",
    "nnviz_engine",
    "nnviz_catalog",
    "nnviz_model",
];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Most verbose level that is printed. `OFF` silences everything.
    pub level_filter: LevelFilter,
    /// Whether `RUST_LOG` may override `level_filter`.
    pub use_env_filter: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// When set, logs are appended to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field format.
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
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    /// Filter directives used when `RUST_LOG` does not apply.
    pub fn directives(&self) -> String {
        let level = self.level_filter.to_string().to_lowercase();
        let mut directives = vec![level.clone()];
        directives.extend(
            WORKSPACE_TARGETS
                .iter()
                .map(|target| format!("{target}={level}")),
        );
        directives.join(",")
    }
}

/// Initialize the global tracing subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, Mutex::new(file));
    } else {
        init_logging_with_writer(config, io::stderr);
    }
    Ok(())
}

fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(build_env_filter(config));
    match config.format {
        LogFormat::Json => registry.with(fmt::layer().json().with_writer(writer)).init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_target(false)
                    .with_ansi(config.with_ansi)
                    .with_writer(writer),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .without_time()
                    .with_target(false)
                    .with_ansi(config.with_ansi)
                    .with_writer(writer),
            )
            .init(),
    }
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(config.directives())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_every_workspace_crate() {
        let config = LogConfig::default().with_level_filter(LevelFilter::DEBUG);
        assert_eq!(
            config.directives(),
            "debug,nnviz_cli=debug,nnviz_store=debug,nnviz_engine=debug,\
             nnviz_catalog=debug,nnviz_model=debug"
        );
    }

    #[test]
    fn off_silences_everything() {
        let config = LogConfig::default().with_level_filter(LevelFilter::OFF);
        assert!(config.directives().starts_with("off,"));
    }

    // Installs the global subscriber; keep it the only test that does.
    #[test]
    fn log_file_receives_json_events() {
        let path = std::env::temp_dir().join(format!("nnviz-log-{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let config = LogConfig {
            use_env_filter: false,
            with_ansi: false,
            format: LogFormat::Json,
            log_file: Some(path.clone()),
            ..LogConfig::default()
        };
        init_logging(&config).unwrap();

        tracing::warn!(action = "reorder_layers", "action rejected");
        tracing::info!("below the warn level");

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(text.contains("action rejected"));
        assert!(text.contains("reorder_layers"));
        assert!(!text.contains("below the warn level"));
    }
}
