//! Logging setup for the application.

use crate::config::{AppConfig, GlobalLogLevel, ProgressLogLevel};
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Module whose records carry the per-invocation progress lines.
pub const PROGRESS_MODULE: &str = "shader_forge_app::progress";

impl From<GlobalLogLevel> for LevelFilter {
    fn from(level: GlobalLogLevel) -> Self {
        match level {
            GlobalLogLevel::Trace => Self::Trace,
            GlobalLogLevel::Debug => Self::Debug,
            GlobalLogLevel::Info => Self::Info,
            GlobalLogLevel::Warn => Self::Warn,
            GlobalLogLevel::Error => Self::Error,
        }
    }
}

impl From<ProgressLogLevel> for LevelFilter {
    fn from(level: ProgressLogLevel) -> Self {
        match level {
            ProgressLogLevel::Trace => Self::Trace,
            ProgressLogLevel::Debug => Self::Debug,
            ProgressLogLevel::Info => Self::Info,
            ProgressLogLevel::Warn => Self::Warn,
        }
    }
}

/// Builds the logger from `RUST_LOG` and the command line.
///
/// `--log-level` sets the global filter; the progress module is filtered
/// separately by `--progress-log-level` so per-shader lines can be silenced
/// or promoted independently.
pub fn logger_builder(config: &AppConfig) -> Builder {
    let env = Env::default().filter_or("RUST_LOG", "info");
    let mut builder = Builder::from_env(env);
    builder.filter_level(config.log_level.into());
    builder.filter_module(PROGRESS_MODULE, config.progress_log_level.into());
    builder
}

/// Initializes the global logger. Later calls are ignored.
pub fn init_logger(config: &AppConfig) {
    if logger_builder(config).try_init().is_err() {
        return;
    }

    log::debug!(
        "Logger initialized with global log level: {:?}, progress log level: {:?}",
        config.log_level,
        config.progress_log_level
    );
}
