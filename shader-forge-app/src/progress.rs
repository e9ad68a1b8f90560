// shader-forge-app/src/progress.rs

use crate::config::ProgressLogLevel;
use anyhow::Result;
use shader_forge_core::{BuildReport, InvocationOutcome, ProgressInfo};

/// Trait for reporting the progress of a shader build.
///
/// Implementors receive one call per finished compiler invocation and a final
/// call once the build is over.
pub trait ProgressReporter: Send + Sync {
    /// Called after each compiler invocation.
    fn report(&mut self, info: &ProgressInfo) -> Result<()>;

    /// Called when every invocation has run, whatever their outcome.
    fn finish(&mut self, report: &BuildReport) -> Result<()>;

    /// Called when the build is aborted before it could run.
    fn fail(&mut self, error: &anyhow::Error) -> Result<()>;
}

/// Formats the progress line for one finished invocation.
pub fn format_progress(info: &ProgressInfo) -> String {
    let invocation = &info.result.invocation;
    let status = match &info.result.outcome {
        InvocationOutcome::Succeeded { .. } => "ok".to_owned(),
        InvocationOutcome::Failed {
            exit_code: Some(code),
            ..
        } => format!("failed (exit code {code})"),
        InvocationOutcome::Failed { exit_code: None, .. } => "failed (terminated)".to_owned(),
        InvocationOutcome::LaunchFailed { message } => format!("not launched: {message}"),
    };
    format!(
        "[{}/{}] {} -> {}: {}",
        info.completed,
        info.total,
        invocation.source.display(),
        invocation.output.display(),
        status
    )
}

/// Reports progress through the `log` facade at a configurable level.
#[derive(Debug, Clone, Copy)]
pub struct LogProgressReporter {
    level: ProgressLogLevel,
}

impl LogProgressReporter {
    pub const fn new(level: ProgressLogLevel) -> Self {
        Self { level }
    }

    fn emit(&self, msg: &str) {
        match self.level {
            ProgressLogLevel::Trace => log::trace!("{}", msg),
            ProgressLogLevel::Debug => log::debug!("{}", msg),
            ProgressLogLevel::Info => log::info!("{}", msg),
            ProgressLogLevel::Warn => log::warn!("{}", msg),
        }
    }
}

impl ProgressReporter for LogProgressReporter {
    fn report(&mut self, info: &ProgressInfo) -> Result<()> {
        self.emit(&format_progress(info));
        Ok(())
    }

    fn finish(&mut self, report: &BuildReport) -> Result<()> {
        self.emit(&format!(
            "Finished {} invocation(s): {} ok, {} failed",
            report.total(),
            report.succeeded(),
            report.failed()
        ));
        Ok(())
    }

    fn fail(&mut self, error: &anyhow::Error) -> Result<()> {
        log::error!("Shader build aborted: {:#}", error);
        Ok(())
    }
}
