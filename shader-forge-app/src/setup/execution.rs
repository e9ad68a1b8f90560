//! Handles the execution logic for the build and dry-run modes.

use crate::{
    config::AppConfig,
    error::AppError,
    output,
    progress::{LogProgressReporter, ProgressReporter},
};
use log::{info, warn};
use shader_forge_core::{
    invocation, BuildConfig, BuildReport, CompilerRunner, ProcessRunner, ProgressInfo,
    ShaderBuilder,
};
use std::sync::{Arc, Mutex};

/// Runs the mode selected on the command line.
pub fn run(config: &AppConfig) -> Result<(), AppError> {
    let mut reporter = LogProgressReporter::new(config.progress_log_level);
    let build_config = match config.to_build_config() {
        Ok(build_config) => build_config,
        Err(e) => {
            let error = anyhow::anyhow!(e.to_string());
            reporter.fail(&error)?;
            return Err(e);
        }
    };

    if config.dry_run {
        run_dry_run_mode(&build_config);
        return Ok(());
    }

    run_build_mode(config, build_config, ProcessRunner::new(), reporter).map(|_| ())
}

/// Prints the planned compiler commands without launching anything.
pub fn run_dry_run_mode(build_config: &BuildConfig) {
    info!("Dry run: no compiler will be launched.");
    output::print_plan(
        &invocation::plan(build_config),
        &build_config.compiler,
        &build_config.extra_args,
    );
}

/// Compiles every declared shader with `runner`, then reports the outcome.
///
/// Failed invocations are logged and summarized; they only turn into an
/// error when `--strict` is set, after every invocation has run.
pub fn run_build_mode<R, P>(
    config: &AppConfig,
    build_config: BuildConfig,
    runner: R,
    reporter: P,
) -> Result<BuildReport, AppError>
where
    R: CompilerRunner,
    P: ProgressReporter + 'static,
{
    let reporter = Arc::new(Mutex::new(reporter));
    let callback_reporter = Arc::clone(&reporter);

    let report = ShaderBuilder::new(build_config, runner)
        .with_progress_callback(Box::new(move |progress: &ProgressInfo| {
            if let Ok(mut reporter) = callback_reporter.lock() {
                if let Err(e) = reporter.report(progress) {
                    warn!("Progress reporting failed: {}", e);
                }
            }
        }))
        .build();

    if let Ok(mut reporter) = reporter.lock() {
        reporter.finish(&report)?;
    }

    output::print_summary(&report);

    if let Some(path) = &config.report_csv {
        output::write_report_csv(&report, path)?;
    }

    report.into_result(config.strict).map_err(AppError::from)
}
