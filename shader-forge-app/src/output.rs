use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use shader_forge_core::{BuildReport, CompileInvocation, InvocationResult};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// One row of the CSV build report.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReportRow {
    pub file_name: String,
    pub source: String,
    pub output: String,
    pub status: &'static str,
    pub exit_code: Option<i32>,
    pub elapsed_ms: u64,
    pub diagnostics: String,
}

impl From<&InvocationResult> for ReportRow {
    fn from(result: &InvocationResult) -> Self {
        Self {
            file_name: result.invocation.file_name.clone(),
            source: result.invocation.source.display().to_string(),
            output: result.invocation.output.display().to_string(),
            status: result.outcome.label(),
            exit_code: result.outcome.exit_code(),
            elapsed_ms: u64::try_from(result.elapsed.as_millis()).unwrap_or(u64::MAX),
            diagnostics: result.outcome.diagnostics().to_owned(),
        }
    }
}

/// Writes the report as CSV, one row per invocation, with a header line.
pub fn write_report<W: Write>(report: &BuildReport, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in &report.results {
        csv_writer.serialize(ReportRow::from(result))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Saves the report as a CSV file at `path`, overwriting it.
pub fn write_report_csv(report: &BuildReport, path: &Path) -> Result<()> {
    log::info!("Writing build report to {:?}...", path);
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create report file: {path:?}"))?;
    write_report(report, file)
        .with_context(|| format!("Failed to write report file: {path:?}"))?;
    Ok(())
}

fn round_to_millis(elapsed: Duration) -> Duration {
    Duration::from_millis(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// Prints a human readable summary of the build to stdout.
pub fn print_summary(report: &BuildReport) {
    println!("\n--- Shader Build Summary ---");
    for result in &report.results {
        let status = if result.outcome.is_success() {
            "ok".green()
        } else {
            result.outcome.label().red()
        };
        println!(
            "  {:<14} {} -> {}",
            status,
            result.invocation.source.display(),
            result.invocation.output.display()
        );
    }
    let totals = format!(
        "{} compiled, {} failed, {} total",
        report.succeeded(),
        report.failed(),
        report.total()
    );
    let totals = if report.is_success() {
        totals.green()
    } else {
        totals.yellow()
    };
    println!(
        "{} in {}",
        totals,
        humantime::format_duration(round_to_millis(report.elapsed))
    );
}

/// Prints the commands a build would run, one per line.
pub fn print_plan(plan: &[CompileInvocation], compiler: &Path, extra_args: &[String]) {
    for invocation in plan {
        println!("{}", invocation.command_line(compiler, extra_args));
    }
}
