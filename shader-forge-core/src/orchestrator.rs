use crate::{
    config::BuildConfig,
    invocation::{self, CompileInvocation},
    runner::CompilerRunner,
    BuildError,
};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// How a single compiler invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// The compiler exited with status zero. `diagnostics` holds any warnings it printed.
    Succeeded { diagnostics: String },
    /// The compiler ran and exited non-zero (or was killed, `exit_code == None`).
    Failed {
        exit_code: Option<i32>,
        diagnostics: String,
    },
    /// The compiler process could not be started.
    LaunchFailed { message: String },
}

impl InvocationOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Short status label: `ok`, `failed` or `launch-failed`.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Succeeded { .. } => "ok",
            Self::Failed { .. } => "failed",
            Self::LaunchFailed { .. } => "launch-failed",
        }
    }

    /// Text produced by the compiler, or the launch error message.
    pub fn diagnostics(&self) -> &str {
        match self {
            Self::Succeeded { diagnostics } | Self::Failed { diagnostics, .. } => diagnostics,
            Self::LaunchFailed { message } => message,
        }
    }

    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Failed { exit_code, .. } => *exit_code,
            Self::Succeeded { .. } => Some(0),
            Self::LaunchFailed { .. } => None,
        }
    }
}

/// The result of one compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    pub invocation: CompileInvocation,
    pub outcome: InvocationOutcome,
    pub elapsed: Duration,
}

/// Ordered results of a whole build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// One entry per invocation, in launch order.
    pub results: Vec<InvocationResult>,
    /// Wall time of the whole build.
    pub elapsed: Duration,
}

impl BuildReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.is_success())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// `true` when every invocation succeeded (vacuously true for an empty build).
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Iterates over the invocations that did not succeed.
    pub fn failures(&self) -> impl Iterator<Item = &InvocationResult> {
        self.results.iter().filter(|r| !r.outcome.is_success())
    }

    /// Turns a failing report into an error when `strict` is set.
    ///
    /// Without `strict` the report is always returned, matching a
    /// fire-and-forget build that never looks at exit statuses.
    pub fn into_result(self, strict: bool) -> Result<Self, BuildError> {
        if strict && !self.is_success() {
            return Err(BuildError::CompilationFailed {
                failed: self.failed(),
                total: self.total(),
            });
        }
        Ok(self)
    }
}

/// Snapshot handed to the progress callback after every invocation.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Invocations finished so far, including this one.
    pub completed: usize,
    /// Invocations planned for the whole build.
    pub total: usize,
    /// The invocation that just finished.
    pub result: InvocationResult,
}

/// Alias for the progress callback function type.
pub type ProgressCallback = Box<dyn Fn(&ProgressInfo) + Send + Sync>;

/// Drives a build: plans the invocations and runs them one by one.
pub struct ShaderBuilder<R: CompilerRunner> {
    config: BuildConfig,
    runner: R,
    progress_callback: Option<ProgressCallback>,
}

impl<R: CompilerRunner> ShaderBuilder<R> {
    pub const fn new(config: BuildConfig, runner: R) -> Self {
        Self {
            config,
            runner,
            progress_callback: None,
        }
    }

    /// Sets the callback invoked after each compiler invocation.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub const fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Returns the runner, e.g. to inspect a recording runner in tests.
    pub fn into_runner(self) -> R {
        self.runner
    }

    /// The invocations [`ShaderBuilder::build`] would issue, without running anything.
    pub fn plan(&self) -> Vec<CompileInvocation> {
        invocation::plan(&self.config)
    }

    /// Runs every planned invocation in order.
    ///
    /// A failing or unlaunchable invocation never stops the build; its outcome
    /// is recorded and the next invocation runs.
    pub fn build(&mut self) -> BuildReport {
        let start = Instant::now();
        let invocations = self.plan();
        let total = invocations.len();
        info!(
            "Compiling {} shader declaration(s) into {} invocation(s) with {}",
            self.config.shaders.len(),
            total,
            self.config.compiler.display()
        );

        let mut results = Vec::with_capacity(total);
        for (index, invocation) in invocations.into_iter().enumerate() {
            let result = self.run_one(invocation);
            if let Some(callback) = &self.progress_callback {
                callback(&ProgressInfo {
                    completed: index + 1,
                    total,
                    result: result.clone(),
                });
            }
            results.push(result);
        }

        let report = BuildReport {
            results,
            elapsed: start.elapsed(),
        };
        info!(
            "Shader build finished: {}/{} succeeded",
            report.succeeded(),
            report.total()
        );
        report
    }

    fn run_one(&mut self, invocation: CompileInvocation) -> InvocationResult {
        let args = invocation.args(&self.config.extra_args);
        debug!(
            "Running: {}",
            invocation.command_line(&self.config.compiler, &self.config.extra_args)
        );

        let start = Instant::now();
        let outcome = match self.runner.run(&self.config.compiler, &args) {
            Ok(output) if output.success => {
                let diagnostics = output.diagnostics();
                if !diagnostics.is_empty() {
                    debug!("{}: {}", invocation.file_name, diagnostics);
                }
                InvocationOutcome::Succeeded { diagnostics }
            }
            Ok(output) => {
                let diagnostics = output.diagnostics();
                warn!(
                    "Compiling {} failed (exit code {:?}): {}",
                    invocation.file_name, output.exit_code, diagnostics
                );
                InvocationOutcome::Failed {
                    exit_code: output.exit_code,
                    diagnostics,
                }
            }
            Err(e) => {
                warn!(
                    "Could not launch {} for {}: {}",
                    self.config.compiler.display(),
                    invocation.file_name,
                    e
                );
                InvocationOutcome::LaunchFailed {
                    message: e.to_string(),
                }
            }
        };

        InvocationResult {
            invocation,
            outcome,
            elapsed: start.elapsed(),
        }
    }
}

/// Builds every shader in `config` with `runner` and returns the report.
pub fn build<R: CompilerRunner>(config: BuildConfig, runner: R) -> BuildReport {
    ShaderBuilder::new(config, runner).build()
}
