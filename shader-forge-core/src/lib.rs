//! Core library for the shader build orchestrator.
//! Maps declared shader names to compiler invocations and runs them in order.

use thiserror::Error;

/// Build configuration and its builder.
pub mod config;
/// Shader declarations and the bare/explicit naming convention.
pub mod declaration;
/// Source/output path derivation and invocation planning.
pub mod invocation;
/// The build loop and its per-invocation report.
pub mod orchestrator;
/// The process-launch seam.
pub mod runner;

// Re-export core public items

/// Explicit configuration passed into the orchestrator.
pub use crate::config::BuildConfig;
/// A single declared shader name.
pub use crate::declaration::ShaderDeclaration;
/// One compiler launch for one source file.
pub use crate::invocation::CompileInvocation;
/// The orchestrator and its report types.
pub use crate::orchestrator::{
    build, BuildReport, InvocationOutcome, InvocationResult, ProgressCallback, ProgressInfo,
    ShaderBuilder,
};
/// The runner trait and the default process-backed implementation.
pub use crate::runner::{CompilerOutput, CompilerRunner, ProcessRunner};

/// Errors raised while configuring or finishing a shader build.
///
/// A single compiler failing is not an error here; it is recorded as an
/// [`InvocationOutcome`] in the [`BuildReport`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A shader declaration token could not be used.
    #[error("Invalid shader declaration: {0}")]
    InvalidDeclaration(String),
    /// The build configuration is unusable (empty compiler, bad suffix, ...).
    #[error("Configuration error: {0}")]
    InvalidConfig(String),
    /// One or more invocations failed and the caller asked for a strict build.
    #[error("{failed} of {total} shader compilations failed")]
    CompilationFailed {
        /// Number of invocations that did not succeed.
        failed: usize,
        /// Total number of invocations attempted.
        total: usize,
    },
}
