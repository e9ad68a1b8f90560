use crate::{declaration::ShaderDeclaration, BuildError};
use std::path::PathBuf;

/// Compiler used when none is configured.
pub const DEFAULT_COMPILER: &str = "glslc";
/// Directory holding shader sources.
pub const DEFAULT_SOURCE_DIR: &str = "shaders/src";
/// Directory receiving compiled binaries.
pub const DEFAULT_OUTPUT_DIR: &str = "shaders/spv";
/// Suffix appended to every output file name.
pub const DEFAULT_BINARY_SUFFIX: &str = "spv";
/// Shaders built when none are declared.
pub const DEFAULT_SHADERS: [&str; 2] = ["shader", "voxel"];

/// Everything the orchestrator needs to know about a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Compiler executable, resolved through `PATH` when not a path.
    pub compiler: PathBuf,
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Appended after the source extension, without a leading dot.
    pub binary_suffix: String,
    /// Passed to the compiler before the source path.
    pub extra_args: Vec<String>,
    pub shaders: Vec<ShaderDeclaration>,
}

impl BuildConfig {
    /// Creates a new builder for `BuildConfig`.
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder::default()
    }

    /// Total number of compiler invocations this configuration will issue.
    pub fn invocation_count(&self) -> usize {
        self.shaders
            .iter()
            .map(ShaderDeclaration::invocation_count)
            .sum()
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from(DEFAULT_COMPILER),
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            binary_suffix: DEFAULT_BINARY_SUFFIX.to_owned(),
            extra_args: Vec::new(),
            shaders: DEFAULT_SHADERS
                .iter()
                .map(|name| ShaderDeclaration::new(*name))
                .collect(),
        }
    }
}

/// Builder for `BuildConfig`.
///
/// Unset fields fall back to the defaults of [`BuildConfig::default`]. Shader
/// tokens are validated in [`BuildConfigBuilder::build`].
#[derive(Debug, Default)]
pub struct BuildConfigBuilder {
    compiler: Option<PathBuf>,
    source_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    binary_suffix: Option<String>,
    extra_args: Vec<String>,
    shaders: Option<Vec<String>>,
}

impl BuildConfigBuilder {
    /// Sets the compiler executable.
    pub fn compiler(mut self, compiler: impl Into<PathBuf>) -> Self {
        self.compiler = Some(compiler.into());
        self
    }

    /// Sets the directory source files are read from.
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    /// Sets the directory binaries are written to.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the suffix appended to output file names (`spv` gives `x.vert.spv`).
    pub fn binary_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.binary_suffix = Some(suffix.into());
        self
    }

    /// Appends one extra compiler argument.
    pub fn extra_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Appends one shader declaration.
    pub fn shader(mut self, token: impl Into<String>) -> Self {
        self.shaders.get_or_insert_with(Vec::new).push(token.into());
        self
    }

    /// Replaces the declared shader list.
    pub fn shaders<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shaders = Some(tokens.into_iter().map(Into::into).collect());
        self
    }

    /// Validates the settings and builds the `BuildConfig`.
    pub fn build(self) -> Result<BuildConfig, BuildError> {
        let defaults = BuildConfig::default();

        let compiler = self.compiler.unwrap_or(defaults.compiler);
        if compiler.as_os_str().is_empty() {
            return Err(BuildError::InvalidConfig(
                "compiler path must not be empty".to_owned(),
            ));
        }

        let binary_suffix = self.binary_suffix.unwrap_or(defaults.binary_suffix);
        if binary_suffix.is_empty() {
            return Err(BuildError::InvalidConfig(
                "binary suffix must not be empty".to_owned(),
            ));
        }
        if binary_suffix.starts_with('.') {
            return Err(BuildError::InvalidConfig(format!(
                "binary suffix {binary_suffix:?} must not start with '.'"
            )));
        }

        let shaders = match self.shaders {
            Some(tokens) => tokens
                .iter()
                .map(|token| ShaderDeclaration::parse(token))
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.shaders,
        };

        Ok(BuildConfig {
            compiler,
            source_dir: self.source_dir.unwrap_or(defaults.source_dir),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            binary_suffix,
            extra_args: self.extra_args,
            shaders,
        })
    }
}
