use crate::error::AppError;
use clap::{Parser, ValueEnum};
use shader_forge_core::config::{
    BuildConfig, DEFAULT_BINARY_SUFFIX, DEFAULT_COMPILER, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_DIR,
};
use std::path::PathBuf;

/// Log level applied to everything except progress reporting.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlobalLogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Log level used for the per-invocation progress lines.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProgressLogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
}

/// Configuration for the shader-forge application.
#[derive(Parser, Debug)]
#[command(author, version, about = "Compiles GLSL shaders to SPIR-V with an external compiler", long_about = None)]
pub struct AppConfig {
    /// Shaders to build. A name without a period (`voxel`) builds `voxel.vert`
    /// and `voxel.frag`; a name with a period (`post.comp`) builds that file only.
    #[arg(value_name = "SHADER", default_values = ["shader", "voxel"])]
    pub shaders: Vec<String>,

    /// Shader compiler executable.
    #[arg(long, value_name = "PATH", env = "SHADER_FORGE_COMPILER", default_value = DEFAULT_COMPILER)]
    pub compiler: PathBuf,

    /// Directory containing the shader sources.
    #[arg(long, value_name = "DIR", env = "SHADER_FORGE_SOURCE_DIR", default_value = DEFAULT_SOURCE_DIR)]
    pub source_dir: PathBuf,

    /// Directory receiving the compiled binaries. Must already exist.
    #[arg(long, value_name = "DIR", env = "SHADER_FORGE_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Suffix appended to each output file name (`voxel.vert` -> `voxel.vert.spv`).
    #[arg(long, value_name = "EXT", default_value = DEFAULT_BINARY_SUFFIX)]
    pub suffix: String,

    /// Extra argument passed to the compiler before the source path. Repeatable.
    #[arg(long = "compiler-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub compiler_args: Vec<String>,

    /// Print the compiler commands without running them.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Exit with an error if any compilation failed.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Optional: write a per-invocation CSV report to this file.
    #[arg(long, value_name = "CSV_FILE")]
    pub report_csv: Option<PathBuf>,

    /// Global log level.
    #[arg(long, value_enum, default_value_t = GlobalLogLevel::Info)]
    pub log_level: GlobalLogLevel,

    /// Log level of the per-shader progress lines.
    #[arg(long, value_enum, default_value_t = ProgressLogLevel::Info)]
    pub progress_log_level: ProgressLogLevel,
}

impl AppConfig {
    /// Converts the command line into the orchestrator's `BuildConfig`.
    pub fn to_build_config(&self) -> Result<BuildConfig, AppError> {
        let mut builder = BuildConfig::builder()
            .compiler(&self.compiler)
            .source_dir(&self.source_dir)
            .output_dir(&self.output_dir)
            .binary_suffix(&self.suffix)
            .shaders(self.shaders.iter().cloned());
        for arg in &self.compiler_args {
            builder = builder.extra_arg(arg);
        }
        builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shader_forge_core::ShaderDeclaration;

    #[test]
    fn test_defaults() {
        let config = AppConfig::try_parse_from(["shader-forge"]).unwrap();
        assert_eq!(config.shaders, vec!["shader", "voxel"]);
        assert_eq!(config.source_dir, PathBuf::from("shaders/src"));
        assert_eq!(config.output_dir, PathBuf::from("shaders/spv"));
        assert_eq!(config.suffix, "spv");
        assert!(config.compiler_args.is_empty());
        assert!(!config.dry_run);
        assert!(!config.strict);
        assert_eq!(config.report_csv, None);
        assert_eq!(config.log_level, GlobalLogLevel::Info);
        assert_eq!(config.progress_log_level, ProgressLogLevel::Info);
    }

    #[test]
    fn test_positional_shaders_replace_defaults() {
        let config = AppConfig::try_parse_from(["shader-forge", "sky", "post.comp"]).unwrap();
        let build = config.to_build_config().unwrap();
        assert_eq!(
            build.shaders,
            vec![
                ShaderDeclaration::Bare("sky".to_owned()),
                ShaderDeclaration::Explicit("post.comp".to_owned()),
            ]
        );
    }

    #[test]
    fn test_paths_and_suffix() {
        let args = [
            "shader-forge",
            "--compiler",
            "/usr/local/bin/glslc",
            "--source-dir",
            "assets/glsl",
            "--output-dir",
            "build/spv",
            "--suffix",
            "bin",
        ];
        let build = AppConfig::try_parse_from(args)
            .unwrap()
            .to_build_config()
            .unwrap();
        assert_eq!(build.compiler, PathBuf::from("/usr/local/bin/glslc"));
        assert_eq!(build.source_dir, PathBuf::from("assets/glsl"));
        assert_eq!(build.output_dir, PathBuf::from("build/spv"));
        assert_eq!(build.binary_suffix, "bin");
    }

    #[test]
    fn test_compiler_args_accept_hyphen_values() {
        let args = [
            "shader-forge",
            "--compiler-arg",
            "-O",
            "--compiler-arg",
            "--target-env=vulkan1.2",
            "post.comp",
        ];
        let config = AppConfig::try_parse_from(args).unwrap();
        assert_eq!(config.compiler_args, vec!["-O", "--target-env=vulkan1.2"]);
        assert_eq!(config.shaders, vec!["post.comp"]);
    }

    #[test]
    fn test_flags() {
        let args = [
            "shader-forge",
            "--dry-run",
            "--strict",
            "--report-csv",
            "report.csv",
            "--log-level",
            "debug",
            "--progress-log-level",
            "warn",
        ];
        let config = AppConfig::try_parse_from(args).unwrap();
        assert!(config.dry_run);
        assert!(config.strict);
        assert_eq!(config.report_csv, Some(PathBuf::from("report.csv")));
        assert_eq!(config.log_level, GlobalLogLevel::Debug);
        assert_eq!(config.progress_log_level, ProgressLogLevel::Warn);

        let args_err = ["shader-forge", "--progress-log-level", "error"];
        assert!(AppConfig::try_parse_from(args_err).is_err());
    }

    #[test]
    fn test_invalid_suffix_is_config_error() {
        let config = AppConfig::try_parse_from(["shader-forge", "--suffix", ".spv"]).unwrap();
        assert!(matches!(
            config.to_build_config(),
            Err(AppError::Config(_))
        ));
    }
}
