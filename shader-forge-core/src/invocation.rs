use crate::config::BuildConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// One compiler launch: a single source file compiled to a single binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileInvocation {
    /// File name relative to the source directory, e.g. `voxel.vert`.
    pub file_name: String,
    /// `<source_dir>/<file_name>`
    pub source: PathBuf,
    /// `<output_dir>/<file_name>.<suffix>`; the source extension is kept.
    pub output: PathBuf,
}

impl CompileInvocation {
    /// Derives the source and output paths for `file_name` under `config`.
    pub fn new(config: &BuildConfig, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let source = config.source_dir.join(&file_name);
        let output = config
            .output_dir
            .join(format!("{file_name}.{}", config.binary_suffix));
        Self {
            file_name,
            source,
            output,
        }
    }

    /// Arguments passed to the compiler: `[extra..., <source>, -o, <output>]`.
    pub fn args(&self, extra_args: &[String]) -> Vec<OsString> {
        let mut args: Vec<OsString> = extra_args.iter().map(OsString::from).collect();
        args.push(self.source.clone().into_os_string());
        args.push(OsString::from("-o"));
        args.push(self.output.clone().into_os_string());
        args
    }

    /// The full command as a single display string, for logs and dry runs.
    pub fn command_line(&self, compiler: &Path, extra_args: &[String]) -> String {
        let mut line = compiler.display().to_string();
        for arg in self.args(extra_args) {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Expands every declaration of `config` into compiler invocations.
///
/// Declaration order is preserved, and a bare name yields its vertex stage
/// before its fragment stage.
pub fn plan(config: &BuildConfig) -> Vec<CompileInvocation> {
    let mut invocations = Vec::with_capacity(config.invocation_count());
    for declaration in &config.shaders {
        for file_name in declaration.source_files() {
            invocations.push(CompileInvocation::new(config, file_name));
        }
    }
    invocations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShaderDeclaration;

    fn config_with(shaders: &[&str]) -> BuildConfig {
        BuildConfig {
            shaders: shaders.iter().map(|s| ShaderDeclaration::new(*s)).collect(),
            ..BuildConfig::default()
        }
    }

    #[test]
    fn test_output_suffix_is_appended_not_replaced() {
        let config = BuildConfig::default();
        let invocation = CompileInvocation::new(&config, "voxel.frag");
        assert_eq!(invocation.source, Path::new("shaders/src").join("voxel.frag"));
        assert_eq!(
            invocation.output,
            Path::new("shaders/spv").join("voxel.frag.spv")
        );
    }

    #[test]
    fn test_args_follow_command_template() {
        let config = BuildConfig::default();
        let invocation = CompileInvocation::new(&config, "shader.vert");
        let args = invocation.args(&[]);
        assert_eq!(
            args,
            vec![
                Path::new("shaders/src").join("shader.vert").into_os_string(),
                OsString::from("-o"),
                Path::new("shaders/spv")
                    .join("shader.vert.spv")
                    .into_os_string(),
            ]
        );
    }

    #[test]
    fn test_extra_args_precede_source() {
        let config = BuildConfig::default();
        let invocation = CompileInvocation::new(&config, "post.comp");
        let args = invocation.args(&["-O".to_owned(), "-g".to_owned()]);
        assert_eq!(args.len(), 5);
        assert_eq!(args[0], OsString::from("-O"));
        assert_eq!(args[1], OsString::from("-g"));
        assert_eq!(args[3], OsString::from("-o"));
    }

    #[test]
    fn test_command_line_rendering() {
        let config = BuildConfig::builder()
            .source_dir("src")
            .output_dir("out")
            .build()
            .unwrap();
        let invocation = CompileInvocation::new(&config, "post.comp");
        let expected = format!(
            "glslc {} -o {}",
            Path::new("src").join("post.comp").display(),
            Path::new("out").join("post.comp.spv").display()
        );
        assert_eq!(
            invocation.command_line(&config.compiler, &config.extra_args),
            expected
        );
    }

    #[test]
    fn test_plan_default_shaders() {
        let files: Vec<String> = plan(&config_with(&["shader", "voxel"]))
            .into_iter()
            .map(|inv| inv.file_name)
            .collect();
        assert_eq!(
            files,
            vec!["shader.vert", "shader.frag", "voxel.vert", "voxel.frag"]
        );
    }

    #[test]
    fn test_plan_explicit_shader() {
        let invocations = plan(&config_with(&["post.comp"]));
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].file_name, "post.comp");
        assert_eq!(
            invocations[0].output,
            Path::new("shaders/spv").join("post.comp.spv")
        );
    }

    #[test]
    fn test_plan_mixed_preserves_declaration_order() {
        let files: Vec<String> = plan(&config_with(&["post.comp", "sky", "blur.comp"]))
            .into_iter()
            .map(|inv| inv.file_name)
            .collect();
        assert_eq!(
            files,
            vec!["post.comp", "sky.vert", "sky.frag", "blur.comp"]
        );
    }

    #[test]
    fn test_plan_empty() {
        assert!(plan(&config_with(&[])).is_empty());
    }
}
