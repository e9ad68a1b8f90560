use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;

/// What a finished compiler process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOutput {
    /// Whether the process exited with a zero status.
    pub success: bool,
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CompilerOutput {
    /// Diagnostic text of the run: stderr, falling back to stdout.
    pub fn diagnostics(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_owned()
        } else {
            stderr.to_owned()
        }
    }
}

/// Launches the shader compiler.
///
/// Implementations must block until the launched process has exited; the
/// orchestrator relies on this to keep builds strictly sequential.
#[cfg_attr(test, mockall::automock)]
pub trait CompilerRunner {
    /// Runs `program` with `args`.
    ///
    /// An `Err` means the process could not be started at all (missing
    /// executable, permissions). A process that starts and fails is an `Ok`
    /// with `success == false`.
    fn run(&mut self, program: &Path, args: &[OsString]) -> io::Result<CompilerOutput>;
}

/// Runs the compiler as a child process via [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub const fn new() -> Self {
        Self
    }
}

impl CompilerRunner for ProcessRunner {
    fn run(&mut self, program: &Path, args: &[OsString]) -> io::Result<CompilerOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CompilerOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_prefers_stderr() {
        let output = CompilerOutput {
            success: false,
            exit_code: Some(1),
            stdout: "ignored".to_owned(),
            stderr: "shader.vert:3: error: syntax\n".to_owned(),
        };
        assert_eq!(output.diagnostics(), "shader.vert:3: error: syntax");
    }

    #[test]
    fn test_diagnostics_falls_back_to_stdout() {
        let output = CompilerOutput {
            stdout: "  1 warning generated.\n".to_owned(),
            ..CompilerOutput::default()
        };
        assert_eq!(output.diagnostics(), "1 warning generated.");
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let mut runner = ProcessRunner::new();
        let result = runner.run(
            Path::new("shader-forge-definitely-missing-compiler"),
            &[OsString::from("x.vert")],
        );
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_process_status_and_output_are_captured() {
        let mut runner = ProcessRunner::new();
        let args = [
            OsString::from("-c"),
            OsString::from("echo out; echo err >&2; exit 3"),
        ];
        let output = runner.run(Path::new("sh"), &args).unwrap();
        assert!(!output.success);
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }
}
