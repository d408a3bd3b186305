use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Exit status and captured output of one external tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Combined output for error messages, stderr first since that is where
    /// 7-Zip writes its errors.
    pub fn diagnostic(&self) -> String {
        let mut parts = Vec::new();
        match self.exit_code {
            Some(code) => parts.push(format!("exit code {}", code)),
            None => parts.push("terminated by signal".to_string()),
        }
        for text in [&self.stderr, &self.stdout] {
            let text = text.trim();
            if !text.is_empty() {
                parts.push(text.to_string());
            }
        }
        parts.join("\n")
    }
}

/// Runs an external program with a structured argument list and waits for it.
///
/// Arguments are passed straight to the process, never through a shell.
pub trait ToolRunner: Send + Sync {
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<ToolOutput>;
}

/// [`ToolRunner`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<ToolOutput> {
        debug!(
            "Running {} {}",
            program.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(program).args(args).output()?;

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
