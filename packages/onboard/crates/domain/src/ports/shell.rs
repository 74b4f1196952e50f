use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Failed to start shell for `{command}`: {reason}")]
    Spawn { command: String, reason: String },
    #[error("I/O error while running `{command}`: {reason}")]
    Io { command: String, reason: String },
}

/// Captured result of one shell command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ShellOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// stdout followed by stderr, trimmed
    pub fn combined(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (false, false) => format!("{}\n{}", stdout, stderr),
            (false, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (true, true) => String::new(),
        }
    }

    /// The most useful text to attach to a failure: stderr, else stdout
    pub fn failure_text(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match self.status {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// The only door to the operating system.
///
/// Every call blocks (awaits) until the command has finished; there is no
/// streaming and no timeout at this layer.
#[async_trait]
pub trait ShellRunner: Send + Sync {
    /// Run through the platform shell and capture stdout/stderr.
    async fn run(&self, command: &str) -> Result<ShellOutput, ShellError>;

    /// Run attached to the operator's terminal so they can answer prompts
    /// (e.g. a sudo password). Output is not captured.
    async fn run_interactive(&self, command: &str) -> Result<Option<i32>, ShellError>;

    /// Run a PowerShell script and capture its output.
    ///
    /// Defaults to [`ShellRunner::run`] for runners whose shell already
    /// understands PowerShell.
    async fn run_powershell(&self, script: &str) -> Result<ShellOutput, ShellError> {
        self.run(script).await
    }

    /// Resolve a binary on PATH
    fn locate(&self, program: &str) -> Option<PathBuf>;
}
