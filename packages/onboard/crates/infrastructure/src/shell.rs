use async_trait::async_trait;
use domain::ports::shell::{ShellError, ShellOutput, ShellRunner};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::debug;

/// Default cap on each captured stream
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Runs commands through the host's shell: `sh -c` on Unix, `cmd /C` on Windows.
pub struct SystemShell {
    max_output_bytes: usize,
}

impl SystemShell {
    pub fn new() -> Self {
        Self {
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }

    pub fn with_max_output(mut self, bytes: usize) -> Self {
        self.max_output_bytes = bytes;
        self
    }

    fn shell_command(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }

    async fn capture(&self, mut cmd: Command, label: &str) -> Result<ShellOutput, ShellError> {
        debug!(command = label, "Running");
        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ShellError::Spawn {
                command: label.to_string(),
                reason: e.to_string(),
            })?;

        let io_error = |e: std::io::Error| ShellError::Io {
            command: label.to_string(),
            reason: e.to_string(),
        };

        // both pipes are drained together so neither can fill up and stall the child
        let limit = self.max_output_bytes;
        let (stdout, stderr) = tokio::join!(
            read_bounded(child.stdout.take(), limit),
            read_bounded(child.stderr.take(), limit)
        );
        let (stdout, stderr) = (stdout.map_err(io_error)?, stderr.map_err(io_error)?);
        let status = child.wait().await.map_err(io_error)?;

        Ok(ShellOutput {
            status: status.code(),
            stdout: truncate(&stdout, limit),
            stderr: truncate(&stderr, limit),
        })
    }
}

impl Default for SystemShell {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the first `limit` bytes of a stream and discards the rest as it arrives
async fn read_bounded<R>(reader: Option<R>, limit: usize) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return Ok(Vec::new());
    };
    let mut kept = Vec::new();
    (&mut reader).take(limit as u64).read_to_end(&mut kept).await?;
    tokio::io::copy(&mut reader, &mut tokio::io::sink()).await?;
    Ok(kept)
}

/// Lossy UTF-8 of at most `limit` bytes, never splitting a character
fn truncate(bytes: &[u8], limit: usize) -> String {
    let text = String::from_utf8_lossy(bytes);
    if text.len() <= limit {
        return text.into_owned();
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

#[async_trait]
impl ShellRunner for SystemShell {
    async fn run(&self, command: &str) -> Result<ShellOutput, ShellError> {
        self.capture(Self::shell_command(command), command).await
    }

    async fn run_interactive(&self, command: &str) -> Result<Option<i32>, ShellError> {
        debug!(command, "Handing command to the terminal");
        let status = Self::shell_command(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ShellError::Io {
                command: command.to_string(),
                reason: e.to_string(),
            })?;
        Ok(status.code())
    }

    async fn run_powershell(&self, script: &str) -> Result<ShellOutput, ShellError> {
        let mut cmd = Command::new("powershell");
        cmd.args(["-NoProfile", "-NonInteractive", "-Command", script]);
        self.capture(cmd, script).await
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}
