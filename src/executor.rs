//! Running typed commands on the host.
//!
//! Commands are split on single spaces by [`split_command`] and handed to an
//! [`Executor`]. There is no quoting or escaping: `echo "a b"` runs `echo`
//! with the two arguments `"a` and `b"`.

use crate::pty::PtySession;
use crate::pty_reader::spawn_reader;
use crate::step::OutputHandler;
use anyhow::{Context as _, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use std::str::FromStr;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::debug;

/// Failures of a command that ran (or could not be run) on the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecError {
    #[error("no command to run")]
    EmptyCommand,
    #[error("exit status {0}")]
    ExitStatus(i64),
    #[error("terminated by signal")]
    Terminated,
}

/// Split a command line into the program and its arguments.
///
/// Splits on every single space, so repeated spaces produce empty arguments.
pub fn split_command(command: &str) -> Result<(&str, Vec<&str>), ExecError> {
    let mut parts = command.split(' ');
    let program = parts.next().unwrap_or_default();
    if program.is_empty() {
        return Err(ExecError::EmptyCommand);
    }
    Ok((program, parts.collect()))
}

/// Runs a command line and streams its output to a handler.
#[async_trait(?Send)]
pub trait Executor {
    fn name(&self) -> &'static str;

    /// Run `command` to completion. A non-zero exit is an [`ExecError`].
    async fn run(&self, command: &str, output: &OutputHandler) -> Result<()>;
}

/// Runs commands inside a pseudo-terminal, so programs keep the colors and
/// layout they use on a real terminal.
pub struct PtyExecutor {
    pub rows: u16,
    pub cols: u16,
}

impl Default for PtyExecutor {
    fn default() -> Self {
        Self { rows: 24, cols: 80 }
    }
}

#[async_trait(?Send)]
impl Executor for PtyExecutor {
    fn name(&self) -> &'static str {
        "pty"
    }

    async fn run(&self, command: &str, output: &OutputHandler) -> Result<()> {
        let (program, args) = split_command(command)?;
        debug!(program, ?args, "spawning in pty");

        let (mut session, reader) = PtySession::spawn(program, &args, self.rows, self.cols)?;
        let mut rx = spawn_reader(reader);
        while let Some(chunk) = rx.recv().await {
            output(&chunk);
        }

        // The reader only stops once the child closed the terminal.
        let code = session.wait()?;
        debug!(program, code, "command finished");
        if code != 0 {
            return Err(ExecError::ExitStatus(i64::from(code)).into());
        }
        Ok(())
    }
}

/// Runs commands with stdout piped back through the handler. Stdin is closed
/// and stderr goes straight to the terminal.
pub struct PipeExecutor;

#[async_trait(?Send)]
impl Executor for PipeExecutor {
    fn name(&self) -> &'static str {
        "pipe"
    }

    async fn run(&self, command: &str, output: &OutputHandler) -> Result<()> {
        let (program, args) = split_command(command)?;
        debug!(program, ?args, "spawning with piped stdout");

        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start `{}`", program))?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("stdout of `{}` was not captured", program))?;
        let mut buffer = [0u8; 4096];
        loop {
            let n = stdout.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            output(&buffer[..n]);
        }

        let status = child.wait().await?;
        debug!(program, ?status, "command finished");
        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(ExecError::ExitStatus(i64::from(code)).into()),
            None => Err(ExecError::Terminated.into()),
        }
    }
}

/// Which [`Executor`] to run commands with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ExecutorKind {
    #[default]
    Pty,
    Pipe,
}

impl ExecutorKind {
    pub fn build(self) -> Box<dyn Executor> {
        match self {
            ExecutorKind::Pty => Box::new(PtyExecutor::default()),
            ExecutorKind::Pipe => Box::new(PipeExecutor),
        }
    }
}

impl FromStr for ExecutorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pty" => Ok(ExecutorKind::Pty),
            "pipe" => Ok(ExecutorKind::Pipe),
            other => Err(anyhow!(
                "unknown executor '{}', expected one of: pty, pipe",
                other
            )),
        }
    }
}

impl TryFrom<String> for ExecutorKind {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn capture() -> (OutputHandler, Arc<Mutex<Vec<u8>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();
        let handler: OutputHandler = Arc::new(move |data: &[u8]| {
            sink.lock().unwrap().extend_from_slice(data);
        });
        (handler, captured)
    }

    #[test]
    fn test_split_command() {
        let (program, args) = split_command("ping -c 3 one.one.one.one").unwrap();
        assert_eq!(program, "ping");
        assert_eq!(args, vec!["-c", "3", "one.one.one.one"]);
    }

    #[test]
    fn test_split_command_no_args() {
        let (program, args) = split_command("ls").unwrap();
        assert_eq!(program, "ls");
        assert!(args.is_empty());
    }

    #[test]
    fn test_split_command_keeps_empty_args() {
        let (program, args) = split_command("echo a  b").unwrap();
        assert_eq!(program, "echo");
        assert_eq!(args, vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_command_no_quoting() {
        let (_, args) = split_command(r#"echo "a b""#).unwrap();
        assert_eq!(args, vec!["\"a", "b\""]);
    }

    #[test]
    fn test_split_empty_command() {
        assert_eq!(split_command("").unwrap_err(), ExecError::EmptyCommand);
        assert_eq!(split_command(" ls").unwrap_err(), ExecError::EmptyCommand);
    }

    #[test]
    fn test_exec_error_messages() {
        assert_eq!(ExecError::ExitStatus(2).to_string(), "exit status 2");
        assert_eq!(ExecError::EmptyCommand.to_string(), "no command to run");
    }

    #[test]
    fn test_parse_executor_kind() {
        assert_eq!("pty".parse::<ExecutorKind>().unwrap(), ExecutorKind::Pty);
        assert_eq!("PIPE".parse::<ExecutorKind>().unwrap(), ExecutorKind::Pipe);
        assert!("shell".parse::<ExecutorKind>().is_err());
        assert_eq!(ExecutorKind::default().build().name(), "pty");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_pipe_executor_streams_stdout() {
        let (handler, captured) = capture();
        PipeExecutor.run("echo hello world", &handler).await.unwrap();
        assert_eq!(captured.lock().unwrap().as_slice(), b"hello world\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_pipe_executor_reports_exit_status() {
        let (handler, _) = capture();
        let err = PipeExecutor.run("false", &handler).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ExecError>(),
            Some(&ExecError::ExitStatus(1))
        );
    }

    #[tokio::test]
    async fn test_pipe_executor_missing_program() {
        let (handler, _) = capture();
        let err = PipeExecutor
            .run("definitely-not-a-real-program-42", &handler)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to start"), "got: {err:#}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_pty_executor_streams_output() {
        let (handler, captured) = capture();
        PtyExecutor::default()
            .run("echo from-a-pty", &handler)
            .await
            .unwrap();
        assert_eq!(captured.lock().unwrap().as_slice(), b"from-a-pty\r\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_pty_executor_silent_command_writes_nothing() {
        let (handler, captured) = capture();
        PtyExecutor::default().run("true", &handler).await.unwrap();
        assert!(captured.lock().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_pty_executor_keeps_output_without_newline() {
        let (handler, captured) = capture();
        PtyExecutor::default().run("printf x", &handler).await.unwrap();
        assert_eq!(captured.lock().unwrap().as_slice(), b"x");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_pty_executor_stdin_reader_sees_end_of_input() {
        let (handler, captured) = capture();
        PtyExecutor::default().run("cat", &handler).await.unwrap();
        assert!(captured.lock().unwrap().is_empty());
    }
}
