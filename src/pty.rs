use anyhow::{Context, Result};
use portable_pty::{Child, CommandBuilder, MasterPty, PtySize};
use std::io::{Read, Write};

/// End-of-transmission; read as end of input by a canonical-mode terminal.
const EOT: u8 = 0x04;

/// A single command running inside a PTY
pub struct PtySession {
    #[allow(dead_code)]
    master: Box<dyn MasterPty + Send>,
    child: Box<dyn Child + Send + Sync>,
    // Dropping the master writer sends a newline plus EOF to the command, which
    // the terminal echoes back. Held until the session goes away.
    #[allow(dead_code)]
    writer: Box<dyn Write + Send>,
}

impl PtySession {
    /// Spawn `program` in a fresh PTY, returning the session and reader separately
    pub fn spawn(
        program: &str,
        args: &[&str],
        rows: u16,
        cols: u16,
    ) -> Result<(Self, Box<dyn Read + Send>)> {
        let pty_system = portable_pty::native_pty_system();

        let pair = pty_system
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .context("Failed to open PTY")?;

        let mut cmd = CommandBuilder::new(program);
        for arg in args {
            cmd.arg(arg);
        }
        // CommandBuilder starts in the home directory unless told otherwise.
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        cmd.cwd(cwd);

        let child = pair
            .slave
            .spawn_command(cmd)
            .with_context(|| format!("failed to start `{}`", program))?;
        // Our copy of the slave must go, or the reader never sees EOF.
        drop(pair.slave);

        let reader = pair
            .master
            .try_clone_reader()
            .context("Failed to get PTY reader")?;

        // Nobody types into the command: EOT on an empty line reads as end of input.
        let mut writer = pair
            .master
            .take_writer()
            .context("Failed to get PTY writer")?;
        // Short-lived commands may already be gone, so a failed write is fine.
        if let Err(err) = writer.write_all(&[EOT]).and_then(|()| writer.flush()) {
            tracing::trace!(%err, "could not signal end of input");
        }

        let session = PtySession {
            master: pair.master,
            child,
            writer,
        };

        Ok((session, reader))
    }

    /// Wait for the child process to exit and return its exit code
    pub fn wait(&mut self) -> Result<u32> {
        let status = self.child.wait().context("Failed to wait for command")?;
        Ok(status.exit_code())
    }
}
