//! Where the commands come from.
//!
//! The top-level entry points are [`acquire`] and [`split_commands`].

use anyhow::{Context as _, Result};
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use tracing::debug;

/// Collect the input text, in order of preference:
///
/// 1. the file at `input_file`,
/// 2. `args` joined with single spaces (one command),
/// 3. standard input, when it is piped or redirected.
///
/// Returns `Ok(None)` when there is nothing to play back, including input
/// that is empty after normalisation.
///
/// # Errors
///
/// Returns an error if the file or standard input cannot be read.
pub fn acquire(input_file: Option<&Path>, args: &[String]) -> Result<Option<String>> {
    let text = if let Some(path) = input_file {
        debug!(path = %path.display(), "reading commands from file");
        read_file(path)?
    } else if !args.is_empty() {
        debug!("using command-line arguments as the command");
        args.join(" ")
    } else if !io::stdin().is_terminal() {
        debug!("reading commands from standard input");
        read_stdin()?
    } else {
        return Ok(None);
    };

    Ok(Some(text).filter(|text| !text.is_empty()))
}

/// Read a command file. Bytes that are not valid UTF-8 become U+FFFD.
///
/// # Example
///
/// ```no_run
/// use autotyper::input::{read_file, split_commands};
///
/// let commands = split_commands(&read_file("demo.txt").unwrap());
/// ```
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    Ok(normalize(&String::from_utf8_lossy(&content)))
}

pub fn read_stdin() -> Result<String> {
    let mut content = Vec::new();
    io::stdin()
        .read_to_end(&mut content)
        .context("Failed to read standard input")?;
    Ok(normalize(&String::from_utf8_lossy(&content)))
}

/// Convert `\r\n` line endings to `\n` and drop trailing newlines.
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim_end_matches('\n').to_string()
}

/// Split input text into one command per line.
///
/// Blank lines in the middle are kept; they play back as empty commands.
///
/// ```
/// use autotyper::input::split_commands;
///
/// assert_eq!(split_commands("ls\r\npwd"), vec!["ls", "pwd"]);
/// ```
pub fn split_commands(text: &str) -> Vec<String> {
    normalize(text).split('\n').map(str::to_string).collect()
}
