//! Simulated shell prompts.
//!
//! A [`Prompt`] is built once per run and rendered after every command. Three
//! styles are supported, selected by [`Shell`]:
//!
//! | Shell | Rendered |
//! |-------|----------|
//! | `ps`   | `PS C:\> ` |
//! | `cmd`  | `C:\> ` |
//! | `bash` | `user@host:~$ ` (user/host in green, path in blue) |

use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

const GREEN: &str = "\x1b[38;5;82m";
const BLUE: &str = "\x1b[38;5;32m";
const RESET: &str = "\x1b[0m";

/// The shell whose prompt is imitated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Shell {
    #[default]
    PowerShell,
    Cmd,
    Bash,
}

impl Shell {
    /// Path shown when none is configured.
    pub fn default_path(self) -> &'static str {
        match self {
            Shell::PowerShell | Shell::Cmd => "C:\\",
            Shell::Bash => "~",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shell::PowerShell => "ps",
            Shell::Cmd => "cmd",
            Shell::Bash => "bash",
        }
    }
}

impl FromStr for Shell {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ps" | "powershell" => Ok(Shell::PowerShell),
            "cmd" => Ok(Shell::Cmd),
            "bash" => Ok(Shell::Bash),
            other => Err(anyhow!(
                "unknown shell '{}', expected one of: bash, cmd, ps",
                other
            )),
        }
    }
}

impl TryFrom<String> for Shell {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to draw the prompt. Immutable for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub username: String,
    pub hostname: String,
    pub path: String,
    pub shell: Shell,
}

impl Prompt {
    /// Build a prompt. An empty `path` falls back to [`Shell::default_path`].
    pub fn new(
        username: impl Into<String>,
        hostname: impl Into<String>,
        path: impl Into<String>,
        shell: Shell,
    ) -> Self {
        let mut path = path.into();
        if path.is_empty() {
            path = shell.default_path().to_string();
        }
        Self {
            username: username.into(),
            hostname: hostname.into(),
            path,
            shell,
        }
    }

    /// Render the prompt, including the trailing space.
    pub fn render(&self) -> String {
        match self.shell {
            Shell::PowerShell => format!("PS {}> ", self.path),
            Shell::Cmd => format!("{}> ", self.path),
            Shell::Bash => format!(
                "{GREEN}{}@{}{RESET}:{BLUE}{}{RESET}$ ",
                self.username, self.hostname, self.path
            ),
        }
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_powershell() {
        let p = Prompt::new("alice", "box", "C:\\Users\\alice", Shell::PowerShell);
        assert_eq!(p.render(), "PS C:\\Users\\alice> ");
    }

    #[test]
    fn test_render_cmd() {
        let p = Prompt::new("alice", "box", "D:\\work", Shell::Cmd);
        assert_eq!(p.render(), "D:\\work> ");
    }

    #[test]
    fn test_render_bash() {
        let p = Prompt::new("alice", "box", "/srv", Shell::Bash);
        assert_eq!(
            p.render(),
            "\x1b[38;5;82malice@box\x1b[0m:\x1b[38;5;32m/srv\x1b[0m$ "
        );
    }

    #[test]
    fn test_default_paths() {
        assert_eq!(Prompt::new("u", "h", "", Shell::PowerShell).render(), "PS C:\\> ");
        assert_eq!(Prompt::new("u", "h", "", Shell::Cmd).render(), "C:\\> ");
        assert!(Prompt::new("u", "h", "", Shell::Bash).render().contains(":\x1b[38;5;32m~"));
    }

    #[test]
    fn test_display_matches_render() {
        let p = Prompt::new("u", "h", "", Shell::Cmd);
        assert_eq!(p.to_string(), p.render());
    }

    #[test]
    fn test_parse_shell() {
        assert_eq!("ps".parse::<Shell>().unwrap(), Shell::PowerShell);
        assert_eq!("PowerShell".parse::<Shell>().unwrap(), Shell::PowerShell);
        assert_eq!("cmd".parse::<Shell>().unwrap(), Shell::Cmd);
        assert_eq!(" bash ".parse::<Shell>().unwrap(), Shell::Bash);
        assert!("zsh".parse::<Shell>().is_err());
    }
}
