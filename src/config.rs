//! User configuration.
//!
//! Values are layered, lowest priority first: built-in defaults, the YAML
//! config file, `AUTOTYPER_*` environment variables and finally command-line
//! flags (applied by the binary).
//!
//! ```yaml
//! # ~/.autotyper.yaml
//! char-delay: 40ms
//! pre-delay: 1s
//! post-delay: 2500
//! shell: bash
//! username: demo
//! hostname: laptop
//! path: ~/projects
//! no-cls: false
//! executor: pty
//! ```

use crate::executor::ExecutorKind;
use crate::playback::Playback;
use crate::prompt::{Prompt, Shell};
use anyhow::{Context as _, Result, anyhow};
use serde::{Deserialize, Deserializer};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up in the home directory when no `--config` is given.
pub const DEFAULT_FILE_NAME: &str = ".autotyper.yaml";

/// Prefix of every environment variable read by [`Config::apply_env`].
pub const ENV_PREFIX: &str = "AUTOTYPER_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    #[serde(deserialize_with = "deserialize_duration")]
    pub char_delay: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub char_jitter: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub pre_delay: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub post_delay: Duration,
    pub shell: Shell,
    pub username: String,
    pub hostname: String,
    /// Empty means the shell's default path.
    pub path: String,
    pub no_cls: bool,
    pub executor: ExecutorKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            char_delay: Duration::from_millis(75),
            char_jitter: Duration::ZERO,
            pre_delay: Duration::from_millis(500),
            post_delay: Duration::from_millis(3500),
            shell: Shell::PowerShell,
            username: "user".to_string(),
            hostname: "localhost".to_string(),
            path: String::new(),
            no_cls: false,
            executor: ExecutorKind::Pty,
        }
    }
}

impl Config {
    /// `~/.autotyper.yaml`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_FILE_NAME))
    }

    /// Load the config file and return it with the path it came from.
    ///
    /// An explicit path must exist. Without one, the default file is used if
    /// present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Ok((Self::from_file(&path)?, Some(path))),
            _ => Ok((Self::default(), None)),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse YAML. An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Override fields from `AUTOTYPER_*` environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| env::var(key).ok())
    }

    /// Like [`apply_env`](Self::apply_env), reading variables through `lookup`.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |name: &str| {
            let key = format!("{ENV_PREFIX}{name}");
            lookup(&key).map(|value| (key, value))
        };

        if let Some((key, value)) = var("CHAR_DELAY") {
            self.char_delay = parse_duration(&value).with_context(|| key)?;
        }
        if let Some((key, value)) = var("CHAR_JITTER") {
            self.char_jitter = parse_duration(&value).with_context(|| key)?;
        }
        if let Some((key, value)) = var("PRE_DELAY") {
            self.pre_delay = parse_duration(&value).with_context(|| key)?;
        }
        if let Some((key, value)) = var("POST_DELAY") {
            self.post_delay = parse_duration(&value).with_context(|| key)?;
        }
        if let Some((key, value)) = var("SHELL") {
            self.shell = value.parse().with_context(|| key)?;
        }
        if let Some((_, value)) = var("USERNAME") {
            self.username = value;
        }
        if let Some((_, value)) = var("HOSTNAME") {
            self.hostname = value;
        }
        if let Some((_, value)) = var("PATH") {
            self.path = value;
        }
        if let Some((key, value)) = var("NO_CLS") {
            self.no_cls = parse_bool(&value).with_context(|| key)?;
        }
        if let Some((key, value)) = var("EXECUTOR") {
            self.executor = value.parse().with_context(|| key)?;
        }
        Ok(())
    }

    pub fn prompt(&self) -> Prompt {
        Prompt::new(&self.username, &self.hostname, &self.path, self.shell)
    }

    pub fn playback(&self) -> Playback {
        Playback {
            char_delay: self.char_delay,
            char_jitter: self.char_jitter,
            pre_delay: self.pre_delay,
            post_delay: self.post_delay,
            clear_between: !self.no_cls,
            prompt: self.prompt(),
        }
    }
}

/// Parse a duration: `500` (milliseconds), `500ms`, `1s` or `1.5s`.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if let Ok(ms) = s.parse::<u64>() {
        return Ok(Duration::from_millis(ms));
    }
    if let Some(ms_str) = s.strip_suffix("ms") {
        let ms: u64 = ms_str
            .trim()
            .parse()
            .context("Invalid milliseconds value")?;
        Ok(Duration::from_millis(ms))
    } else if let Some(s_str) = s.strip_suffix('s') {
        let secs: f64 = s_str.trim().parse().context("Invalid seconds value")?;
        Duration::try_from_secs_f64(secs).map_err(|e| anyhow!("Invalid seconds value: {}", e))
    } else {
        Err(anyhow!(
            "Duration must be milliseconds or end with 's' or 'ms', got: {}",
            s
        ))
    }
}

fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("Expected a boolean, got: {}", other)),
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Millis(ms) => Ok(Duration::from_millis(ms)),
        Raw::Text(text) => parse_duration(&text).map_err(serde::de::Error::custom),
    }
}
