//! # Autotyper
//!
//! Simulate a person typing commands into a terminal.
//!
//! Autotyper draws a shell prompt, types each command one character at a
//! time, runs it, shows its output and moves on to the next one, optionally
//! clearing the screen in between. It is meant for recording demos and
//! walkthroughs of command-line tools.
//!
//! ## Quick start
//!
//! ```no_run
//! use autotyper::{Config, Engine, split_commands};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let commands = split_commands("whoami\nhostname\n");
//!
//!     let steps = config.playback().plan(&commands);
//!     let mut engine = Engine::new(config.executor.build());
//!     engine.execute(steps).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Playback
//!
//! [`Playback::plan`] turns the command list into [`PlaybackStep`]s:
//!
//! | Step | Description |
//! |------|-------------|
//! | `clear` | Clear the screen and home the cursor |
//! | `prompt` | Draw the simulated prompt |
//! | `wait` | Pause before or after a command |
//! | `type` | Type the command with per-character delays |
//! | `emit` | Write fixed text (the newline after typing) |
//! | `execute` | Run the command and stream its output |
//!
//! Steps that fail (a command that exits non-zero, a program that cannot be
//! found) are reported as `Error: ...` in the output and playback continues.
//!
//! ## Custom output handling
//!
//! By default [`Engine::new`] writes everything to stdout. Use
//! [`Engine::with_handler`] to send output to any sink:
//!
//! ```no_run
//! use autotyper::{Config, Engine, PipeExecutor, split_commands};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config { no_cls: true, ..Config::default() };
//!     let steps = config.playback().plan(&split_commands("echo hello"));
//!
//!     let captured = std::sync::Arc::new(std::sync::Mutex::new(Vec::<u8>::new()));
//!     let sink = captured.clone();
//!     let mut engine = Engine::with_handler(Box::new(PipeExecutor), move |data| {
//!         sink.lock().unwrap().extend_from_slice(data);
//!     });
//!
//!     engine.execute(steps).await;
//!     println!("{}", String::from_utf8_lossy(&captured.lock().unwrap()));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod executor;
pub mod input;
pub mod playback;
pub mod prompt;
pub(crate) mod pty;
pub(crate) mod pty_reader;
pub mod step;
pub mod steps;

pub use config::Config;
pub use engine::Engine;
pub use executor::{ExecError, Executor, ExecutorKind, PipeExecutor, PtyExecutor};
pub use input::split_commands;
pub use playback::Playback;
pub use prompt::{Prompt, Shell};
pub use step::{Context, PlaybackStep};
pub use steps::{ClearScreen, Emit, Execute, ShowPrompt, TypeText, Wait};
