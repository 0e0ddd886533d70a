//! The [`PlaybackStep`] trait and the [`Context`] type steps receive when run.

use crate::executor::Executor;
use anyhow::Result;
use async_trait::async_trait;
use std::io::{self, Write};
use std::sync::Arc;

/// Sink for every byte the viewer sees.
pub type OutputHandler = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// Execution context passed to [`PlaybackStep::execute`].
///
/// Provides the output handler and the executor used to run commands.
pub struct Context {
    pub(crate) executor: Box<dyn Executor>,
    pub(crate) output_handler: OutputHandler,
}

impl Context {
    pub fn new(executor: Box<dyn Executor>, output_handler: OutputHandler) -> Self {
        Self {
            executor,
            output_handler,
        }
    }

    /// Pass bytes through the output handler (e.g. to stdout or a custom sink).
    pub fn emit(&self, data: &[u8]) {
        (self.output_handler)(data);
    }

    pub fn emit_str(&self, text: &str) {
        self.emit(text.as_bytes());
    }

    /// Run `command` with the configured executor, streaming its output
    /// through the output handler.
    pub async fn run_command(&self, command: &str) -> Result<()> {
        self.executor.run(command, &self.output_handler).await
    }
}

/// Output handler that writes to stdout and flushes after every chunk so
/// single typed characters show up immediately.
pub fn stdout_handler() -> OutputHandler {
    Arc::new(|data: &[u8]| {
        let mut out = io::stdout().lock();
        // Nothing sensible to do when the terminal went away.
        let _ = out.write_all(data);
        let _ = out.flush();
    })
}

/// A single unit of playback.
///
/// Steps are built by [`crate::playback::Playback::plan`] and run in order by
/// [`crate::engine::Engine::execute`]. A step that returns an error does not
/// stop the run; the engine reports it and moves on.
#[async_trait(?Send)]
pub trait PlaybackStep: 'static {
    /// The step name, accessible at runtime through a trait object.
    ///
    /// Implementations should return their `NAME` constant:
    /// `fn name(&self) -> &'static str { Self::NAME }`.
    fn name(&self) -> &'static str;

    /// Execute the step using the provided engine context.
    async fn execute(&self, ctx: &mut Context) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::executor::PipeExecutor;
    use std::sync::Mutex;

    /// A context whose output lands in the returned buffer.
    pub(crate) fn capture_context() -> (Context, Arc<Mutex<Vec<u8>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();
        let handler: OutputHandler = Arc::new(move |data: &[u8]| {
            sink.lock().unwrap().extend_from_slice(data);
        });
        (Context::new(Box::new(PipeExecutor), handler), captured)
    }

    pub(crate) fn captured_string(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8_lossy(&buffer.lock().unwrap()).into_owned()
    }
}
