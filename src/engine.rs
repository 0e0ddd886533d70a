use crate::executor::Executor;
use crate::step::{Context, OutputHandler, PlaybackStep, stdout_handler};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Runs playback steps one after another against an output sink
pub struct Engine {
    ctx: Context,
}

impl Engine {
    /// Create an engine that writes everything to stdout
    pub fn new(executor: Box<dyn Executor>) -> Self {
        Self::with_output(executor, stdout_handler())
    }

    /// Create an engine that passes all output to `handler`
    pub fn with_handler<F>(executor: Box<dyn Executor>, handler: F) -> Self
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        Self::with_output(executor, Arc::new(handler))
    }

    fn with_output(executor: Box<dyn Executor>, output_handler: OutputHandler) -> Self {
        Engine {
            ctx: Context::new(executor, output_handler),
        }
    }

    /// Execute a sequence of steps and return how many of them failed.
    ///
    /// A failing step is reported on the output as `Error: ...` and does not
    /// stop the remaining steps.
    pub async fn execute(&mut self, steps: Vec<Box<dyn PlaybackStep>>) -> usize {
        let mut failures = 0;
        for (idx, step) in steps.iter().enumerate() {
            trace!(idx, step = step.name(), "running step");
            if let Err(err) = step.execute(&mut self.ctx).await {
                failures += 1;
                debug!(idx, step = step.name(), error = %format!("{err:#}"), "step failed");
                self.ctx.emit_str(&format!("Error: {err:#}\n"));
            }
        }

        if failures > 0 {
            warn!(failures, "playback finished with failed steps");
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::PipeExecutor;
    use crate::steps::{Emit, Execute};
    use std::sync::Mutex;

    fn engine() -> (Engine, Arc<Mutex<Vec<u8>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();
        let engine = Engine::with_handler(Box::new(PipeExecutor), move |data| {
            sink.lock().unwrap().extend_from_slice(data);
        });
        (engine, captured)
    }

    #[tokio::test]
    async fn test_runs_steps_in_order() {
        let (mut engine, captured) = engine();
        let steps: Vec<Box<dyn PlaybackStep>> =
            vec![Box::new(Emit::new("one ")), Box::new(Emit::new("two"))];
        assert_eq!(engine.execute(steps).await, 0);
        assert_eq!(captured.lock().unwrap().as_slice(), b"one two");
    }

    #[tokio::test]
    async fn test_failed_step_is_reported_and_skipped() {
        let (mut engine, captured) = engine();
        let steps: Vec<Box<dyn PlaybackStep>> = vec![
            Box::new(Execute::new("")),
            Box::new(Emit::new("after")),
        ];
        assert_eq!(engine.execute(steps).await, 1);
        let text = String::from_utf8_lossy(&captured.lock().unwrap()).into_owned();
        assert_eq!(text, "Error: no command to run\nafter");
    }
}
