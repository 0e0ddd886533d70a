//! [`Execute`] step: runs a command line on the host.

use crate::step::{Context, PlaybackStep};
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Runs `command` with the context's executor, streaming its output.
///
/// A failing command is returned as an error; the engine reports it and
/// carries on with the next step.
pub struct Execute {
    pub command: String,
}

impl Execute {
    pub const NAME: &'static str = "execute";

    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait(?Send)]
impl PlaybackStep for Execute {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn execute(&self, ctx: &mut Context) -> Result<()> {
        info!(command = %self.command, executor = ctx.executor.name(), "executing");
        ctx.run_command(&self.command).await
    }
}
