//! [`ShowPrompt`] step: draws the simulated shell prompt.

use crate::prompt::Prompt;
use crate::step::{Context, PlaybackStep};
use anyhow::Result;
use async_trait::async_trait;

/// Writes a pre-rendered prompt to the output handler.
pub struct ShowPrompt {
    pub rendered: String,
}

impl ShowPrompt {
    pub const NAME: &'static str = "prompt";

    pub fn new(prompt: &Prompt) -> Self {
        Self {
            rendered: prompt.render(),
        }
    }
}

#[async_trait(?Send)]
impl PlaybackStep for ShowPrompt {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn execute(&self, ctx: &mut Context) -> Result<()> {
        ctx.emit_str(&self.rendered);
        Ok(())
    }
}
