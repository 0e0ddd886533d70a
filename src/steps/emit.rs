//! [`Emit`] step: writes fixed text to the output handler.

use crate::step::{Context, PlaybackStep};
use anyhow::Result;
use async_trait::async_trait;

/// Writes fixed bytes to the output handler. Used for the line break that
/// ends a typed command.
pub struct Emit {
    pub data: Vec<u8>,
}

impl Emit {
    pub const NAME: &'static str = "emit";

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            data: text.into().into_bytes(),
        }
    }

    pub fn newline() -> Self {
        Self::new("\n")
    }
}

#[async_trait(?Send)]
impl PlaybackStep for Emit {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn execute(&self, ctx: &mut Context) -> Result<()> {
        ctx.emit(&self.data);
        Ok(())
    }
}
