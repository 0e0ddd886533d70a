//! [`ClearScreen`] step: wipes the terminal and homes the cursor.

use crate::step::{Context, PlaybackStep};
use anyhow::Result;
use async_trait::async_trait;

/// Erase display, then move the cursor to row 1, column 1.
pub const CLEAR_SEQUENCE: &str = "\x1B[2J\x1B[1;1H";

pub struct ClearScreen;

impl ClearScreen {
    pub const NAME: &'static str = "clear";
}

#[async_trait(?Send)]
impl PlaybackStep for ClearScreen {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn execute(&self, ctx: &mut Context) -> Result<()> {
        ctx.emit_str(CLEAR_SEQUENCE);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::testing::{capture_context, captured_string};

    #[tokio::test]
    async fn test_emits_clear_sequence() {
        let (mut ctx, captured) = capture_context();
        ClearScreen.execute(&mut ctx).await.unwrap();
        assert_eq!(captured_string(&captured), "\x1B[2J\x1B[1;1H");
    }
}
