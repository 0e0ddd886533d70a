//! [`Wait`] step: pauses playback for a fixed duration.

use crate::step::{Context, PlaybackStep};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Pauses playback for a fixed duration before running the next step.
pub struct Wait {
    pub duration: Duration,
}

impl Wait {
    pub const NAME: &'static str = "wait";

    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

#[async_trait(?Send)]
impl PlaybackStep for Wait {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn execute(&self, _ctx: &mut Context) -> Result<()> {
        tokio::time::sleep(self.duration).await;
        Ok(())
    }
}
