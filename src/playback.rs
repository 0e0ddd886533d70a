//! Turning a command list into the ordered steps of a demo.

use crate::prompt::Prompt;
use crate::step::PlaybackStep;
use crate::steps::{ClearScreen, Emit, Execute, ShowPrompt, TypeText, Wait};
use std::time::Duration;

/// Timing and presentation settings for one run.
#[derive(Debug, Clone)]
pub struct Playback {
    /// Delay after each typed character.
    pub char_delay: Duration,
    /// Random extra delay per character, up to this much.
    pub char_jitter: Duration,
    /// Pause before typing each command.
    pub pre_delay: Duration,
    /// Pause after each command's output and prompt.
    pub post_delay: Duration,
    /// Clear the screen between commands.
    pub clear_between: bool,
    pub prompt: Prompt,
}

impl Playback {
    /// Build the steps for `commands`.
    ///
    /// The screen is cleared and the prompt drawn once up front. Then, per
    /// command: wait, type, newline, execute, prompt, wait and, unless it is
    /// the last command, clear and prompt again. Zero delays produce no wait
    /// step.
    pub fn plan(&self, commands: &[String]) -> Vec<Box<dyn PlaybackStep>> {
        let mut steps: Vec<Box<dyn PlaybackStep>> =
            vec![Box::new(ClearScreen), self.prompt_step()];

        for (idx, command) in commands.iter().enumerate() {
            if !self.pre_delay.is_zero() {
                steps.push(Box::new(Wait::new(self.pre_delay)));
            }
            steps.push(Box::new(TypeText::with_jitter(
                command.as_str(),
                self.char_delay,
                self.char_jitter,
            )));
            steps.push(Box::new(Emit::newline()));
            steps.push(Box::new(Execute::new(command.as_str())));
            steps.push(self.prompt_step());
            if !self.post_delay.is_zero() {
                steps.push(Box::new(Wait::new(self.post_delay)));
            }

            let is_last = idx + 1 == commands.len();
            if self.clear_between && !is_last {
                steps.push(Box::new(ClearScreen));
                steps.push(self.prompt_step());
            }
        }

        steps
    }

    fn prompt_step(&self) -> Box<dyn PlaybackStep> {
        Box::new(ShowPrompt::new(&self.prompt))
    }
}
