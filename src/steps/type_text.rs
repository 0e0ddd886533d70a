//! [`TypeText`] step: simulates human typing character by character.

use crate::step::{Context, PlaybackStep};
use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Highlight for the first word of a typed command (the program name).
const HIGHLIGHT: &str = "\x1b[38;5;229m";
const RESET: &str = "\x1b[0m";

/// Writes `text` to the output one character at a time, sleeping `delay`
/// (plus up to `jitter` extra) after each one.
///
/// The first word is highlighted; color is reset before every space and once
/// more at the end. With a zero `delay` the text is written in one go, without
/// any color codes.
pub struct TypeText {
    pub text: String,
    pub delay: Duration,
    pub jitter: Duration,
}

impl TypeText {
    pub const NAME: &'static str = "type";

    /// Create a `TypeText` step with a fixed per-character delay.
    pub fn new(text: impl Into<String>, delay: Duration) -> Self {
        Self::with_jitter(text, delay, Duration::ZERO)
    }

    /// Create a `TypeText` step whose delays vary by up to `jitter`.
    pub fn with_jitter(text: impl Into<String>, delay: Duration, jitter: Duration) -> Self {
        Self {
            text: text.into(),
            delay,
            jitter,
        }
    }

    fn next_delay(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.delay;
        }
        self.delay + rand::thread_rng().gen_range(Duration::ZERO..=self.jitter)
    }
}

#[async_trait(?Send)]
impl PlaybackStep for TypeText {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn execute(&self, ctx: &mut Context) -> Result<()> {
        if self.delay.is_zero() {
            ctx.emit_str(&self.text);
            return Ok(());
        }

        ctx.emit_str(HIGHLIGHT);
        let mut buf = [0u8; 4];
        for ch in self.text.chars() {
            if ch == ' ' {
                ctx.emit_str(RESET);
            }
            ctx.emit(ch.encode_utf8(&mut buf).as_bytes());
            sleep(self.next_delay()).await;
        }
        ctx.emit_str(RESET);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::testing::{capture_context, captured_string};

    #[tokio::test]
    async fn test_zero_delay_writes_plain_text() {
        let (mut ctx, captured) = capture_context();
        TypeText::new("ls -la", Duration::ZERO)
            .execute(&mut ctx)
            .await
            .unwrap();
        assert_eq!(captured_string(&captured), "ls -la");
    }

    #[tokio::test]
    async fn test_highlights_first_word() {
        let (mut ctx, captured) = capture_context();
        TypeText::new("ls -la", Duration::from_millis(1))
            .execute(&mut ctx)
            .await
            .unwrap();
        assert_eq!(
            captured_string(&captured),
            "\x1b[38;5;229mls\x1b[0m -la\x1b[0m"
        );
    }

    #[tokio::test]
    async fn test_resets_at_every_space() {
        let (mut ctx, captured) = capture_context();
        TypeText::new("a b c", Duration::from_millis(1))
            .execute(&mut ctx)
            .await
            .unwrap();
        assert_eq!(captured_string(&captured).matches(RESET).count(), 3);
    }

    #[tokio::test]
    async fn test_multibyte_characters() {
        let (mut ctx, captured) = capture_context();
        TypeText::new("échø", Duration::from_millis(1))
            .execute(&mut ctx)
            .await
            .unwrap();
        assert_eq!(captured_string(&captured), format!("{HIGHLIGHT}échø{RESET}"));
    }

    #[test]
    fn test_jitter_bounds() {
        let step = TypeText::with_jitter("x", Duration::from_millis(10), Duration::from_millis(5));
        for _ in 0..50 {
            let d = step.next_delay();
            assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(15));
        }
        let fine = TypeText::with_jitter("x", Duration::ZERO, Duration::from_micros(500));
        assert!((0..50).any(|_| !fine.next_delay().is_zero()));
        assert!((0..50).all(|_| fine.next_delay() <= Duration::from_micros(500)));
        assert_eq!(
            TypeText::new("x", Duration::from_millis(10)).next_delay(),
            Duration::from_millis(10)
        );
    }
}
