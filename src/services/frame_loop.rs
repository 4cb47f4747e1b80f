use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};

use crate::core::{CardStack, SwipeHandler};
use crate::error::FrameError;
use crate::models::{CardView, InputEvent};

/// Draws the stack once per frame
pub trait Renderer {
    fn render(&mut self, frame: u64, cards: &[CardView<'_>]);
}

/// Renderer that writes the top card to the log
///
/// The card content (title, breed, bio, likes, verified badge) is logged
/// once each time a new card reaches the top; every frame logs its offset.
#[derive(Debug, Clone, Default)]
pub struct TracingRenderer {
    shown: Option<usize>,
}

impl TracingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deck index of the card whose content was logged last
    pub fn shown(&self) -> Option<usize> {
        self.shown
    }
}

/// Text lines of a card face, top to bottom
pub fn card_lines(card: &CardView<'_>) -> Vec<String> {
    let mut lines = vec![card.title(), card.subtitle().to_string()];
    if !card.body().is_empty() {
        lines.push(card.body().to_string());
    }
    if let Some(likes) = card.likes_line() {
        lines.push(likes);
    }
    if card.show_verified_badge() {
        lines.push("Verified".to_string());
    }
    lines
}

impl Renderer for TracingRenderer {
    fn render(&mut self, frame: u64, cards: &[CardView<'_>]) {
        let Some(top) = cards.last() else {
            tracing::trace!("Frame {}: empty stack", frame);
            return;
        };

        if self.shown != Some(top.index) {
            self.shown = Some(top.index);
            tracing::info!("Card on top: {}", card_lines(top).join(" | "));
        }

        let (x, y) = top.pixel_offset();
        tracing::trace!(
            "Frame {}: {} cards, top '{}' at ({}, {})",
            frame,
            cards.len(),
            top.title(),
            x,
            y
        );
    }
}

/// Counters collected over one loop run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub frames: u64,
    pub inputs_applied: usize,
    pub outcomes: usize,
}

/// Drives a card stack one frame at a time
///
/// Each frame applies at most one queued input, advances the fly-off by
/// the frame's elapsed time and renders. Inputs are held back while the top
/// card is flying. The loop ends when the queue is empty and nothing is
/// flying, or after `max_frames`.
#[derive(Debug, Clone, Copy)]
pub struct FrameLoop {
    frame_time: Duration,
    max_frames: u64,
}

impl FrameLoop {
    pub fn new(fps: f64, max_frames: u64) -> Result<Self, FrameError> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(FrameError::InvalidFrameRate(fps));
        }
        if max_frames == 0 {
            return Err(FrameError::ZeroFrameLimit);
        }

        // Rates too high round to a zero period, rates too low overflow
        let frame_time = Duration::try_from_secs_f64(1.0 / fps)
            .map_err(|_| FrameError::InvalidFrameRate(fps))?;
        if frame_time.is_zero() {
            return Err(FrameError::InvalidFrameRate(fps));
        }

        Ok(Self {
            frame_time,
            max_frames,
        })
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Run against a simulated clock: every frame lasts exactly `frame_time`
    pub fn replay<H, R>(
        &self,
        stack: &mut CardStack<H>,
        inputs: impl IntoIterator<Item = InputEvent>,
        renderer: &mut R,
    ) -> FrameStats
    where
        H: SwipeHandler,
        R: Renderer,
    {
        let mut queue: VecDeque<InputEvent> = inputs.into_iter().collect();
        let mut stats = FrameStats::default();

        while self.frame(stack, &mut queue, self.frame_time, renderer, &mut stats) {}

        stats
    }

    /// Run against the tokio clock at the configured frame rate
    pub async fn run<H, R>(
        &self,
        stack: &mut CardStack<H>,
        inputs: impl IntoIterator<Item = InputEvent>,
        renderer: &mut R,
    ) -> FrameStats
    where
        H: SwipeHandler,
        R: Renderer,
    {
        let mut queue: VecDeque<InputEvent> = inputs.into_iter().collect();
        let mut stats = FrameStats::default();

        let mut interval = tokio::time::interval(self.frame_time);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut last = Instant::now();
        loop {
            interval.tick().await;
            let now = Instant::now();
            let elapsed = now.duration_since(last);
            last = now;

            if !self.frame(stack, &mut queue, elapsed, renderer, &mut stats) {
                break;
            }
        }

        stats
    }

    fn frame<H, R>(
        &self,
        stack: &mut CardStack<H>,
        queue: &mut VecDeque<InputEvent>,
        elapsed: Duration,
        renderer: &mut R,
        stats: &mut FrameStats,
    ) -> bool
    where
        H: SwipeHandler,
        R: Renderer,
    {
        if stats.frames >= self.max_frames {
            tracing::warn!(
                "Frame limit {} reached with {} inputs pending",
                self.max_frames,
                queue.len()
            );
            return false;
        }

        if !stack.is_flying() {
            match queue.pop_front() {
                Some(event) => {
                    tracing::debug!("Applying input {:?}", event);
                    stack.apply(event);
                    stats.inputs_applied += 1;
                }
                None => return false,
            }
        }

        if stack.tick(elapsed).is_some() {
            stats.outcomes += 1;
        }

        stats.frames += 1;
        renderer.render(stats.frames, &stack.visible_cards());
        true
    }
}
