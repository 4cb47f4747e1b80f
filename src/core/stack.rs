use std::sync::Arc;
use std::time::Duration;

use crate::core::engine::SwipeEngine;
use crate::core::handler::{dispatch, NoopHandler, SwipeHandler};
use crate::error::SwipeError;
use crate::models::{
    CardState, CardView, InputEvent, Profile, StackBehavior, SwipeConfig, SwipeDirection,
    SwipeOutcome,
};

/// Stack of profile cards with one interactive card on top
///
/// The deck is shared read-only; only the top card carries a
/// [`SwipeEngine`]. When it settles the handler is told once and, if
/// `advance_on_swipe` is set, the next profile becomes the top card with
/// fresh zeroed state.
#[derive(Debug)]
pub struct CardStack<H: SwipeHandler = NoopHandler> {
    profiles: Arc<[Profile]>,
    top: usize,
    engine: SwipeEngine,
    behavior: StackBehavior,
    handler: H,
}

impl CardStack<NoopHandler> {
    /// Stack with default motion and behavior that discards outcomes
    pub fn with_defaults(profiles: impl Into<Arc<[Profile]>>) -> Self {
        Self {
            profiles: profiles.into(),
            top: 0,
            engine: SwipeEngine::default(),
            behavior: StackBehavior::default(),
            handler: NoopHandler,
        }
    }
}

impl<H: SwipeHandler> CardStack<H> {
    pub fn new(
        profiles: impl Into<Arc<[Profile]>>,
        config: SwipeConfig,
        behavior: StackBehavior,
        handler: H,
    ) -> Result<Self, SwipeError> {
        let engine = SwipeEngine::new(config)?;
        let profiles = profiles.into();

        tracing::debug!(
            "Card stack ready with {} profiles (spring_back: {}, advance_on_swipe: {})",
            profiles.len(),
            behavior.spring_back,
            behavior.advance_on_swipe
        );

        Ok(Self {
            profiles,
            top: 0,
            engine,
            behavior,
            handler,
        })
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn behavior(&self) -> StackBehavior {
        self.behavior
    }

    pub fn engine(&self) -> &SwipeEngine {
        &self.engine
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Profile on top of the stack, if any remain
    pub fn top_profile(&self) -> Option<&Profile> {
        self.profiles.get(self.top)
    }

    /// Offsets of the top card, if any remain
    pub fn top_card(&self) -> Option<CardState> {
        self.top_profile().map(|_| self.engine.card())
    }

    /// Profiles not yet swiped away, including the top card
    pub fn remaining(&self) -> usize {
        self.profiles.len().saturating_sub(self.top)
    }

    pub fn is_flying(&self) -> bool {
        self.top_profile().is_some() && self.engine.is_flying()
    }

    /// True once no card can receive input any more
    pub fn is_exhausted(&self) -> bool {
        self.top_profile().is_none() || self.engine.outcome().is_some()
    }

    /// Feed a drag delta to the top card
    pub fn drag(&mut self, delta: f64) -> Option<SwipeDirection> {
        self.top_profile()?;
        self.engine.drag(delta)
    }

    /// Finger lifted; springs an uncommitted card back when configured to
    pub fn release(&mut self) -> bool {
        if self.top_profile().is_none() || !self.behavior.spring_back {
            return false;
        }
        self.engine.spring_back()
    }

    /// Like button: same as a completed swipe to the right
    pub fn like(&mut self) -> bool {
        self.fling(SwipeDirection::Right)
    }

    /// Dislike button: same as a completed swipe to the left
    pub fn dislike(&mut self) -> bool {
        self.fling(SwipeDirection::Left)
    }

    fn fling(&mut self, direction: SwipeDirection) -> bool {
        if self.top_profile().is_none() {
            return false;
        }
        self.engine.fling(direction)
    }

    /// Route a host input event to the top card
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Drag { delta } => {
                self.drag(delta);
            }
            InputEvent::Release => {
                self.release();
            }
            InputEvent::Like => {
                self.like();
            }
            InputEvent::Dislike => {
                self.dislike();
            }
        }
    }

    /// Advance the top card's fly-off by wall-clock time
    pub fn tick(&mut self, elapsed: Duration) -> Option<SwipeOutcome> {
        self.top_profile()?;
        let outcome = self.engine.tick(elapsed)?;
        self.resolve(outcome);
        Some(outcome)
    }

    /// Advance the top card's fly-off by a number of fixed steps
    pub fn advance_steps(&mut self, steps: u64) -> Option<SwipeOutcome> {
        self.top_profile()?;
        let outcome = self.engine.advance(steps)?;
        self.resolve(outcome);
        Some(outcome)
    }

    fn resolve(&mut self, outcome: SwipeOutcome) {
        let profiles = Arc::clone(&self.profiles);
        let Some(profile) = profiles.get(self.top) else {
            return;
        };

        tracing::info!("{} swiped: {:?}", profile.name, outcome);
        dispatch(&mut self.handler, outcome, profile);

        if self.behavior.advance_on_swipe {
            self.top += 1;
            self.engine.reset();
            if let Some(next) = self.top_profile() {
                tracing::debug!("Next card: {}", next.name);
            } else {
                tracing::info!("Card stack exhausted");
            }
        }
    }

    /// Cards to draw this frame, bottom of the stack first
    ///
    /// The top card comes last and carries the engine's offsets; cards
    /// beneath it sit at the origin.
    pub fn visible_cards(&self) -> Vec<CardView<'_>> {
        let interactive = !self.is_exhausted();

        (self.top..self.profiles.len())
            .rev()
            .map(|index| {
                tracing::trace!("Card Index: {}", index);
                let is_top = index == self.top;
                CardView {
                    index,
                    profile: &self.profiles[index],
                    state: if is_top { self.engine.card() } else { CardState::default() },
                    interactive: is_top && interactive,
                }
            })
            .collect()
    }
}
