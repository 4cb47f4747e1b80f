use std::time::Duration;

use crate::core::flight::{just_past, Flight};
use crate::error::SwipeError;
use crate::models::{CardState, SwipeConfig, SwipeDirection, SwipeOutcome};

/// Lifecycle of a single card
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardPhase {
    /// Following the finger
    Dragging,
    /// Committed and walking off-screen
    Flying(Flight),
    /// Off-screen; the outcome has been reported
    Settled(SwipeOutcome),
}

/// Interaction state machine for the top card
///
/// # State transitions
/// 1. `Dragging`: each drag delta moves `offset_x`
/// 2. `Flying`: entered once `|offset_x|` exceeds the threshold, or on a
///    like/dislike press; advanced by [`SwipeEngine::step`],
///    [`SwipeEngine::advance`] or [`SwipeEngine::tick`]
/// 3. `Settled`: the step that reaches the exit anchor reports the outcome
///
/// There is no way back to `Dragging` once a card has been committed.
#[derive(Debug, Clone)]
pub struct SwipeEngine {
    config: SwipeConfig,
    card: CardState,
    phase: CardPhase,
    // Fractional steps owed from previous ticks
    carry: f64,
}

impl SwipeEngine {
    /// Engine for a fresh card at the origin; rejects invalid motion settings
    pub fn new(config: SwipeConfig) -> Result<Self, SwipeError> {
        Ok(Self::with_checked(config.checked()?))
    }

    fn with_checked(config: SwipeConfig) -> Self {
        Self {
            config,
            card: CardState::default(),
            phase: CardPhase::Dragging,
            carry: 0.0,
        }
    }

    /// Put a fresh card at the origin, keeping the configuration
    pub fn reset(&mut self) {
        *self = Self::with_checked(self.config);
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn card(&self) -> CardState {
        self.card
    }

    pub fn phase(&self) -> &CardPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, CardPhase::Dragging)
    }

    pub fn is_flying(&self) -> bool {
        matches!(self.phase, CardPhase::Flying(_))
    }

    /// Outcome of this card, once settled
    pub fn outcome(&self) -> Option<SwipeOutcome> {
        match self.phase {
            CardPhase::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Apply a horizontal drag delta
    ///
    /// Returns the committed direction when this delta pushes the card past
    /// the threshold. Ignored unless the card is still being dragged.
    pub fn drag(&mut self, delta: f64) -> Option<SwipeDirection> {
        if !self.is_dragging() {
            tracing::trace!("Ignoring drag delta {} outside of drag phase", delta);
            return None;
        }

        if !delta.is_finite() {
            tracing::warn!("Ignoring non-finite drag delta: {}", delta);
            return None;
        }

        self.card.offset_x += delta;
        tracing::trace!("Offset: {}, Delta: {}", self.card.offset_x, delta);

        let direction = if self.card.offset_x > self.config.threshold {
            SwipeDirection::Right
        } else if self.card.offset_x < -self.config.threshold {
            SwipeDirection::Left
        } else {
            return None;
        };

        if !self.launch(direction) {
            return None;
        }
        Some(direction)
    }

    /// Commit the card as if a gesture had just crossed the threshold on
    /// `direction`'s side
    ///
    /// The card is placed just past the threshold, where the smallest
    /// committing drag would leave it, and launched from there.
    pub fn fling(&mut self, direction: SwipeDirection) -> bool {
        if !self.is_dragging() {
            tracing::trace!("Ignoring {:?} fling outside of drag phase", direction);
            return false;
        }

        let dropped_at = self.card;
        self.card.offset_x = direction.sign() * just_past(self.config.threshold);
        if !self.launch(direction) {
            self.card = dropped_at;
            return false;
        }
        true
    }

    /// Return an uncommitted card to the origin
    pub fn spring_back(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }

        if !self.card.is_origin() {
            tracing::debug!("Springing card back from offset {}", self.card.offset_x);
        }
        self.card = CardState::default();
        true
    }

    /// Advance the fly-off by one fixed step
    pub fn step(&mut self) -> Option<SwipeOutcome> {
        self.advance(1)
    }

    /// Advance the fly-off by up to `steps` fixed steps
    ///
    /// Returns the outcome exactly once: from the call that reaches the
    /// exit anchor.
    pub fn advance(&mut self, steps: u64) -> Option<SwipeOutcome> {
        let CardPhase::Flying(flight) = &mut self.phase else {
            return None;
        };

        flight.advance(steps);
        self.card = flight.position();

        if !flight.is_complete() {
            return None;
        }

        let outcome = flight.direction().outcome();
        tracing::debug!(
            "Card settled at ({:.3}, {:.3}) after {} steps: {:?}",
            self.card.offset_x,
            self.card.offset_y,
            flight.total_steps(),
            outcome
        );

        self.phase = CardPhase::Settled(outcome);
        self.carry = 0.0;
        Some(outcome)
    }

    /// Advance the fly-off by the steps owed for `elapsed` wall-clock time
    ///
    /// Step count is `elapsed * steps_per_second`; the fractional remainder is
    /// carried into the next tick, so total travel does not depend on frame
    /// rate.
    pub fn tick(&mut self, elapsed: Duration) -> Option<SwipeOutcome> {
        if !self.is_flying() {
            return None;
        }

        let budget = self.carry + elapsed.as_secs_f64() * self.config.steps_per_second;
        let whole = budget.floor();
        self.carry = budget - whole;

        if whole < 1.0 {
            return None;
        }

        self.advance(whole as u64)
    }

    fn launch(&mut self, direction: SwipeDirection) -> bool {
        let flight = match Flight::launch(
            self.card,
            direction,
            self.config.threshold,
            self.config.exit_distance,
            self.config.velocity_x,
            self.config.velocity_y,
        ) {
            Ok(flight) => flight,
            Err(e) => {
                tracing::error!("Failed to launch {:?} swipe: {}", direction, e);
                return false;
            }
        };

        tracing::debug!(
            "Swipe {:?} committed at offset {:.3}; exit anchor {:.3} in {} steps",
            direction,
            self.card.offset_x,
            flight.anchor_x(),
            flight.total_steps()
        );

        self.phase = CardPhase::Flying(flight);
        self.carry = 0.0;
        true
    }
}

impl Default for SwipeEngine {
    fn default() -> Self {
        Self::with_checked(SwipeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> SwipeConfig {
        SwipeConfig {
            threshold: 10.0,
            exit_distance: 20.0,
            velocity_x: 1.0,
            velocity_y: 0.5,
            steps_per_second: 100.0,
        }
    }

    #[test]
    fn test_drag_accumulates_below_threshold() {
        let mut engine = SwipeEngine::default();
        let deltas = [12.5, -40.0, 100.25, 3.0, -75.5];

        let mut expected = 0.0;
        for delta in deltas {
            expected += delta;
            assert_eq!(engine.drag(delta), None);
            assert_eq!(engine.card().offset_x, expected);
        }

        assert!(engine.is_dragging());
        assert_eq!(engine.card().offset_y, 0.0);
    }

    #[test]
    fn test_exactly_threshold_does_not_commit() {
        let mut engine = SwipeEngine::default();
        assert_eq!(engine.drag(250.0), None);
        assert!(engine.is_dragging());
        assert_eq!(engine.drag(-500.0), None);
        assert!(engine.is_dragging());
    }

    fn fast_engine() -> SwipeEngine {
        SwipeEngine::new(fast_config()).unwrap()
    }

    #[test]
    fn test_crossing_threshold_commits_right() {
        let mut engine = fast_engine();
        assert_eq!(engine.drag(6.0), None);
        assert_eq!(engine.drag(6.0), Some(SwipeDirection::Right));
        assert!(engine.is_flying());

        // Further input is ignored
        assert_eq!(engine.drag(-100.0), None);
        assert!(!engine.fling(SwipeDirection::Left));
        assert_eq!(engine.card().offset_x, 12.0);
    }

    #[test]
    fn test_flight_reports_outcome_once() {
        let mut engine = fast_engine();
        engine.drag(-11.0);

        let mut outcomes = Vec::new();
        for _ in 0..100 {
            if let Some(outcome) = engine.step() {
                outcomes.push(outcome);
            }
        }

        assert_eq!(outcomes, vec![SwipeOutcome::SwipedLeft]);
        assert_eq!(engine.outcome(), Some(SwipeOutcome::SwipedLeft));
        assert_eq!(engine.card(), CardState::new(-31.0, -10.0));
    }

    #[test]
    fn test_fling_starts_just_past_threshold() {
        let mut engine = fast_engine();
        engine.drag(-4.0);

        assert!(engine.fling(SwipeDirection::Right));
        assert!(engine.card().offset_x > 10.0);
        assert!(engine.card().offset_x < 10.001);

        assert_eq!(engine.advance(u64::MAX), Some(SwipeOutcome::SwipedRight));
        assert!(engine.card().offset_x > 30.0);
        assert!(engine.card().offset_y < 0.0);
    }

    #[test]
    fn test_buttons_finish_strictly_beyond_exit() {
        let mut liked = SwipeEngine::default();
        assert!(liked.fling(SwipeDirection::Right));
        assert_eq!(liked.advance(u64::MAX), Some(SwipeOutcome::SwipedRight));
        assert!(liked.card().offset_x > 750.0);
        assert!(liked.card().offset_y < 0.0);

        let mut disliked = SwipeEngine::default();
        assert!(disliked.fling(SwipeDirection::Left));
        assert_eq!(disliked.advance(u64::MAX), Some(SwipeOutcome::SwipedLeft));
        assert!(disliked.card().offset_x < -750.0);
        assert!(disliked.card().offset_y < 0.0);
    }

    #[test]
    fn test_new_rejects_zero_velocity() {
        let config = SwipeConfig { velocity_x: 0.0, ..SwipeConfig::default() };
        assert!(SwipeEngine::new(config).is_err());

        let config = SwipeConfig { threshold: f64::NAN, ..SwipeConfig::default() };
        assert!(matches!(SwipeEngine::new(config), Err(SwipeError::NonFinite { .. })));
    }

    #[test]
    fn test_reset_returns_fresh_card() {
        let mut engine = fast_engine();
        engine.drag(-11.0);
        engine.advance(u64::MAX);
        assert!(engine.outcome().is_some());

        engine.reset();
        assert!(engine.is_dragging());
        assert!(engine.card().is_origin());
        assert_eq!(engine.config(), &fast_config());
    }

    #[test]
    fn test_spring_back_only_while_dragging() {
        let mut engine = fast_engine();
        engine.drag(7.0);
        assert!(engine.spring_back());
        assert!(engine.card().is_origin());

        engine.drag(11.0);
        assert!(!engine.spring_back());
        assert_eq!(engine.card().offset_x, 11.0);
    }

    #[test]
    fn test_tick_carries_fractional_steps() {
        let mut engine = fast_engine();
        engine.drag(15.0);

        // 100 steps/s: 5ms is half a step
        assert_eq!(engine.tick(Duration::from_millis(5)), None);
        assert_eq!(engine.card().offset_x, 15.0);

        assert_eq!(engine.tick(Duration::from_millis(5)), None);
        assert_eq!(engine.card().offset_x, 16.0);

        assert_eq!(engine.tick(Duration::from_secs(1)), Some(SwipeOutcome::SwipedRight));
        assert_eq!(engine.card().offset_x, 35.0);
        assert_eq!(engine.tick(Duration::from_secs(1)), None);
    }

    #[test]
    fn test_tick_ignored_while_dragging() {
        let mut engine = fast_engine();
        engine.drag(3.0);
        assert_eq!(engine.tick(Duration::from_secs(10)), None);
        assert_eq!(engine.card().offset_x, 3.0);
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let mut engine = fast_engine();
        engine.drag(2.0);
        assert_eq!(engine.drag(f64::NAN), None);
        assert_eq!(engine.drag(f64::INFINITY), None);
        assert_eq!(engine.card().offset_x, 2.0);
        assert!(engine.is_dragging());
    }
}
