use crate::error::SwipeError;
use crate::models::domain::MAX_FLIGHT_STEPS;
use crate::models::{CardState, SwipeDirection};

/// Fixed-step walk of a committed card toward its exit anchor
///
/// Positions are derived from the step count (`origin + n * velocity`)
/// rather than accumulated, so long walks do not drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flight {
    direction: SwipeDirection,
    origin: CardState,
    anchor_x: f64,
    step_x: f64,
    step_y: f64,
    steps_taken: u64,
    total_steps: u64,
}

impl Flight {
    /// Start a walk from `origin`, ending `exit_distance` further along `direction`
    ///
    /// The walk ends on the first step at or past the anchor that is also
    /// strictly beyond `threshold + exit_distance` on the swiped side.
    pub fn launch(
        origin: CardState,
        direction: SwipeDirection,
        threshold: f64,
        exit_distance: f64,
        velocity_x: f64,
        velocity_y: f64,
    ) -> Result<Self, SwipeError> {
        let step_x = direction.sign() * velocity_x;
        let anchor_x = origin.offset_x + direction.sign() * exit_distance;
        let total_steps = steps_to_exit(origin.offset_x, anchor_x, step_x, threshold + exit_distance)
            .ok_or(SwipeError::UnreachableExit {
                start: origin.offset_x,
                anchor: anchor_x,
                step: step_x,
            })?;

        Ok(Self {
            direction,
            origin,
            anchor_x,
            step_x,
            // Always upward
            step_y: -velocity_y,
            steps_taken: 0,
            total_steps,
        })
    }

    pub fn direction(&self) -> SwipeDirection {
        self.direction
    }

    pub fn origin(&self) -> CardState {
        self.origin
    }

    pub fn anchor_x(&self) -> f64 {
        self.anchor_x
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn remaining_steps(&self) -> u64 {
        self.total_steps - self.steps_taken
    }

    pub fn is_complete(&self) -> bool {
        self.steps_taken >= self.total_steps
    }

    /// Current position of the card
    pub fn position(&self) -> CardState {
        self.position_at(self.steps_taken)
    }

    #[inline]
    fn position_at(&self, step: u64) -> CardState {
        let n = step as f64;
        CardState {
            offset_x: self.origin.offset_x + self.step_x * n,
            offset_y: self.origin.offset_y + self.step_y * n,
        }
    }

    /// Take up to `steps` steps, returning how many were taken
    pub fn advance(&mut self, steps: u64) -> u64 {
        let taken = steps.min(self.remaining_steps());
        self.steps_taken += taken;
        taken
    }
}

/// Smallest `f64` strictly greater than a positive finite `value`
#[inline]
pub(crate) fn just_past(value: f64) -> f64 {
    f64::from_bits(value.to_bits() + 1)
}

/// Number of fixed steps of `step_x` needed to move from `start_x` to or
/// past `anchor_x` while ending strictly beyond `exit_bound` (a magnitude)
///
/// Starts from the ceiling of distance over step and bumps the count if
/// floating point rounding leaves the final position short. Returns `None`
/// when the step is zero, not finite, points away from the anchor, or the
/// walk would exceed [`MAX_FLIGHT_STEPS`].
pub fn steps_to_exit(start_x: f64, anchor_x: f64, step_x: f64, exit_bound: f64) -> Option<u64> {
    if !step_x.is_finite() || step_x == 0.0 {
        return None;
    }
    if !start_x.is_finite() || !anchor_x.is_finite() || !exit_bound.is_finite() {
        return None;
    }
    if (anchor_x - start_x) * step_x < 0.0 {
        return None;
    }

    let forward = step_x > 0.0;
    let goal = if forward { anchor_x.max(exit_bound) } else { anchor_x.min(-exit_bound) };
    let estimate = ((goal - start_x).abs() / step_x.abs()).ceil().max(1.0);
    if estimate > MAX_FLIGHT_STEPS as f64 {
        return None;
    }

    let reached = |n: u64| {
        let x = start_x + step_x * n as f64;
        if forward {
            x >= anchor_x && x > exit_bound
        } else {
            x <= anchor_x && x < -exit_bound
        }
    };

    let mut steps = estimate as u64;
    while !reached(steps) {
        steps += 1;
        if steps > MAX_FLIGHT_STEPS {
            return None;
        }
    }

    Some(steps)
}
