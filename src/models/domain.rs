use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::error::SwipeError;

/// Upper bound on fly-off steps accepted at configuration time
pub const MAX_FLIGHT_STEPS: u64 = 100_000_000;

/// Opaque image handle resolved by the host (asset key, resource name, path)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Puppy profile shown on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(length(min = 1))]
    pub name: String,
    pub age: u8,
    pub category: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "imageRef")]
    pub image: ImageRef,
    #[serde(default)]
    pub verified: bool,
}

impl Profile {
    /// Card headline, e.g. "Jackie Welles, 4"
    pub fn title(&self) -> String {
        format!("{}, {}", self.name, self.age)
    }

    /// Interest line, e.g. "I love Guns, Money"
    pub fn likes_line(&self) -> String {
        format!("I love {}", self.interests.join(", "))
    }
}

/// Positional state of the interactive card
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CardState {
    #[serde(rename = "offsetX")]
    pub offset_x: f64,
    #[serde(rename = "offsetY")]
    pub offset_y: f64,
}

impl CardState {
    pub fn new(offset_x: f64, offset_y: f64) -> Self {
        Self { offset_x, offset_y }
    }

    /// Offset rounded to whole pixels for layout
    pub fn pixel_offset(&self) -> (i32, i32) {
        (self.offset_x.round() as i32, self.offset_y.round() as i32)
    }

    pub fn is_origin(&self) -> bool {
        self.offset_x == 0.0 && self.offset_y == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Sign of horizontal motion in this direction
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }

    pub fn outcome(self) -> SwipeOutcome {
        match self {
            SwipeDirection::Left => SwipeOutcome::SwipedLeft,
            SwipeDirection::Right => SwipeOutcome::SwipedRight,
        }
    }
}

/// Terminal event reported once per resolved card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeOutcome {
    SwipedLeft,
    SwipedRight,
}

impl SwipeOutcome {
    pub fn direction(self) -> SwipeDirection {
        match self {
            SwipeOutcome::SwipedLeft => SwipeDirection::Left,
            SwipeOutcome::SwipedRight => SwipeDirection::Right,
        }
    }
}

/// Resolved swipe, as kept by the recording handler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeRecord {
    pub profile: String,
    pub outcome: SwipeOutcome,
    pub at: chrono::DateTime<chrono::Utc>,
}

/// Motion parameters of the interaction engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct SwipeConfig {
    #[validate(range(exclusive_min = 0.0))]
    pub threshold: f64,
    #[serde(rename = "exitDistance")]
    #[validate(range(exclusive_min = 0.0))]
    pub exit_distance: f64,
    #[serde(rename = "velocityX")]
    #[validate(range(exclusive_min = 0.0))]
    pub velocity_x: f64,
    #[serde(rename = "velocityY")]
    #[validate(range(exclusive_min = 0.0))]
    pub velocity_y: f64,
    #[serde(rename = "stepsPerSecond")]
    #[validate(range(exclusive_min = 0.0))]
    pub steps_per_second: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: 250.0,
            exit_distance: 500.0,
            velocity_x: 0.025,
            velocity_y: 0.025,
            steps_per_second: 60_000.0,
        }
    }
}

impl SwipeConfig {
    /// Reject configurations that would produce degenerate or endless animations
    pub fn checked(self) -> Result<Self, SwipeError> {
        for (field, value) in [
            ("threshold", self.threshold),
            ("exit_distance", self.exit_distance),
            ("velocity_x", self.velocity_x),
            ("velocity_y", self.velocity_y),
            ("steps_per_second", self.steps_per_second),
        ] {
            if !value.is_finite() {
                return Err(SwipeError::NonFinite { field, value });
            }
        }

        self.validate()?;

        let steps = (self.exit_distance / self.velocity_x).ceil();
        if steps > MAX_FLIGHT_STEPS as f64 {
            return Err(SwipeError::FlightTooLong { steps, max: MAX_FLIGHT_STEPS });
        }

        Ok(self)
    }
}

/// What the stack does around a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackBehavior {
    /// Return an uncommitted card to the origin on release
    pub spring_back: bool,
    /// Promote the next profile once the top card has flown off
    pub advance_on_swipe: bool,
}

impl Default for StackBehavior {
    fn default() -> Self {
        Self {
            spring_back: true,
            advance_on_swipe: true,
        }
    }
}

impl StackBehavior {
    /// Card stays where it was dropped and the stack never advances
    pub fn inert() -> Self {
        Self {
            spring_back: false,
            advance_on_swipe: false,
        }
    }
}
