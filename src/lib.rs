//! Puppy Swipe - swipeable profile card stack
//!
//! This library provides the interaction engine behind a stack of puppy
//! profile cards: drag deltas move the top card, crossing the threshold
//! commits it to a fixed-step fly-off, and the resolved swipe is reported
//! once to a handler.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{CardPhase, CardStack, NoopHandler, SwipeEngine, SwipeHandler, SwipeLog};
pub use error::{FrameError, SwipeError};
pub use models::{CardState, CardView, InputEvent, Profile, StackBehavior, SwipeConfig, SwipeDirection, SwipeOutcome};
