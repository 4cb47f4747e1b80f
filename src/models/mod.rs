// Model exports
pub mod builtin;
pub mod domain;
pub mod input;
pub mod view;

pub use builtin::{default_puppies, demo_gestures};
pub use domain::{Profile, ImageRef, CardState, SwipeDirection, SwipeOutcome, SwipeRecord, SwipeConfig, StackBehavior};
pub use input::{InputEvent, InputScript};
pub use view::CardView;
