// Core interaction exports
pub mod engine;
pub mod flight;
pub mod handler;
pub mod stack;

pub use engine::{CardPhase, SwipeEngine};
pub use flight::{steps_to_exit, Flight};
pub use handler::{dispatch, NoopHandler, SwipeHandler, SwipeLog};
pub use stack::CardStack;
