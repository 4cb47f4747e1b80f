use thiserror::Error;

/// Errors raised while building the interaction engine
#[derive(Debug, Error)]
pub enum SwipeError {
    #[error("Invalid swipe configuration: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Swipe configuration value `{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Fly-off would take {steps} steps (max {max}); raise velocity_x or shorten exit_distance")]
    FlightTooLong { steps: f64, max: u64 },

    #[error("Exit anchor {anchor} cannot be reached from {start} with step {step}")]
    UnreachableExit { start: f64, anchor: f64, step: f64 },
}

/// Errors raised while setting up the frame loop
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Frame rate must be finite and positive, got {0}")]
    InvalidFrameRate(f64),

    #[error("Frame limit must be at least 1")]
    ZeroFrameLimit,
}
