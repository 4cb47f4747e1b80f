use serde::{Deserialize, Serialize};

/// Input delivered to the top card by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputEvent {
    /// Signed horizontal distance since the previous drag event
    Drag { delta: f64 },
    /// Finger lifted
    Release,
    /// Like button
    Like,
    /// Dislike button
    Dislike,
}

/// Input script file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputScript {
    #[serde(default)]
    pub events: Vec<InputEvent>,
}
