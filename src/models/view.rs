use serde::Serialize;
use crate::models::domain::{CardState, Profile};

/// One card as handed to the renderer
#[derive(Debug, Clone, Serialize)]
pub struct CardView<'a> {
    /// Position in the deck
    pub index: usize,
    pub profile: &'a Profile,
    pub state: CardState,
    /// Only the top card receives gestures
    pub interactive: bool,
}

impl<'a> CardView<'a> {
    pub fn title(&self) -> String {
        self.profile.title()
    }

    pub fn subtitle(&self) -> &str {
        &self.profile.category
    }

    pub fn body(&self) -> &str {
        &self.profile.bio
    }

    /// Interest line, when the profile lists any
    pub fn likes_line(&self) -> Option<String> {
        if self.profile.interests.is_empty() {
            None
        } else {
            Some(self.profile.likes_line())
        }
    }

    pub fn show_verified_badge(&self) -> bool {
        self.profile.verified
    }

    pub fn pixel_offset(&self) -> (i32, i32) {
        self.state.pixel_offset()
    }
}
