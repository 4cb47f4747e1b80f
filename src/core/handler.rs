use chrono::Utc;

use crate::models::{Profile, SwipeOutcome, SwipeRecord};

/// Receiver of resolved swipes
///
/// Called exactly once per card that flies off. Both methods default to
/// no-ops; the embedding application decides what a like or a pass means.
pub trait SwipeHandler {
    fn on_swipe_left(&mut self, _profile: &Profile) {}

    fn on_swipe_right(&mut self, _profile: &Profile) {}
}

/// Handler that ignores every outcome
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl SwipeHandler for NoopHandler {}

/// Handler that keeps a timestamped record of every outcome
#[derive(Debug, Clone, Default)]
pub struct SwipeLog {
    records: Vec<SwipeRecord>,
}

impl SwipeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SwipeRecord] {
        &self.records
    }

    pub fn outcomes(&self) -> Vec<SwipeOutcome> {
        self.records.iter().map(|record| record.outcome).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn push(&mut self, profile: &Profile, outcome: SwipeOutcome) {
        self.records.push(SwipeRecord {
            profile: profile.name.clone(),
            outcome,
            at: Utc::now(),
        });
    }
}

impl SwipeHandler for SwipeLog {
    fn on_swipe_left(&mut self, profile: &Profile) {
        self.push(profile, SwipeOutcome::SwipedLeft);
    }

    fn on_swipe_right(&mut self, profile: &Profile) {
        self.push(profile, SwipeOutcome::SwipedRight);
    }
}

impl<H: SwipeHandler + ?Sized> SwipeHandler for &mut H {
    fn on_swipe_left(&mut self, profile: &Profile) {
        (**self).on_swipe_left(profile);
    }

    fn on_swipe_right(&mut self, profile: &Profile) {
        (**self).on_swipe_right(profile);
    }
}

/// Route an outcome to the matching handler method
pub fn dispatch<H: SwipeHandler + ?Sized>(handler: &mut H, outcome: SwipeOutcome, profile: &Profile) {
    match outcome {
        SwipeOutcome::SwipedLeft => handler.on_swipe_left(profile),
        SwipeOutcome::SwipedRight => handler.on_swipe_right(profile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_puppies;

    #[test]
    fn test_swipe_log_records_in_order() {
        let deck = default_puppies();
        let mut log = SwipeLog::new();

        dispatch(&mut log, SwipeOutcome::SwipedRight, &deck[0]);
        dispatch(&mut log, SwipeOutcome::SwipedLeft, &deck[1]);

        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].profile, "Johnny Silverhand");
        assert_eq!(
            log.outcomes(),
            vec![SwipeOutcome::SwipedRight, SwipeOutcome::SwipedLeft]
        );
    }

    #[test]
    fn test_handler_through_mutable_reference() {
        let deck = default_puppies();
        let mut log = SwipeLog::new();
        {
            let mut borrowed = &mut log;
            dispatch(&mut borrowed, SwipeOutcome::SwipedLeft, &deck[2]);
        }
        assert_eq!(log.outcomes(), vec![SwipeOutcome::SwipedLeft]);
    }
}
