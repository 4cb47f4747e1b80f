use crate::models::domain::{ImageRef, Profile};
use crate::models::input::InputEvent;

/// Deck used when no deck file is configured
pub fn default_puppies() -> Vec<Profile> {
    vec![
        Profile {
            name: "Johnny Silverhand".to_string(),
            age: 3,
            category: "Husky".to_string(),
            bio: "Wake the **** up, Samurai! We have a city to burn".to_string(),
            interests: vec!["Video Games".to_string(), "Sunglasses".to_string()],
            image: ImageRef::new("husky"),
            verified: true,
        },
        Profile {
            name: "Jackie Welles".to_string(),
            age: 4,
            category: "Bulldog".to_string(),
            bio: "I'm a hustler, that's all you need to know about me'".to_string(),
            interests: vec!["Guns".to_string(), "Money".to_string()],
            image: ImageRef::new("bulldog"),
            verified: false,
        },
        Profile {
            name: "Panam Palmer".to_string(),
            age: 2,
            category: "German Shepherd".to_string(),
            bio: "I have a reputation".to_string(),
            interests: vec!["Nomad Life".to_string(), "Racing".to_string()],
            image: ImageRef::new("german_shepherd"),
            verified: true,
        },
    ]
}

/// Input replayed when no script is configured
///
/// Drags the first card right in small steps until it commits, drags the
/// second card halfway and lets go, then resolves it and the third card
/// with the buttons.
pub fn demo_gestures() -> Vec<InputEvent> {
    let mut events: Vec<InputEvent> = std::iter::repeat(InputEvent::Drag { delta: 20.0 })
        .take(13)
        .collect();
    events.extend([
        InputEvent::Drag { delta: -40.0 },
        InputEvent::Drag { delta: -80.0 },
        InputEvent::Release,
        InputEvent::Dislike,
        InputEvent::Like,
    ]);
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_deck_contents() {
        let deck = default_puppies();
        assert_eq!(deck.len(), 3);
        assert_eq!(deck[0].title(), "Johnny Silverhand, 3");
        assert_eq!(deck[1].likes_line(), "I love Guns, Money");
        assert!(!deck[1].verified);
        assert_eq!(deck[2].image.as_str(), "german_shepherd");
    }

    #[test]
    fn test_demo_gestures_commit_first_card() {
        let total: f64 = demo_gestures()
            .iter()
            .take(13)
            .map(|event| match event {
                InputEvent::Drag { delta } => *delta,
                _ => 0.0,
            })
            .sum();
        assert!(total > 250.0);
    }
}
