// Unit tests for Puppy Swipe

use puppy_swipe::core::{CardPhase, SwipeEngine};
use puppy_swipe::models::{SwipeConfig, SwipeDirection, SwipeOutcome};
use std::time::Duration;

fn run_to_completion(engine: &mut SwipeEngine) -> (u64, Vec<SwipeOutcome>) {
    let mut steps = 0;
    let mut outcomes = Vec::new();
    while engine.is_flying() {
        steps += 1;
        if let Some(outcome) = engine.step() {
            outcomes.push(outcome);
        }
    }
    (steps, outcomes)
}

#[test]
fn test_offset_tracks_running_sum_below_threshold() {
    let mut engine = SwipeEngine::default();
    let deltas = [40.0, 55.5, -120.25, -170.0, 249.0, 100.0, -0.125];

    let mut running: f64 = 0.0;
    for delta in deltas {
        running += delta;
        assert!(running.abs() < 250.0);
        assert_eq!(engine.drag(delta), None);
        assert!(matches!(engine.phase(), CardPhase::Dragging));
        assert_eq!(engine.card().offset_x, running);
    }
}

#[test]
fn test_reference_right_swipe() {
    // threshold 250, exit distance 500, velocity 0.025
    let mut engine = SwipeEngine::default();

    assert_eq!(engine.drag(100.0), None);
    assert_eq!(engine.drag(100.0), None);
    assert_eq!(engine.drag(60.0), Some(SwipeDirection::Right));

    let CardPhase::Flying(flight) = *engine.phase() else {
        panic!("expected the card to be flying");
    };
    assert_eq!(flight.anchor_x(), 760.0);
    assert_eq!(flight.total_steps(), 20_000);

    let (steps, outcomes) = run_to_completion(&mut engine);
    assert_eq!(steps, 20_000);
    assert_eq!(outcomes, vec![SwipeOutcome::SwipedRight]);
    assert!(engine.card().offset_x >= 760.0);

    // Settled cards do not move again
    let settled = engine.card();
    assert_eq!(engine.step(), None);
    assert_eq!(engine.drag(-1_000.0), None);
    assert_eq!(engine.tick(Duration::from_secs(5)), None);
    assert_eq!(engine.card(), settled);
}

#[test]
fn test_left_swipe_mirrors_right() {
    let mut engine = SwipeEngine::default();
    assert_eq!(engine.drag(-130.0), None);
    assert_eq!(engine.drag(-130.0), Some(SwipeDirection::Left));

    let (steps, outcomes) = run_to_completion(&mut engine);
    assert_eq!(steps, 20_000);
    assert_eq!(outcomes, vec![SwipeOutcome::SwipedLeft]);
    assert!(engine.card().offset_x <= -760.0);
}

#[test]
fn test_vertical_offset_strictly_decreases_in_flight() {
    let config = SwipeConfig {
        threshold: 50.0,
        exit_distance: 40.0,
        velocity_x: 0.3,
        velocity_y: 0.7,
        steps_per_second: 1_000.0,
    };
    let mut engine = SwipeEngine::new(config).unwrap();
    engine.drag(-51.0);

    let start_y = engine.card().offset_y;
    let mut previous = start_y;
    while engine.is_flying() {
        engine.step();
        let y = engine.card().offset_y;
        assert!(y < previous);
        previous = y;
    }
    assert!(previous < start_y);
}

#[test]
fn test_exit_lands_beyond_threshold_plus_exit_distance() {
    let config = SwipeConfig {
        threshold: 10.0,
        exit_distance: 7.3,
        velocity_x: 0.9,
        velocity_y: 0.1,
        steps_per_second: 1_000.0,
    };

    for delta in [10.01, 12.0, 33.3] {
        let mut engine = SwipeEngine::new(config).unwrap();
        engine.drag(delta);
        engine.advance(u64::MAX);
        assert!(engine.card().offset_x > config.threshold + config.exit_distance);
        assert!(engine.card().offset_y < 0.0);
    }
}

#[test]
fn test_buttons_match_completed_drags() {
    let mut liked = SwipeEngine::default();
    let mut dragged = SwipeEngine::default();

    assert!(liked.fling(SwipeDirection::Right));
    dragged.drag(251.0);

    assert_eq!(liked.advance(u64::MAX), Some(SwipeOutcome::SwipedRight));
    assert_eq!(dragged.advance(u64::MAX), Some(SwipeOutcome::SwipedRight));

    // Like ends strictly past threshold + exit distance, like a drag does
    assert!(liked.card().offset_x > 750.0);
    assert!(liked.card().offset_y < 0.0);
    assert!(dragged.card().offset_x > 750.0);

    let mut disliked = SwipeEngine::default();
    assert!(disliked.fling(SwipeDirection::Left));
    assert_eq!(disliked.advance(u64::MAX), Some(SwipeOutcome::SwipedLeft));
    assert!(disliked.card().offset_x < -750.0);
    assert!(disliked.card().offset_y < 0.0);
}

#[test]
fn test_engine_rejects_stalled_fly_off() {
    let config = SwipeConfig {
        velocity_x: 0.0,
        ..SwipeConfig::default()
    };
    assert!(SwipeEngine::new(config).is_err());
}

#[test]
fn test_tick_duration_is_frame_rate_independent() {
    let config = SwipeConfig {
        steps_per_second: 60_000.0,
        ..SwipeConfig::default()
    };

    // 20000 steps at 60000 steps/s: a third of a second
    for fps in [30u32, 60, 144] {
        let mut engine = SwipeEngine::new(config).unwrap();
        engine.drag(260.0);

        let frame = Duration::from_secs(1) / fps;
        let mut frames = 0u32;
        while engine.tick(frame).is_none() {
            frames += 1;
            assert!(frames < fps, "flight should finish within a second at {} fps", fps);
        }

        let elapsed = frame * (frames + 1);
        assert!(elapsed >= Duration::from_millis(333));
        assert!(elapsed < Duration::from_millis(333) + frame * 2);
    }
}
