use puppy_swipe::config::{LoggingSettings, Settings};
use puppy_swipe::core::{CardStack, SwipeLog};
use puppy_swipe::error::{FrameError, SwipeError};
use puppy_swipe::models::{default_puppies, demo_gestures};
use puppy_swipe::services::{load_deck, load_script, FrameLoop, LoaderError, TracingRenderer};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Swipe(#[from] SwipeError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error("Failed to serialize session summary: {0}")]
    Summary(#[from] serde_json::Error),
}

/// Initialize logging; `LOG_LEVEL`/`LOG_FORMAT` override the settings file and
/// `RUST_LOG` overrides both
fn init_tracing(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

async fn run(settings: Settings) -> Result<(), AppError> {
    let config = settings.swipe.to_config()?;
    let behavior = settings.stack.behavior();

    info!(
        "Swipe config: threshold {}, exit distance {}, velocity ({}, {}), {} steps/s",
        config.threshold,
        config.exit_distance,
        config.velocity_x,
        config.velocity_y,
        config.steps_per_second
    );

    let profiles = match &settings.deck.path {
        Some(path) => load_deck(path)?,
        None => {
            info!("No deck configured, using built-in puppies");
            default_puppies()
        }
    };

    let inputs = match &settings.deck.script {
        Some(path) => load_script(path)?,
        None => demo_gestures(),
    };

    let mut stack = CardStack::new(profiles, config, behavior, SwipeLog::new())?;
    let frame_loop = FrameLoop::new(settings.frame.fps, settings.frame.max_frames)?;

    info!(
        "Replaying {} input events at {} fps over {} cards",
        inputs.len(),
        settings.frame.fps,
        stack.remaining()
    );

    let stats = frame_loop.run(&mut stack, inputs, &mut TracingRenderer::new()).await;

    info!(
        "Session finished after {} frames: {} inputs, {} swipes, {} cards left",
        stats.frames,
        stats.inputs_applied,
        stats.outcomes,
        stack.remaining()
    );

    let log = stack.into_handler();
    info!("Swipes: {}", serde_json::to_string_pretty(log.records())?);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load()?;
    init_tracing(&settings.logging);

    info!("Starting puppy swipe demo...");

    run(settings).await.inspect_err(|e| error!("{}", e))
}
