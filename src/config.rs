use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::error::SwipeError;
use crate::models::{StackBehavior, SwipeConfig};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub swipe: SwipeSettings,
    #[serde(default)]
    pub stack: StackSettings,
    #[serde(default)]
    pub frame: FrameSettings,
    #[serde(default)]
    pub deck: DeckSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwipeSettings {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_exit_distance")]
    pub exit_distance: f64,
    #[serde(default = "default_velocity")]
    pub velocity_x: f64,
    #[serde(default = "default_velocity")]
    pub velocity_y: f64,
    #[serde(default = "default_steps_per_second")]
    pub steps_per_second: f64,
}

impl Default for SwipeSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            exit_distance: default_exit_distance(),
            velocity_x: default_velocity(),
            velocity_y: default_velocity(),
            steps_per_second: default_steps_per_second(),
        }
    }
}

impl SwipeSettings {
    /// Validated engine configuration
    pub fn to_config(&self) -> Result<SwipeConfig, SwipeError> {
        SwipeConfig {
            threshold: self.threshold,
            exit_distance: self.exit_distance,
            velocity_x: self.velocity_x,
            velocity_y: self.velocity_y,
            steps_per_second: self.steps_per_second,
        }
        .checked()
    }
}

fn default_threshold() -> f64 { 250.0 }
fn default_exit_distance() -> f64 { 500.0 }
fn default_velocity() -> f64 { 0.025 }
fn default_steps_per_second() -> f64 { 60_000.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct StackSettings {
    #[serde(default = "default_true")]
    pub spring_back: bool,
    #[serde(default = "default_true")]
    pub advance_on_swipe: bool,
}

impl Default for StackSettings {
    fn default() -> Self {
        Self {
            spring_back: true,
            advance_on_swipe: true,
        }
    }
}

impl StackSettings {
    pub fn behavior(&self) -> StackBehavior {
        StackBehavior {
            spring_back: self.spring_back,
            advance_on_swipe: self.advance_on_swipe,
        }
    }
}

fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct FrameSettings {
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(default = "default_max_frames")]
    pub max_frames: u64,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_frames: default_max_frames(),
        }
    }
}

fn default_fps() -> f64 { 60.0 }
fn default_max_frames() -> u64 { 100_000 }

/// Where the deck and the input script come from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckSettings {
    /// Deck file (`.toml`/`.json`); built-in puppies when unset
    pub path: Option<String>,
    /// Input script (`.toml`/`.json`); built-in demo gestures when unset
    pub script: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PUPPY__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PUPPY__SWIPE__THRESHOLD -> swipe.threshold
            .add_source(
                Environment::with_prefix("PUPPY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_shortcut_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PUPPY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_shortcut_vars(settings)?;

        settings.try_deserialize()
    }
}

/// Apply the short `PUPPY_DECK` and `PUPPY_SCRIPT` variables on top of the
/// layered configuration
fn apply_shortcut_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    apply_shortcuts(
        settings,
        env::var("PUPPY_DECK").ok(),
        env::var("PUPPY_SCRIPT").ok(),
    )
}

fn apply_shortcuts(
    settings: Config,
    deck: Option<String>,
    script: Option<String>,
) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Some(deck) = deck {
        builder = builder.set_override("deck.path", deck)?;
    }
    if let Some(script) = script {
        builder = builder.set_override("deck.script", script)?;
    }

    builder.build()
}
