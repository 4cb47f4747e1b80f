use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::Validate;

use crate::models::{InputEvent, InputScript, Profile};

/// Errors that can occur while loading deck and script files
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid profile #{index}: {source}")]
    InvalidProfile {
        index: usize,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// On-disk encodings understood by the loaders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, LoaderError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(FileFormat::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(FileFormat::Json),
            _ => Err(LoaderError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeckFile {
    #[serde(default)]
    profiles: Vec<Profile>,
}

/// Load a deck of profiles from a `.toml` or `.json` file
pub fn load_deck(path: impl AsRef<Path>) -> Result<Vec<Profile>, LoaderError> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    let contents = read(path)?;
    let profiles = parse_deck(&contents, format)?;

    tracing::info!("Loaded {} profiles from {}", profiles.len(), path.display());
    Ok(profiles)
}

/// Parse and validate a deck
pub fn parse_deck(contents: &str, format: FileFormat) -> Result<Vec<Profile>, LoaderError> {
    let profiles = match format {
        FileFormat::Toml => toml::from_str::<DeckFile>(contents)?.profiles,
        FileFormat::Json => parse_json_list::<Profile, DeckFile>(contents, |deck| deck.profiles)?,
    };

    for (index, profile) in profiles.iter().enumerate() {
        profile
            .validate()
            .map_err(|source| LoaderError::InvalidProfile { index, source })?;
    }

    Ok(profiles)
}

/// Load a scripted input stream from a `.toml` or `.json` file
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<InputEvent>, LoaderError> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    let contents = read(path)?;
    let events = parse_script(&contents, format)?;

    tracing::info!("Loaded {} input events from {}", events.len(), path.display());
    Ok(events)
}

pub fn parse_script(contents: &str, format: FileFormat) -> Result<Vec<InputEvent>, LoaderError> {
    match format {
        FileFormat::Toml => Ok(toml::from_str::<InputScript>(contents)?.events),
        FileFormat::Json => parse_json_list::<InputEvent, InputScript>(contents, |s| s.events),
    }
}

/// JSON documents are either a bare list or an object wrapping the list
fn parse_json_list<T, W>(contents: &str, unwrap: impl FnOnce(W) -> Vec<T>) -> Result<Vec<T>, LoaderError>
where
    T: DeserializeOwned,
    W: DeserializeOwned,
{
    if contents.trim_start().starts_with('[') {
        Ok(serde_json::from_str::<Vec<T>>(contents)?)
    } else {
        Ok(unwrap(serde_json::from_str::<W>(contents)?))
    }
}

fn read(path: &Path) -> Result<String, LoaderError> {
    std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
