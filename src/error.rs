//! Error taxonomy
//!
//! `Display` is the log-facing English text; `user_message` is the localised
//! line shown in the notification area.

use crate::fl;

/// Settings file could not be written. Reading never fails outward.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("settings i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed user input, reported before any side effect happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("a coordinate field is empty")]
    MissingCoordinate,
    #[error("a coordinate field is not an integer")]
    InvalidNumber,
    #[error("width and height must not be negative")]
    NegativeExtent,
    #[error("no area has been selected")]
    NoSelection,
    #[error("the selected area is empty")]
    EmptySelection,
    #[error("the folder name is empty")]
    EmptyFolderName,
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingCoordinate => fl!("enter-all-values"),
            ValidationError::InvalidNumber => fl!("enter-valid-numbers"),
            ValidationError::NegativeExtent => fl!("negative-extent"),
            ValidationError::NoSelection => fl!("select-area-first"),
            ValidationError::EmptySelection => fl!("empty-selection"),
            ValidationError::EmptyFolderName => fl!("empty-folder-name"),
        }
    }
}

/// Screen grab or file write failure
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("screen grab failed: {0:#}")]
    Grab(anyhow::Error),
    #[error("writing screenshot failed: {0}")]
    Write(#[from] std::io::Error),
    #[error("encoding screenshot failed: {0}")]
    Encode(#[from] png::EncodingError),
}

impl CaptureError {
    pub fn user_message(&self) -> String {
        match self {
            CaptureError::Validation(err) => err.user_message(),
            CaptureError::Grab(err) => fl!("capture-failed", reason = format!("{err:#}")),
            CaptureError::Write(err) => fl!("capture-failed", reason = err.to_string()),
            CaptureError::Encode(err) => fl!("capture-failed", reason = err.to_string()),
        }
    }
}
