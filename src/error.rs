//! Error types
//!
//! The simulation itself never fails; only collaborators (render, input,
//! clock) and settings loading can.

use thiserror::Error;

/// A collaborator became unavailable. Fatal to the loop driver.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("render backend failed: {0}")]
    Render(String),
    #[error("input backend failed: {0}")]
    Input(String),
    #[error("clock failed: {0}")]
    Clock(String),
}

/// Settings file could not be read or parsed
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
