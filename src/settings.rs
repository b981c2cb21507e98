//! Runtime settings
//!
//! Read from the JSON file named by `PIXEL_CONTRA_SETTINGS`. Gameplay
//! constants are fixed; only pacing and the demo autopilot are tunable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::FPS;
use crate::error::SettingsError;

/// Autopilot (demo input) behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotSettings {
    /// RNG seed for reproducible runs
    pub seed: u64,
    /// Request Quit after this many input polls
    pub quit_after_ticks: u64,
    /// Per-tick chance of changing walking direction
    pub turn_chance: f64,
    /// Per-tick chance of pressing jump
    pub jump_chance: f64,
    /// Per-tick chance of clicking somewhere
    pub shoot_chance: f64,
}

impl Default for AutopilotSettings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            quit_after_ticks: 60 * 60,
            turn_chance: 0.03,
            jump_chance: 0.02,
            shoot_chance: 0.1,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ticks per second
    pub tick_rate: u32,
    /// Pace ticks with the wall clock (false = run as fast as possible)
    pub realtime: bool,
    pub autopilot: AutopilotSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: FPS,
            realtime: true,
            autopilot: AutopilotSettings::default(),
        }
    }
}

impl Settings {
    /// Environment variable holding the settings file path
    pub const ENV_VAR: &'static str = "PIXEL_CONTRA_SETTINGS";

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by `PIXEL_CONTRA_SETTINGS`, or defaults
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_file(Path::new(&path)) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", Path::new(&path).display(), e);
                Self::default()
            }
        }
    }
}
