//! Pixel Contra - A fixed-tick 2D platform shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, entity lifecycle)
//! - `game`: Fixed-rate loop driver and app state transitions
//! - `renderer`: Render contract and a recording backend
//! - `platform`: Input/clock contracts and headless implementations
//! - `settings`: Runtime configuration

pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{PlatformError, SettingsError};
pub use game::{AppState, Game, GameSummary};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Nominal simulation rate (ticks per second)
    pub const FPS: u32 = 60;

    /// Player box size
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Horizontal acceleration while A/D is held (pixels/tick²)
    pub const PLAYER_ACC: f32 = 0.5;
    /// Drag coefficient applied to horizontal velocity (negative = decay)
    pub const PLAYER_FRICTION: f32 = -0.12;
    /// Downward acceleration (pixels/tick²)
    pub const PLAYER_GRAV: f32 = 0.8;
    /// Vertical velocity set on jump (negative = up)
    pub const PLAYER_JUMP: f32 = -15.0;
    /// Gap left between the player's feet and a platform after landing
    pub const LANDING_OFFSET: f32 = 1.0;
    /// How far below the feet the jump check looks for ground
    pub const JUMP_REACH: f32 = 2.0;
    /// Minimum time between shots (ms)
    pub const SHOT_COOLDOWN_MS: u64 = 250;

    /// Bullet defaults
    pub const BULLET_SIZE: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 10.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_SPEED: f32 = 3.0;
}

/// Wrap an x coordinate into [0, SCREEN_WIDTH)
#[inline]
pub fn wrap_x(x: f32) -> f32 {
    let wrapped = x.rem_euclid(consts::SCREEN_WIDTH);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= consts::SCREEN_WIDTH {
        0.0
    } else {
        wrapped
    }
}

/// Unit vector from `from` toward `to`, defaulting to +x when the points coincide
#[inline]
pub fn aim_direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(Vec2::X)
}
