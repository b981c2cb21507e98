//! Platform abstraction layer
//!
//! Contracts the loop driver needs from the outside world:
//! - Input events and held keys
//! - Time and frame pacing
//!
//! Headless implementations live alongside for the native binary and tests.

pub mod autopilot;
pub mod clock;
pub mod input;

pub use autopilot::Autopilot;
pub use clock::{FrameClock, SimulatedClock};
pub use input::{InputFrame, ScriptedInput};

use std::collections::HashSet;

use glam::Vec2;

use crate::error::PlatformError;
use crate::sim::HeldKeys;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move left
    A,
    /// Move right
    D,
    /// Jump
    Space,
    Escape,
}

/// Pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// A discrete input occurrence, consumed once
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window close / process quit request
    Quit,
    KeyDown(Key),
    PointerButtonDown { button: PointerButton, pos: Vec2 },
}

/// Keys currently held down
pub type KeySet = HashSet<Key>;

/// Map the held key set onto movement directions
pub fn held_keys(keys: &KeySet) -> HeldKeys {
    HeldKeys {
        left: keys.contains(&Key::A),
        right: keys.contains(&Key::D),
    }
}

/// Source of input events and key state
pub trait InputSource {
    /// Drain events since the last poll, oldest first
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, PlatformError>;
    /// Keys held right now
    fn pressed_keys(&mut self) -> Result<KeySet, PlatformError>;
}

/// Time source and frame pacer
pub trait Clock {
    /// Milliseconds since the clock started
    fn now_ms(&self) -> u64;
    /// Block until the next tick boundary
    fn wait_for_next_tick(&mut self) -> Result<(), PlatformError>;
}
