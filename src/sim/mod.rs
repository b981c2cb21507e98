//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (velocities are per tick)
//! - Stable iteration order (insertion order per collection)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, any_overlap, first_overlap, resolve_collisions};
pub use rect::{HasBoundingBox, Rect};
pub use state::{
    Bullet, Enemy, EntityHandle, EntityId, EntityKind, EntityView, HeldKeys, Lifecycle, Platform,
    Player, SessionEnd, SessionState, SessionStats, screen_rect,
};
pub use tick::{Action, TickInput, tick};
