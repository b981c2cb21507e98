//! Demo-mode input: a seeded random player
//!
//! Same seed, same inputs. Drives the headless binary.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{InputEvent, InputSource, Key, KeySet, PointerButton};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::PlatformError;
use crate::settings::AutopilotSettings;

/// Which way the autopilot is walking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    Idle,
    Left,
    Right,
}

/// Random input generator
#[derive(Debug)]
pub struct Autopilot {
    rng: Pcg32,
    settings: AutopilotSettings,
    walk: Walk,
    ticks: u64,
}

impl Autopilot {
    pub fn new(settings: &AutopilotSettings) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            settings: settings.clone(),
            walk: Walk::Idle,
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn roll(&mut self, chance: f64) -> bool {
        self.rng.random_bool(chance.clamp(0.0, 1.0))
    }
}

impl InputSource for Autopilot {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, PlatformError> {
        self.ticks += 1;
        if self.ticks > self.settings.quit_after_ticks {
            return Ok(vec![InputEvent::Quit]);
        }

        if self.roll(self.settings.turn_chance) {
            self.walk = match self.rng.random_range(0..3) {
                0 => Walk::Idle,
                1 => Walk::Left,
                _ => Walk::Right,
            };
        }

        let mut events = Vec::new();
        if self.roll(self.settings.jump_chance) {
            events.push(InputEvent::KeyDown(Key::Space));
        }
        if self.roll(self.settings.shoot_chance) {
            let pos = Vec2::new(
                self.rng.random_range(0.0..SCREEN_WIDTH),
                self.rng.random_range(0.0..SCREEN_HEIGHT),
            );
            events.push(InputEvent::PointerButtonDown {
                button: PointerButton::Primary,
                pos,
            });
        }
        Ok(events)
    }

    fn pressed_keys(&mut self) -> Result<KeySet, PlatformError> {
        let mut keys = KeySet::new();
        match self.walk {
            Walk::Idle => {}
            Walk::Left => {
                keys.insert(Key::A);
            }
            Walk::Right => {
                keys.insert(Key::D);
            }
        }
        Ok(keys)
    }
}
