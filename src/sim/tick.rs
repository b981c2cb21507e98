//! Fixed timestep simulation tick
//!
//! Advances a session by exactly one step. Velocities are in pixels per
//! tick, so there is no dt.

use glam::Vec2;

use super::collision::{CollisionReport, resolve_collisions};
use super::state::{EntityHandle, EntityKind, HeldKeys, Lifecycle, SessionState};

/// Edge-triggered player actions, one per input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Jump,
    /// Fire toward a pointer position
    Shoot { at: Vec2 },
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement keys held this tick
    pub held: HeldKeys,
    /// Discrete presses/clicks since the previous tick, in arrival order
    pub actions: Vec<Action>,
}

/// Advance the session by one tick at clock time `now_ms`.
///
/// Order: queued actions, entity updates, expired-entity removal, then
/// collision resolution.
pub fn tick(state: &mut SessionState, input: &TickInput, now_ms: u64) -> CollisionReport {
    state.stats.ticks += 1;

    for action in &input.actions {
        match *action {
            Action::Jump => {
                state.player_jump();
            }
            Action::Shoot { at } => {
                state.player_shoot(at, now_ms);
            }
        }
    }

    state.player.update(input.held);

    let platforms = &state.platforms;
    for enemy in state.enemies.iter_mut() {
        match platforms.iter().find(|p| p.id == enemy.home) {
            Some(home) => enemy.update(home),
            None => log::warn!("Enemy {:?} has no home platform {:?}", enemy.id, enemy.home),
        }
    }

    let expired: Vec<_> = state
        .bullets
        .iter_mut()
        .filter_map(|bullet| (bullet.update() == Lifecycle::Expired).then_some(bullet.id))
        .collect();
    for id in expired {
        log::trace!("Bullet {:?} left the screen", id);
        state.remove(EntityHandle::new(id, EntityKind::Bullet));
    }

    resolve_collisions(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::SessionEnd;

    fn settle(state: &mut SessionState, ticks: usize) {
        let input = TickInput::default();
        for _ in 0..ticks {
            tick(state, &input, 0);
        }
    }

    #[test]
    fn test_tick_gravity_from_rest() {
        let mut state = SessionState::empty();
        let before = state.player.pos;
        tick(&mut state, &TickInput::default(), 0);

        assert!((state.player.vel.y - PLAYER_GRAV).abs() < 1e-6);
        let dy = state.player.pos.y - before.y;
        assert!((dy - (state.player.vel.y + 0.5 * PLAYER_GRAV)).abs() < 1e-4);
        assert_eq!(state.stats.ticks, 1);
    }

    #[test]
    fn test_player_lands_on_ground() {
        let mut state = SessionState::empty();
        state.add_platform(0.0, SCREEN_HEIGHT - 40.0, SCREEN_WIDTH, 40.0);
        settle(&mut state, 120);

        assert!(state.player.on_ground);
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.player.rect.bottom(), SCREEN_HEIGHT - 40.0 - LANDING_OFFSET);
    }

    #[test]
    fn test_jump_after_landing() {
        let mut state = SessionState::empty();
        state.add_platform(0.0, SCREEN_HEIGHT - 40.0, SCREEN_WIDTH, 40.0);
        settle(&mut state, 120);
        let rest_y = state.player.pos.y;

        let jump = TickInput {
            actions: vec![Action::Jump],
            ..Default::default()
        };
        tick(&mut state, &jump, 0);
        assert!(state.player.pos.y < rest_y);
        assert!(state.player.vel.y < 0.0);
        assert_eq!(state.stats.jumps, 1);

        // Airborne: a second press does nothing
        let vel = state.player.vel.y;
        state.player_jump();
        assert_eq!(state.player.vel.y, vel);
    }

    #[test]
    fn test_held_keys_move_player() {
        let mut state = SessionState::empty();
        let start_x = state.player.pos.x;
        let right = TickInput {
            held: HeldKeys { left: false, right: true },
            ..Default::default()
        };
        tick(&mut state, &right, 0);
        assert!(state.player.pos.x > start_x);

        let left = TickInput {
            held: HeldKeys { left: true, right: false },
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut state, &left, 0);
        }
        assert!(state.player.pos.x < start_x);
    }

    #[test]
    fn test_bullet_flies_and_is_removed() {
        let mut state = SessionState::empty();
        let shoot = TickInput {
            actions: vec![Action::Shoot { at: Vec2::new(SCREEN_WIDTH, 280.0) }],
            ..Default::default()
        };
        tick(&mut state, &shoot, 1000);
        assert_eq!(state.bullets.len(), 1);
        // Spawned at the player's box center, moved one step this tick
        assert!((state.bullets[0].pos().x - 410.0).abs() < 1e-3);

        settle(&mut state, 60);
        assert!(state.bullets.is_empty());
        assert_eq!(state.draw_order.len(), 1);
    }

    #[test]
    fn test_two_shots_within_cooldown() {
        let mut state = SessionState::empty();
        let shoot = TickInput {
            actions: vec![Action::Shoot { at: Vec2::new(SCREEN_WIDTH, 0.0) }],
            ..Default::default()
        };
        tick(&mut state, &shoot, 1000);
        tick(&mut state, &shoot, 1100);
        assert_eq!(state.stats.bullets_fired, 1);
        tick(&mut state, &shoot, 1400);
        assert_eq!(state.stats.bullets_fired, 2);
    }

    #[test]
    fn test_shot_kills_scene_enemy() {
        let mut state = SessionState::new();
        // Stand left of the middle platform, box center level with the enemy
        state.player.pos = Vec2::new(100.0, 450.0);
        state.player.rect.set_midbottom(state.player.pos);
        let shoot = TickInput {
            actions: vec![Action::Shoot { at: Vec2::new(SCREEN_WIDTH, 430.0) }],
            ..Default::default()
        };
        tick(&mut state, &shoot, 1000);
        settle(&mut state, 60);

        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.stats.enemies_destroyed, 1);
    }

    #[test]
    fn test_idle_player_gets_caught() {
        // The scene enemy patrols the platform the player falls onto
        let mut state = SessionState::new();
        let mut ticks = 0;
        while state.playing && ticks < 600 {
            tick(&mut state, &TickInput::default(), 0);
            ticks += 1;
        }
        assert!(!state.playing);
        assert_eq!(state.end, Some(SessionEnd::Caught));
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                held: HeldKeys { left: true, right: false },
                actions: vec![Action::Shoot { at: Vec2::new(0.0, 0.0) }],
            },
            TickInput {
                held: HeldKeys { left: false, right: true },
                actions: vec![Action::Jump],
            },
            TickInput::default(),
        ];

        let mut state1 = SessionState::new();
        let mut state2 = SessionState::new();
        for (i, input) in inputs.iter().cycle().take(90).enumerate() {
            let now = 1000 + i as u64 * 16;
            tick(&mut state1, input, now);
            tick(&mut state2, input, now);
        }

        let snap1 = serde_json::to_string(&state1).unwrap();
        let snap2 = serde_json::to_string(&state2).unwrap();
        assert_eq!(snap1, snap2);
    }
}
