//! Collision queries and per-tick resolution
//!
//! Resolution order matters: platforms settle the player's position before
//! the enemy-contact check reads it.

use super::rect::{HasBoundingBox, Rect};
use super::state::{EntityHandle, EntityId, EntityKind, SessionEnd, SessionState};

/// What collision resolution changed this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Platform the player was resolved against
    pub platform: Option<EntityId>,
    pub bullets_spent: Vec<EntityId>,
    pub enemies_destroyed: Vec<EntityId>,
    /// Player touched an enemy
    pub player_caught: bool,
}

/// First item (in slice order) overlapping `rect`
pub fn first_overlap<'a, T: HasBoundingBox>(rect: &Rect, items: &'a [T]) -> Option<&'a T> {
    items.iter().find(|item| rect.intersects(&item.bounds()))
}

/// Whether any item overlaps `rect`
pub fn any_overlap<T: HasBoundingBox>(rect: &Rect, items: &[T]) -> bool {
    first_overlap(rect, items).is_some()
}

/// Resolve every collision pair for this tick, in order:
/// player/platforms, bullets/enemies, player/enemies.
pub fn resolve_collisions(state: &mut SessionState) -> CollisionReport {
    let mut report = CollisionReport {
        platform: state.player.check_platform_collisions(&state.platforms),
        ..Default::default()
    };

    // Bullets vs enemies: every overlapping pair destroys both sides
    for enemy in &state.enemies {
        let mut hit = false;
        for bullet in &state.bullets {
            if enemy.overlaps(bullet) {
                hit = true;
                if !report.bullets_spent.contains(&bullet.id) {
                    report.bullets_spent.push(bullet.id);
                }
            }
        }
        if hit {
            report.enemies_destroyed.push(enemy.id);
        }
    }
    for &id in &report.bullets_spent {
        state.remove(EntityHandle::new(id, EntityKind::Bullet));
    }
    for &id in &report.enemies_destroyed {
        state.remove(EntityHandle::new(id, EntityKind::Enemy));
        state.stats.enemies_destroyed += 1;
        log::debug!("Enemy {:?} destroyed", id);
    }

    // Player vs enemies: contact ends the session, nothing is removed
    if any_overlap(&state.player.bounds(), &state.enemies) {
        report.player_caught = true;
        state.end_session(SessionEnd::Caught);
        log::info!("Player caught at {:?}", state.player.pos);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Bullet, Platform};
    use glam::Vec2;

    /// Session with one platform and an enemy on it, player parked far away
    fn arena() -> SessionState {
        let mut state = SessionState::empty();
        let home = state.add_platform(100.0, 400.0, 200.0, 20.0);
        state.add_enemy(home);
        state.player.pos = Vec2::new(700.0, 100.0);
        state.player.rect.set_midbottom(state.player.pos);
        state
    }

    fn bullet_at(state: &mut SessionState, center: Vec2) -> EntityId {
        let id = state.next_entity_id();
        state.add_bullet(Bullet::new(id, center, Vec2::X, 0))
    }

    #[test]
    fn test_first_overlap_order() {
        let platforms = [
            Platform::new(EntityId(1), 0.0, 0.0, 10.0, 10.0),
            Platform::new(EntityId(2), 5.0, 5.0, 10.0, 10.0),
        ];
        let query = Rect::new(6.0, 6.0, 2.0, 2.0);
        assert_eq!(first_overlap(&query, &platforms).map(|p| p.id), Some(EntityId(1)));
        assert!(any_overlap(&query, &platforms));
        assert!(!any_overlap(&Rect::new(50.0, 50.0, 1.0, 1.0), &platforms));
        assert!(first_overlap::<Platform>(&query, &[]).is_none());
    }

    #[test]
    fn test_bullet_destroys_enemy() {
        let mut state = arena();
        let enemy_id = state.enemies[0].id;
        let center = state.enemies[0].rect.center();
        let bullet_id = bullet_at(&mut state, center);
        let miss_id = bullet_at(&mut state, Vec2::new(600.0, 50.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.bullets_spent, vec![bullet_id]);
        assert_eq!(report.enemies_destroyed, vec![enemy_id]);
        assert!(state.enemies.is_empty());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].id, miss_id);
        assert!(!state.draw_order.iter().any(|h| h.id == enemy_id || h.id == bullet_id));
        assert_eq!(state.stats.enemies_destroyed, 1);
        assert!(state.playing);
    }

    #[test]
    fn test_one_bullet_many_enemies() {
        let mut state = arena();
        let home = state.platforms[0].id;
        state.add_enemy(home);
        assert_eq!(state.enemies.len(), 2);
        let center = state.enemies[0].rect.center();
        bullet_at(&mut state, center);

        let report = resolve_collisions(&mut state);
        assert_eq!(report.enemies_destroyed.len(), 2);
        assert_eq!(report.bullets_spent.len(), 1);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_player_enemy_contact_ends_session() {
        let mut state = arena();
        let enemy = state.enemies[0].rect;
        state.player.pos = enemy.midbottom();
        state.player.rect.set_midbottom(state.player.pos);
        // Keep the platform check from moving the player off the enemy
        state.player.vel = Vec2::ZERO;

        let report = resolve_collisions(&mut state);
        assert!(report.player_caught);
        assert!(!state.playing);
        assert_eq!(state.end, Some(SessionEnd::Caught));
        // Neither side is removed
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.draw_order.len(), 3);
    }

    #[test]
    fn test_platform_resolution_precedes_enemy_check() {
        let mut state = SessionState::empty();
        let home = state.add_platform(100.0, 400.0, 200.0, 20.0);
        state.add_enemy(home);
        // Enemy moved away from center; player falls onto the same platform
        state.enemies[0].rect.x = 110.0;
        state.player.pos = Vec2::new(250.0, 395.0);
        state.player.vel = Vec2::new(0.0, 8.0);
        state.player.rect.set_midbottom(state.player.pos);

        let report = resolve_collisions(&mut state);
        assert_eq!(report.platform, Some(home));
        assert_eq!(state.player.rect.bottom(), 400.0 - LANDING_OFFSET);
        assert!(!report.player_caught);
        assert!(state.playing);
    }

    #[test]
    fn test_no_collisions_is_quiet() {
        let mut state = arena();
        let report = resolve_collisions(&mut state);
        assert_eq!(report, CollisionReport::default());
        assert!(state.playing);
    }
}
