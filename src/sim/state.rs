//! Game state and core simulation types
//!
//! A `SessionState` is one playthrough: it owns every entity collection and
//! is dropped when the session ends.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{any_overlap, first_overlap};
use super::rect::{HasBoundingBox, Rect};
use crate::consts::*;
use crate::{aim_direction, wrap_x};

/// Stable per-session entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// The closed set of entity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Platform,
    Bullet,
    Enemy,
}

/// Reference into one of the session's category collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle {
    pub id: EntityId,
    pub kind: EntityKind,
}

impl EntityHandle {
    pub fn new(id: EntityId, kind: EntityKind) -> Self {
        Self { id, kind }
    }
}

/// Result of an entity's own per-tick update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    /// Remove from every collection
    Expired,
}

/// Continuous movement keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEnd {
    /// Player touched an enemy
    Caught,
    /// Quit requested
    Quit,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    /// Bottom-center of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub on_ground: bool,
    /// Clock time of the last shot (ms); 0 = never fired
    pub last_shot_ms: u64,
    pub rect: Rect,
}

impl Player {
    pub fn new(id: EntityId) -> Self {
        let pos = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            on_ground: false,
            last_shot_ms: 0,
            rect: Rect::from_midbottom(pos, PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }

    /// Integrate one tick of motion from held keys, gravity and friction.
    ///
    /// Vertical position is left unresolved; platform collisions settle it
    /// afterwards.
    pub fn update(&mut self, held: HeldKeys) {
        self.acc = Vec2::new(0.0, PLAYER_GRAV);
        if held.left {
            self.acc.x -= PLAYER_ACC;
        }
        if held.right {
            self.acc.x += PLAYER_ACC;
        }

        self.acc.x += self.vel.x * PLAYER_FRICTION;

        self.vel += self.acc;
        self.pos += self.vel + 0.5 * self.acc;

        self.pos.x = wrap_x(self.pos.x);
        self.rect.set_midbottom(self.pos);
    }

    /// Resolve vertical overlap against platforms.
    ///
    /// Looks one velocity step ahead; the first platform hit in collection
    /// order wins. Returns the platform resolved against.
    pub fn check_platform_collisions(&mut self, platforms: &[Platform]) -> Option<EntityId> {
        let ahead = self.rect.translated(Vec2::new(0.0, self.vel.y));
        let Some(hit) = first_overlap(&ahead, platforms) else {
            self.on_ground = false;
            return None;
        };

        if self.vel.y > 0.0 {
            self.pos.y = hit.rect.top() - LANDING_OFFSET;
            self.vel.y = 0.0;
            self.on_ground = true;
        } else if self.vel.y < 0.0 {
            // Head bump: box top flush with the platform's underside
            self.pos.y = hit.rect.bottom() + PLAYER_HEIGHT;
            self.vel.y = 0.0;
        }
        self.rect.set_midbottom(self.pos);

        Some(hit.id)
    }

    /// Jump if standing on a platform. Returns whether the jump happened.
    pub fn jump(&mut self, platforms: &[Platform]) -> bool {
        let below = self.rect.translated(Vec2::new(0.0, JUMP_REACH));
        if any_overlap(&below, platforms) {
            self.vel.y = PLAYER_JUMP;
            true
        } else {
            false
        }
    }

    /// Whether the shot cooldown has elapsed at `now_ms`
    pub fn can_shoot(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_shot_ms) > SHOT_COOLDOWN_MS
    }

    /// Fire toward `pointer` if the cooldown allows. The caller owns the
    /// returned bullet and must register it with the session.
    pub fn shoot(&mut self, pointer: Vec2, now_ms: u64, bullet_id: EntityId) -> Option<Bullet> {
        if !self.can_shoot(now_ms) {
            return None;
        }
        self.last_shot_ms = now_ms;

        let origin = self.rect.center();
        let direction = aim_direction(origin, pointer);
        Some(Bullet::new(bullet_id, origin, direction, now_ms))
    }
}

impl HasBoundingBox for Player {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// Static, immutable platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: EntityId,
    pub rect: Rect,
}

impl Platform {
    pub fn new(id: EntityId, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            id,
            rect: Rect::new(x, y, w, h),
        }
    }
}

impl HasBoundingBox for Platform {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// A straight-line projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub rect: Rect,
    pub vel: Vec2,
    /// Clock time at spawn (ms). Informational; expiry is bounds-based.
    pub spawn_ms: u64,
}

impl Bullet {
    pub fn new(id: EntityId, center: Vec2, direction: Vec2, spawn_ms: u64) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, BULLET_SIZE, BULLET_SIZE),
            vel: direction * BULLET_SPEED,
            spawn_ms,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.rect.center()
    }

    /// Move one tick; expires once fully off screen
    pub fn update(&mut self) -> Lifecycle {
        self.rect.translate(self.vel);
        if self.rect.intersects(&screen_rect()) {
            Lifecycle::Alive
        } else {
            Lifecycle::Expired
        }
    }
}

impl HasBoundingBox for Bullet {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// An enemy patrolling its home platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    /// Home platform (lookup only)
    pub home: EntityId,
    pub rect: Rect,
    /// Horizontal speed; sign is the facing direction
    pub vx: f32,
}

impl Enemy {
    /// Place standing on top of `home`, centered horizontally
    pub fn new(id: EntityId, home: &Platform) -> Self {
        let anchor = Vec2::new(home.rect.center_x(), home.rect.top());
        Self {
            id,
            home: home.id,
            rect: Rect::from_midbottom(anchor, ENEMY_SIZE, ENEMY_SIZE),
            vx: ENEMY_SPEED,
        }
    }

    /// Step along the platform, turning around once past either edge.
    ///
    /// The edge check runs after the move, so the enemy can overhang the
    /// platform by up to one step before reversing.
    pub fn update(&mut self, home: &Platform) {
        self.rect.translate(Vec2::new(self.vx, 0.0));
        if self.rect.right() > home.rect.right() || self.rect.left() < home.rect.left() {
            self.vx = -self.vx;
        }
    }
}

impl HasBoundingBox for Enemy {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// The visible play area
pub fn screen_rect() -> Rect {
    Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT)
}

/// Borrowed view of any entity, for dispatch over the closed set
#[derive(Debug, Clone, Copy)]
pub enum EntityView<'a> {
    Player(&'a Player),
    Platform(&'a Platform),
    Bullet(&'a Bullet),
    Enemy(&'a Enemy),
}

impl EntityView<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityView::Player(_) => EntityKind::Player,
            EntityView::Platform(_) => EntityKind::Platform,
            EntityView::Bullet(_) => EntityKind::Bullet,
            EntityView::Enemy(_) => EntityKind::Enemy,
        }
    }
}

impl HasBoundingBox for EntityView<'_> {
    fn bounds(&self) -> Rect {
        match self {
            EntityView::Player(p) => p.bounds(),
            EntityView::Platform(p) => p.bounds(),
            EntityView::Bullet(b) => b.bounds(),
            EntityView::Enemy(e) => e.bounds(),
        }
    }
}

/// Per-session counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub ticks: u64,
    pub jumps: u32,
    pub bullets_fired: u32,
    pub enemies_destroyed: u32,
}

/// One playthrough: the scene and everything in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Cleared when the session should end
    pub playing: bool,
    /// First reason the session stopped
    pub end: Option<SessionEnd>,
    pub player: Player,
    /// Static geometry (insertion order is the collision tie-break order)
    pub platforms: Vec<Platform>,
    /// Live bullets, oldest first
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    /// Every entity, back-to-front
    pub draw_order: Vec<EntityHandle>,
    pub stats: SessionStats,
    /// Next entity ID
    next_id: u32,
}

impl SessionState {
    /// Build the fixed scene: ground, a middle and an upper platform, one
    /// enemy patrolling the middle platform.
    pub fn new() -> Self {
        let mut state = Self::empty();

        state.add_platform(0.0, SCREEN_HEIGHT - 40.0, SCREEN_WIDTH, 40.0);
        let mid = state.add_platform(
            SCREEN_WIDTH / 2.0 - 100.0,
            SCREEN_HEIGHT * 3.0 / 4.0,
            200.0,
            20.0,
        );
        state.add_platform(150.0, SCREEN_HEIGHT / 2.0 - 50.0, 150.0, 20.0);

        state.add_enemy(mid);

        state
    }

    /// A session holding only the player
    pub fn empty() -> Self {
        let player = Player::new(EntityId(1));
        let draw_order = vec![EntityHandle::new(player.id, EntityKind::Player)];
        Self {
            playing: true,
            end: None,
            player,
            platforms: Vec::new(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            draw_order,
            stats: SessionStats::default(),
            next_id: 2,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.peek_entity_id();
        self.next_id += 1;
        id
    }

    /// The ID the next allocation will hand out
    fn peek_entity_id(&self) -> EntityId {
        EntityId(self.next_id)
    }

    pub fn add_platform(&mut self, x: f32, y: f32, w: f32, h: f32) -> EntityId {
        let id = self.next_entity_id();
        self.platforms.push(Platform::new(id, x, y, w, h));
        self.draw_order.push(EntityHandle::new(id, EntityKind::Platform));
        id
    }

    /// Spawn an enemy on the given platform. `None` if no such platform.
    pub fn add_enemy(&mut self, home: EntityId) -> Option<EntityId> {
        let id = self.next_entity_id();
        let enemy = Enemy::new(id, self.platform(home)?);
        self.enemies.push(enemy);
        self.draw_order.push(EntityHandle::new(id, EntityKind::Enemy));
        Some(id)
    }

    /// Register a bullet in the bullet and draw collections
    pub fn add_bullet(&mut self, bullet: Bullet) -> EntityId {
        let id = bullet.id;
        self.bullets.push(bullet);
        self.draw_order.push(EntityHandle::new(id, EntityKind::Bullet));
        id
    }

    pub fn platform(&self, id: EntityId) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Look up any entity by handle
    pub fn entity(&self, handle: EntityHandle) -> Option<EntityView<'_>> {
        match handle.kind {
            EntityKind::Player => {
                (self.player.id == handle.id).then_some(EntityView::Player(&self.player))
            }
            EntityKind::Platform => self.platform(handle.id).map(EntityView::Platform),
            EntityKind::Bullet => self
                .bullets
                .iter()
                .find(|b| b.id == handle.id)
                .map(EntityView::Bullet),
            EntityKind::Enemy => self
                .enemies
                .iter()
                .find(|e| e.id == handle.id)
                .map(EntityView::Enemy),
        }
    }

    /// Entities in draw order, back-to-front
    pub fn iter_draw_order(&self) -> impl Iterator<Item = EntityView<'_>> + '_ {
        self.draw_order.iter().filter_map(|&handle| self.entity(handle))
    }

    /// Remove a bullet or enemy from every collection it belongs to.
    ///
    /// The player and platforms live for the whole session and are never
    /// removed. Returns whether anything was removed.
    pub fn remove(&mut self, handle: EntityHandle) -> bool {
        let removed = match handle.kind {
            EntityKind::Bullet => {
                let before = self.bullets.len();
                self.bullets.retain(|b| b.id != handle.id);
                self.bullets.len() != before
            }
            EntityKind::Enemy => {
                let before = self.enemies.len();
                self.enemies.retain(|e| e.id != handle.id);
                self.enemies.len() != before
            }
            EntityKind::Player | EntityKind::Platform => return false,
        };
        self.draw_order.retain(|h| *h != handle);
        removed
    }

    /// Jump if the player is grounded
    pub fn player_jump(&mut self) -> bool {
        let jumped = self.player.jump(&self.platforms);
        if jumped {
            self.stats.jumps += 1;
            log::debug!("Jump at {:?}", self.player.pos);
        }
        jumped
    }

    /// Fire a bullet toward `pointer` if the cooldown allows
    pub fn player_shoot(&mut self, pointer: Vec2, now_ms: u64) -> Option<EntityId> {
        // Only spend the ID once the cooldown lets the shot through
        let bullet = self.player.shoot(pointer, now_ms, self.peek_entity_id())?;
        self.next_entity_id();
        self.stats.bullets_fired += 1;
        log::debug!("Shot {:?} toward {:?} at {}ms", bullet.id, pointer, now_ms);
        Some(self.add_bullet(bullet))
    }

    /// Stop the session. The first recorded reason is kept.
    pub fn end_session(&mut self, reason: SessionEnd) {
        self.playing = false;
        self.end.get_or_insert(reason);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
