//! Enemy ships and their lifecycle
//!
//! An enemy is `Spawned → (Dying) → Removed`. Kills do not remove the ship
//! immediately: it keeps reporting `active` while a short death animation
//! plays, but a dying ship no longer shoots, moves, or collides. Ships that
//! drift out the bottom of the view are removed without score.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::EnemyStats;
use crate::consts::{DEATH_ANIM_MS, DESPAWN_MARGIN, SHOOT_MIN_Y};
use crate::px_per_ms;
use crate::sim::entity::{Aabb, EntityId};

/// Closed archetype set; every stat branch matches on it exhaustively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    Boss,
}

/// Chance that a freshly spawned basic ship is armed
const BASIC_ARMED_CHANCE: f32 = 0.4;
/// Lateral sway amplitude for basic ships, pixels per frame
const SWAY_AMPLITUDE: f32 = 1.0;
/// Horizontal steering applied by fast ships, pixels per update tick
const FAST_STEER_PER_TICK: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame at the 60 Hz reference rate, rolled at spawn
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub points: u32,
    pub can_shoot: bool,
    pub shoot_timer: u32,
    pub shoot_interval: u32,
    pub dying: bool,
    pub death_timer_ms: f32,
    pub active: bool,
}

impl Enemy {
    /// Spawn just above the viewport at horizontal position `x`
    pub fn spawn(id: EntityId, kind: EnemyKind, x: f32, stats: &EnemyStats, rng: &mut Pcg32) -> Self {
        let speed = if stats.speed_max > stats.speed_min {
            rng.random_range(stats.speed_min..stats.speed_max)
        } else {
            stats.speed_min
        };

        let can_shoot = match kind {
            EnemyKind::Boss | EnemyKind::Tank => true,
            EnemyKind::Basic => rng.random::<f32>() < BASIC_ARMED_CHANCE,
            EnemyKind::Fast => false,
        };

        Self {
            id,
            kind,
            pos: Vec2::new(x, -stats.height),
            size: Vec2::new(stats.width, stats.height),
            speed,
            health: stats.health,
            max_health: stats.health,
            points: stats.points,
            can_shoot,
            shoot_timer: 0,
            shoot_interval: stats.shoot_interval,
            dying: false,
            death_timer_ms: 0.0,
            active: true,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.aabb().center()
    }

    /// Live for gameplay purposes: dying ships still render but no longer
    /// collide, shoot, or attract homing rockets.
    #[inline]
    pub fn is_targetable(&self) -> bool {
        self.active && !self.dying
    }

    /// Movement and despawn for one tick. Dying ships only advance their
    /// death animation.
    pub fn update(&mut self, dt: f32, player_center_x: f32, view: Vec2) {
        if !self.active {
            return;
        }
        if self.dying {
            self.advance_death(dt);
            return;
        }

        self.pos.y += px_per_ms(self.speed) * dt;

        match self.kind {
            EnemyKind::Basic => {
                self.pos.x += (self.pos.y * 0.02).sin() * px_per_ms(SWAY_AMPLITUDE) * dt;
            }
            EnemyKind::Fast => {
                let dx = player_center_x - self.center().x;
                self.pos.x += dx.clamp(-FAST_STEER_PER_TICK, FAST_STEER_PER_TICK);
            }
            EnemyKind::Tank | EnemyKind::Boss => {}
        }

        // Escaped out the bottom: gone, no score
        if self.pos.y > view.y + DESPAWN_MARGIN {
            self.active = false;
        }
    }

    /// Enter the death animation. Idempotent so a kill is only scored once
    /// by the caller that observed the transition.
    pub fn start_dying(&mut self) {
        if !self.dying {
            self.dying = true;
            self.death_timer_ms = 0.0;
            self.shoot_timer = 0;
        }
    }

    /// Tick the death animation; reclaims the slot once it has played out.
    pub fn advance_death(&mut self, dt: f32) {
        if !self.dying {
            return;
        }
        self.death_timer_ms += dt;
        if self.death_timer_ms >= DEATH_ANIM_MS {
            self.dying = false;
            self.active = false;
        }
    }

    /// Advance the shoot timer by one tick. Returns true when the ship
    /// should fire this tick; the timer only resets once the shot is
    /// actually released (armed ships hold fire until on screen).
    pub fn tick_shoot_timer(&mut self) -> bool {
        if !self.can_shoot || !self.is_targetable() {
            return false;
        }
        if self.shoot_timer < self.shoot_interval {
            self.shoot_timer += 1;
        }
        if self.shoot_timer >= self.shoot_interval && self.pos.y > SHOOT_MIN_Y {
            self.shoot_timer = 0;
            return true;
        }
        false
    }
}
