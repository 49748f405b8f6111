//! Projectiles: bullets, rockets, smart rockets, laser beams
//!
//! Player fire and enemy fire live in two disjoint pools so a faction can
//! never hit itself. A smart rocket holds a weak target handle (an
//! [`EntityId`], never a reference) that is re-validated against the live
//! enemy list every tick; when the target dies the rocket coasts on its
//! last heading instead of faulting.

use glam::Vec2;

use crate::px_per_ms;
use crate::sim::enemy::Enemy;
use crate::sim::entity::{Aabb, EntityId};
use crate::sim::pool::Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    Bullet,
    Rocket,
    SmartRocket,
    /// Stationary full-height beam with a lifetime instead of a trajectory
    Laser,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Unit direction of travel; `Vec2::ZERO` is the legacy straight-up
    /// default for simple forward shots
    pub vel: Vec2,
    /// Pixels per frame at the 60 Hz reference rate
    pub speed: f32,
    pub damage: i32,
    /// Weak homing handle, smart rockets only
    pub target: Option<EntityId>,
    /// Remaining beam lifetime, lasers only (ms)
    pub ttl_ms: f32,
    pub active: bool,
}

impl Slot for Projectile {
    fn is_active(&self) -> bool {
        self.active
    }
}

impl Projectile {
    /// Pool constructor: an inert slot awaiting initialization
    pub fn idle() -> Self {
        Self {
            id: EntityId(0),
            kind: ProjectileKind::Bullet,
            pos: Vec2::ZERO,
            size: Vec2::ZERO,
            vel: Vec2::ZERO,
            speed: 0.0,
            damage: 0,
            target: None,
            ttl_ms: 0.0,
            active: false,
        }
    }

    /// Pool reset: wipe per-use state so nothing leaks between lives
    pub fn recycle(p: &mut Self) {
        p.vel = Vec2::ZERO;
        p.target = None;
        p.ttl_ms = 0.0;
        p.active = true;
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Direction of travel, resolving the legacy zero-vector default
    #[inline]
    fn heading(&self) -> Vec2 {
        if self.vel == Vec2::ZERO {
            Vec2::new(0.0, -1.0)
        } else {
            self.vel
        }
    }

    /// Advance one tick. `enemies` is only consulted for homing.
    pub fn update(&mut self, dt: f32, enemies: &[Enemy]) {
        if !self.active {
            return;
        }

        if self.kind == ProjectileKind::Laser {
            self.ttl_ms -= dt;
            if self.ttl_ms <= 0.0 {
                self.active = false;
            }
            return;
        }

        if self.kind == ProjectileKind::SmartRocket {
            if let Some(target_id) = self.target {
                // Instantaneous re-aim at the live target every tick; an
                // arcade-feel simplification, not realistic steering.
                if let Some(enemy) = enemies
                    .iter()
                    .find(|e| e.id == target_id && e.is_targetable())
                {
                    let heading = (enemy.center() - self.aabb().center()).normalize_or_zero();
                    if heading != Vec2::ZERO {
                        self.vel = heading;
                    }
                }
            }
        }

        self.pos += self.heading() * px_per_ms(self.speed) * dt;
    }

    /// Past the cull margin on either axis
    pub fn is_off_view(&self, view: Vec2) -> bool {
        let m = crate::consts::CULL_MARGIN;
        self.pos.x < -m || self.pos.x > view.x + m || self.pos.y < -m || self.pos.y > view.y + m
    }
}
