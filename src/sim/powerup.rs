//! Collectible power-ups
//!
//! Dropped by kills, sink slowly toward the bottom of the view, and drift
//! magnetically toward the player once inside the attraction radius.

use glam::Vec2;

use crate::consts::{ATTRACT_RADIUS, DESPAWN_MARGIN};
use crate::px_per_ms;
use crate::sim::entity::{Aabb, EntityId};
use crate::sim::pool::Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Health,
    Energy,
    ScoreBonus,
}

/// Sink rate, pixels per frame at 60 Hz
const SINK_SPEED: f32 = 1.5;
/// Drift rate toward the player once attracted, pixels per frame
const ATTRACT_SPEED: f32 = 4.0;
const SIZE: f32 = 20.0;

#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: EntityId,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Bobbing animation phase, cosmetic only
    pub float_phase: f32,
    pub active: bool,
}

impl Slot for PowerUp {
    fn is_active(&self) -> bool {
        self.active
    }
}

impl PowerUp {
    pub fn idle() -> Self {
        Self {
            id: EntityId(0),
            kind: PowerUpKind::Energy,
            pos: Vec2::ZERO,
            size: Vec2::splat(SIZE),
            float_phase: 0.0,
            active: false,
        }
    }

    pub fn recycle(p: &mut Self) {
        p.float_phase = 0.0;
        p.active = true;
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Sink, or drift toward the player when within the attraction radius;
    /// despawn once past the bottom threshold.
    pub fn update(&mut self, dt: f32, player_center: Vec2, view: Vec2) {
        if !self.active {
            return;
        }

        let to_player = player_center - self.aabb().center();
        if to_player.length() < ATTRACT_RADIUS {
            self.pos += to_player.normalize_or_zero() * px_per_ms(ATTRACT_SPEED) * dt;
        } else {
            self.pos.y += px_per_ms(SINK_SPEED) * dt;
        }

        self.float_phase += 0.004 * dt;

        if self.pos.y > view.y + DESPAWN_MARGIN {
            self.active = false;
        }
    }
}
