//! Player ship
//!
//! Direct position control: the four directional actions integrate the
//! position per axis (simultaneous presses compose additively on orthogonal
//! axes) and the result is clamped into the viewport. No velocity or
//! acceleration model.

use glam::Vec2;

use crate::config::PlayerTuning;
use crate::input::{Action, InputSource};
use crate::px_per_ms;
use crate::sim::entity::{Aabb, EntityId};

#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame at the 60 Hz reference rate
    pub speed: f32,
}

impl Player {
    /// Spawn centered horizontally, hovering above the bottom edge
    pub fn new(id: EntityId, tuning: &PlayerTuning, view: Vec2) -> Self {
        let size = Vec2::new(tuning.width, tuning.height);
        Self {
            id,
            pos: Vec2::new(
                view.x / 2.0 - size.x / 2.0,
                view.y - size.y - 50.0,
            ),
            size,
            speed: tuning.speed,
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

    /// Integrate held directional input over `dt` ms and clamp into
    /// `[0, view - size]` on both axes.
    pub fn update(&mut self, dt: f32, input: &dyn InputSource, view: Vec2) {
        let step = px_per_ms(self.speed) * dt;

        if input.is_pressed(Action::Left) {
            self.pos.x -= step;
        }
        if input.is_pressed(Action::Right) {
            self.pos.x += step;
        }
        if input.is_pressed(Action::Up) {
            self.pos.y -= step;
        }
        if input.is_pressed(Action::Down) {
            self.pos.y += step;
        }

        self.pos.x = self.pos.x.clamp(0.0, view.x - self.size.x);
        self.pos.y = self.pos.y.clamp(0.0, view.y - self.size.y);
    }
}
