//! Read-only scene contract
//!
//! Rendering is the host's problem. Once per frame the host hands the
//! engine a [`SceneView`] and [`crate::sim::Engine::render`] walks every
//! active entity in a fixed draw order:
//!
//! background stars → shield FX → player → player projectiles → enemy
//! projectiles → enemies → power-ups → particles → post FX
//!
//! Inactive entities are never visited. All methods default to no-ops so a
//! host only implements the layers it draws.

use glam::Vec2;

use crate::sim::{Enemy, Particle, Player, PowerUp, Projectile, Star};

/// Visitor the renderer implements; invoked in draw order
pub trait SceneView {
    fn star(&mut self, _layer: usize, _star: &Star) {}
    fn shield_fx(&mut self, _center: Vec2, _radius: f32, _remaining_ms: f32) {}
    fn player(&mut self, _player: &Player) {}
    fn player_shot(&mut self, _shot: &Projectile) {}
    fn enemy_shot(&mut self, _shot: &Projectile) {}
    fn enemy(&mut self, _enemy: &Enemy) {}
    fn powerup(&mut self, _item: &PowerUp) {}
    fn particle(&mut self, _particle: &Particle) {}
    /// Called last with the current camera-shake magnitude
    fn post_fx(&mut self, _screen_shake: f32) {}
}
