//! Visual particles
//!
//! Sparks, explosions and pickup sparkles. Never read by gameplay logic;
//! they exist so the renderer has something pretty to draw.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::FRAME_MS;
use crate::sim::entity::{EntityId, IdGen};
use crate::sim::pool::{Pool, Slot};

/// Renderer color keys
pub mod colors {
    pub const SPARK: u32 = 0xffdd55;
    pub const EXPLOSION: u32 = 0xffaa00;
    pub const BOSS_EXPLOSION: u32 = 0xff0044;
    pub const PICKUP: u32 = 0x00e5ff;
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub id: EntityId,
    pub pos: Vec2,
    /// Pixels per frame at the 60 Hz reference rate
    pub vel: Vec2,
    /// 1.0 at birth, fades to 0.0
    pub life: f32,
    /// Life lost per reference frame
    pub decay: f32,
    pub color: u32,
    pub size: f32,
    pub active: bool,
}

impl Slot for Particle {
    fn is_active(&self) -> bool {
        self.active
    }
}

impl Particle {
    pub fn idle() -> Self {
        Self {
            id: EntityId(0),
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0.0,
            decay: 0.02,
            color: colors::SPARK,
            size: 2.0,
            active: false,
        }
    }

    pub fn recycle(p: &mut Self) {
        p.vel = Vec2::ZERO;
        p.life = 1.0;
        p.active = true;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        let frames = dt / FRAME_MS;

        self.pos += self.vel * frames;
        self.vel *= 0.95f32.powf(frames);
        self.life -= self.decay * frames;

        if self.life <= 0.0 {
            self.active = false;
        }
    }
}

/// Radial burst of `count` particles around `center`
pub fn burst(
    pool: &mut Pool<Particle>,
    ids: &mut IdGen,
    rng: &mut Pcg32,
    center: Vec2,
    count: usize,
    color: u32,
    max_speed: f32,
) {
    for _ in 0..count {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(0.5..max_speed);
        let p = pool.acquire();
        p.id = ids.next();
        p.pos = center;
        p.vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        p.color = color;
        p.size = rng.random_range(1.0..5.0);
        p.decay = rng.random_range(0.02..0.05);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn pool() -> Pool<Particle> {
        Pool::new(Particle::idle, Particle::recycle)
    }

    #[test]
    fn test_life_decays_to_inactive() {
        let mut p = Particle::idle();
        Particle::recycle(&mut p);
        p.decay = 0.5;

        p.update(FRAME_MS);
        assert!(p.active);
        assert!((p.life - 0.5).abs() < 1e-4);

        p.update(FRAME_MS);
        assert!(!p.active);
    }

    #[test]
    fn test_velocity_damps_over_time() {
        let mut p = Particle::idle();
        Particle::recycle(&mut p);
        p.vel = Vec2::new(10.0, 0.0);
        p.decay = 0.0;

        p.update(FRAME_MS);
        assert!(p.vel.x < 10.0);
        assert!(p.vel.x > 0.0);
    }

    #[test]
    fn test_burst_spawns_live_particles() {
        let mut particles = pool();
        let mut ids = IdGen::new();
        let mut rng = Pcg32::seed_from_u64(3);

        burst(
            &mut particles,
            &mut ids,
            &mut rng,
            Vec2::new(50.0, 50.0),
            12,
            colors::EXPLOSION,
            8.0,
        );

        assert_eq!(particles.len(), 12);
        for p in particles.active() {
            assert!(p.active);
            assert_eq!(p.pos, Vec2::new(50.0, 50.0));
            assert_eq!(p.color, colors::EXPLOSION);
            assert!(p.vel.length() > 0.0);
        }
    }
}
