//! Parallax starfield background
//!
//! Purely visual. Three layers scroll downward at different rates to fake
//! depth; stars that leave the bottom wrap back to the top at a fresh
//! horizontal position. Keeps animating even while the game is paused, so
//! it owns a private RNG stream - cosmetic wrapping never perturbs the
//! gameplay roll sequence.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per frame at the 60 Hz reference rate
    pub speed: f32,
    pub brightness: f32,
    pub twinkle_phase: f32,
    pub twinkle_speed: f32,
}

/// (star count, min size, max size) per layer, far to near
const LAYERS: [(usize, f32, f32); 3] = [(80, 0.3, 0.8), (50, 1.0, 1.5), (25, 2.0, 2.5)];

#[derive(Debug, Clone)]
pub struct Starfield {
    layers: Vec<Vec<Star>>,
    view: Vec2,
    rng: Pcg32,
}

impl Starfield {
    pub fn new(view: Vec2, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let layers = LAYERS
            .iter()
            .map(|&(count, size_min, size_max)| {
                (0..count)
                    .map(|_| Star {
                        pos: Vec2::new(
                            rng.random_range(0.0..view.x),
                            rng.random_range(0.0..view.y),
                        ),
                        size: rng.random_range(size_min..size_max),
                        speed: (size_max - size_min + 0.5) * 0.4 + rng.random_range(0.0..0.3),
                        brightness: rng.random_range(0.5..1.0),
                        twinkle_phase: rng.random_range(0.0..std::f32::consts::TAU),
                        twinkle_speed: rng.random_range(0.001..0.004),
                    })
                    .collect()
            })
            .collect();
        Self { layers, view, rng }
    }

    pub fn update(&mut self, dt: f32) {
        let frames = dt / crate::consts::FRAME_MS;
        for layer in &mut self.layers {
            for star in layer.iter_mut() {
                star.pos.y += star.speed * frames;
                star.twinkle_phase += star.twinkle_speed * dt;

                if star.pos.y > self.view.y {
                    star.pos.y = -star.size;
                    star.pos.x = self.rng.random_range(0.0..self.view.x);
                }
            }
        }
    }

    /// Layers far to near, for back-to-front drawing
    pub fn layers(&self) -> &[Vec<Star>] {
        &self.layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_layer_population() {
        let field = Starfield::new(VIEW, 5);
        let counts: Vec<usize> = field.layers().iter().map(|l| l.len()).collect();
        assert_eq!(counts, vec![80, 50, 25]);
    }

    #[test]
    fn test_stars_scroll_and_wrap() {
        let mut field = Starfield::new(VIEW, 5);

        let before: Vec<f32> = field.layers()[0].iter().map(|s| s.pos.y).collect();
        field.update(16.0);
        let after: Vec<f32> = field.layers()[0].iter().map(|s| s.pos.y).collect();
        assert!(before.iter().zip(&after).any(|(b, a)| a > b));

        // Run long enough that wrapping must have occurred; everything
        // stays within the view band.
        for _ in 0..10_000 {
            field.update(16.0);
        }
        for layer in field.layers() {
            for star in layer {
                assert!(star.pos.y <= VIEW.y + star.speed);
                assert!(star.pos.x >= 0.0 && star.pos.x <= VIEW.x);
            }
        }
    }
}
