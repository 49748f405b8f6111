//! Spawn and wave director
//!
//! Each playing tick the director rolls a difficulty-scaled probability to
//! decide whether one enemy enters this tick, and from wave 3 onward a
//! separate low-probability roll can introduce a boss (never more than one
//! at a time). Wave completion itself is observed by the engine via
//! `wave_kills`; the thresholds live in [`crate::sim::state::kills_required`].

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::Tuning;
use crate::sim::enemy::{Enemy, EnemyKind};
use crate::sim::entity::IdGen;
use crate::sim::state::GameState;

/// First wave a boss may appear on
const BOSS_MIN_WAVE: u32 = 3;
/// Per-tick boss probability once eligible
const BOSS_CHANCE: f32 = 0.002;

/// Per-tick probability of a regular spawn, rising with the wave and
/// saturating at wave 15
pub fn spawn_rate(wave: u32) -> f32 {
    (0.008 + wave.min(15) as f32 * 0.002).min(0.04)
}

/// Difficulty-scaled archetype selection: tank and fast probabilities rise
/// with the wave while basic takes the shrinking remainder.
pub fn roll_kind(wave: u32, rng: &mut Pcg32) -> EnemyKind {
    let t = wave.min(15) as f32 / 15.0;
    let p_tank = 0.10 + 0.15 * t;
    let p_fast = 0.15 + 0.20 * t;

    let roll = rng.random::<f32>();
    if roll < p_tank {
        EnemyKind::Tank
    } else if roll < p_tank + p_fast {
        EnemyKind::Fast
    } else {
        EnemyKind::Basic
    }
}

/// Roll this tick's spawn. At most one enemy per tick; bosses take
/// priority and are suppressed while one is already on the field.
pub fn try_spawn(
    state: &GameState,
    tuning: &Tuning,
    rng: &mut Pcg32,
    ids: &mut IdGen,
    view: Vec2,
) -> Option<Enemy> {
    if state.wave >= BOSS_MIN_WAVE && !state.boss_active && rng.random::<f32>() < BOSS_CHANCE {
        let stats = &tuning.enemies.boss;
        let x = rng.random_range(0.0..view.x - stats.width);
        return Some(Enemy::spawn(ids.next(), EnemyKind::Boss, x, stats, rng));
    }

    if rng.random::<f32>() >= spawn_rate(state.wave) {
        return None;
    }

    let kind = roll_kind(state.wave, rng);
    let stats = match kind {
        EnemyKind::Basic => &tuning.enemies.basic,
        EnemyKind::Fast => &tuning.enemies.fast,
        EnemyKind::Tank => &tuning.enemies.tank,
        EnemyKind::Boss => &tuning.enemies.boss,
    };
    let x = rng.random_range(0.0..view.x - stats.width);
    Some(Enemy::spawn(ids.next(), kind, x, stats, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const VIEW: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_spawn_rate_scales_and_clamps() {
        assert!((spawn_rate(1) - 0.010).abs() < 1e-6);
        assert!((spawn_rate(5) - 0.018).abs() < 1e-6);
        // Saturated: min(0.04, 0.008 + 15 * 0.002) = 0.038
        assert!((spawn_rate(15) - 0.038).abs() < 1e-6);
        assert_eq!(spawn_rate(15), spawn_rate(99));
        assert!(spawn_rate(99) <= 0.04);
    }

    #[test]
    fn test_difficulty_shifts_archetype_mix() {
        let mut rng = Pcg32::seed_from_u64(11);
        let tally = |wave: u32, rng: &mut Pcg32| {
            let mut counts = [0u32; 3];
            for _ in 0..10_000 {
                match roll_kind(wave, rng) {
                    EnemyKind::Basic => counts[0] += 1,
                    EnemyKind::Fast => counts[1] += 1,
                    EnemyKind::Tank => counts[2] += 1,
                    EnemyKind::Boss => unreachable!("director never rolls a boss here"),
                }
            }
            counts
        };

        let early = tally(1, &mut rng);
        let late = tally(15, &mut rng);

        // Basic falls, fast and tank rise as waves progress
        assert!(late[0] < early[0]);
        assert!(late[1] > early[1]);
        assert!(late[2] > early[2]);
    }

    #[test]
    fn test_no_boss_before_wave_three() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(13);
        let mut ids = IdGen::new();
        let mut state = GameState::new(0, 0);
        state.wave = 2;

        for _ in 0..20_000 {
            if let Some(e) = try_spawn(&state, &tuning, &mut rng, &mut ids, VIEW) {
                assert_ne!(e.kind, EnemyKind::Boss);
            }
        }
    }

    #[test]
    fn test_boss_appears_from_wave_three() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(13);
        let mut ids = IdGen::new();
        let mut state = GameState::new(0, 0);
        state.wave = 3;

        let mut saw_boss = false;
        for _ in 0..20_000 {
            if let Some(e) = try_spawn(&state, &tuning, &mut rng, &mut ids, VIEW) {
                if e.kind == EnemyKind::Boss {
                    saw_boss = true;
                    break;
                }
            }
        }
        assert!(saw_boss);
    }

    #[test]
    fn test_active_boss_suppresses_another() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(17);
        let mut ids = IdGen::new();
        let mut state = GameState::new(0, 0);
        state.wave = 10;
        state.boss_active = true;

        for _ in 0..20_000 {
            if let Some(e) = try_spawn(&state, &tuning, &mut rng, &mut ids, VIEW) {
                assert_ne!(e.kind, EnemyKind::Boss);
            }
        }
    }

    #[test]
    fn test_spawn_lands_inside_horizontal_bounds() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(19);
        let mut ids = IdGen::new();
        let state = GameState::new(0, 0);

        for _ in 0..5_000 {
            if let Some(e) = try_spawn(&state, &tuning, &mut rng, &mut ids, VIEW) {
                assert!(e.pos.x >= 0.0);
                assert!(e.pos.x + e.size.x <= VIEW.x);
                assert!(e.pos.y < 0.0);
            }
        }
    }
}
