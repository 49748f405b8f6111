//! Collision and damage resolution
//!
//! Runs once per tick after every entity has moved. All tests are AABB
//! overlaps; at this entity count no broad phase is needed. Rules apply in
//! a fixed order: player fire against enemies, enemy bodies against the
//! player, enemy fire against the player, then power-up pickups.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::audio::{AudioEvent, AudioSink};
use crate::config::Tuning;
use crate::consts::{MAX_ENERGY, MAX_HEALTH};
use crate::sim::enemy::{Enemy, EnemyKind};
use crate::sim::entity::IdGen;
use crate::sim::particle::{self, Particle, colors};
use crate::sim::player::Player;
use crate::sim::pool::Pool;
use crate::sim::powerup::{PowerUp, PowerUpKind};
use crate::sim::projectile::{Projectile, ProjectileKind};
use crate::sim::state::GameState;

/// Energy restored by an energy cell pickup
const ENERGY_PICKUP: f32 = 25.0;
/// Score granted by a score-bonus pickup
const SCORE_PICKUP: u32 = 250;

/// Resolve every pairwise interaction for this tick
#[allow(clippy::too_many_arguments)]
pub fn resolve(
    player: &Player,
    enemies: &mut [Enemy],
    player_shots: &mut Pool<Projectile>,
    enemy_shots: &mut Pool<Projectile>,
    particles: &mut Pool<Particle>,
    powerups: &mut Pool<PowerUp>,
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut Pcg32,
    ids: &mut IdGen,
    audio: &mut dyn AudioSink,
) {
    player_fire_vs_enemies(
        enemies,
        player_shots,
        particles,
        powerups,
        state,
        tuning,
        rng,
        ids,
        audio,
    );
    enemy_bodies_vs_player(player, enemies, particles, state, rng, ids, audio);
    enemy_fire_vs_player(player, enemy_shots, particles, state, rng, ids, audio);
    pickups_vs_player(player, powerups, particles, state, rng, ids, audio);
}

#[allow(clippy::too_many_arguments)]
fn player_fire_vs_enemies(
    enemies: &mut [Enemy],
    player_shots: &mut Pool<Projectile>,
    particles: &mut Pool<Particle>,
    powerups: &mut Pool<PowerUp>,
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut Pcg32,
    ids: &mut IdGen,
    audio: &mut dyn AudioSink,
) {
    for shot in player_shots.active_mut() {
        if !shot.active {
            continue;
        }
        // Lasers are a standing beam: they persist through hits and damage
        // everything they overlap, every tick they exist.
        let consumed_on_hit = shot.kind != ProjectileKind::Laser;

        for enemy in enemies.iter_mut() {
            if !enemy.is_targetable() || !shot.aabb().overlaps(&enemy.aabb()) {
                continue;
            }

            enemy.health -= shot.damage;
            particle::burst(
                particles,
                ids,
                rng,
                shot.aabb().center(),
                4,
                colors::SPARK,
                4.0,
            );

            if enemy.health <= 0 {
                kill_enemy(enemy, particles, powerups, state, tuning, rng, ids, audio);
            }

            if consumed_on_hit {
                shot.active = false;
                break;
            }
        }
    }
    player_shots.sweep();
}

/// A killing blow: start the death animation exactly once, book the score,
/// throw a tier-scaled explosion and roll for a drop.
#[allow(clippy::too_many_arguments)]
fn kill_enemy(
    enemy: &mut Enemy,
    particles: &mut Pool<Particle>,
    powerups: &mut Pool<PowerUp>,
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut Pcg32,
    ids: &mut IdGen,
    audio: &mut dyn AudioSink,
) {
    enemy.start_dying();
    state.record_kill(enemy.points);
    audio.play(AudioEvent::Explosion);

    let (burst_count, burst_color) = match enemy.kind {
        EnemyKind::Boss => (20, colors::BOSS_EXPLOSION),
        EnemyKind::Tank => (14, colors::EXPLOSION),
        EnemyKind::Basic | EnemyKind::Fast => (10, colors::EXPLOSION),
    };
    particle::burst(
        particles,
        ids,
        rng,
        enemy.center(),
        burst_count,
        burst_color,
        8.0,
    );

    if enemy.kind == EnemyKind::Boss {
        state.screen_shake = 1.0;
    }

    let drop_chance = match enemy.kind {
        EnemyKind::Boss => tuning.drops.boss_chance,
        EnemyKind::Tank => tuning.drops.tank_chance,
        EnemyKind::Basic | EnemyKind::Fast => tuning.drops.base_chance,
    };
    if rng.random::<f32>() < drop_chance {
        let kind = roll_drop_kind(state.health, tuning, rng);
        let center = enemy.center();
        let item = powerups.acquire();
        item.id = ids.next();
        item.kind = kind;
        item.pos = center - item.size * 0.5;
    }
}

/// Weighted drop-type selection: a single uniform draw against the
/// cumulative weights, biased toward health while the player is hurting.
fn roll_drop_kind(health: i32, tuning: &Tuning, rng: &mut Pcg32) -> PowerUpKind {
    let weights = if health < 2 {
        tuning.drops.weights_low_health
    } else {
        tuning.drops.weights_normal
    };
    let kinds = [PowerUpKind::Health, PowerUpKind::Energy, PowerUpKind::ScoreBonus];

    let draw = rng.random::<f32>();
    let mut cumulative = 0.0;
    for (weight, kind) in weights.iter().zip(kinds) {
        cumulative += weight;
        if draw < cumulative {
            return kind;
        }
    }
    PowerUpKind::ScoreBonus
}

fn enemy_bodies_vs_player(
    player: &Player,
    enemies: &mut [Enemy],
    particles: &mut Pool<Particle>,
    state: &mut GameState,
    rng: &mut Pcg32,
    ids: &mut IdGen,
    audio: &mut dyn AudioSink,
) {
    for enemy in enemies.iter_mut() {
        if !enemy.is_targetable() || !enemy.aabb().overlaps(&player.aabb()) {
            continue;
        }
        if state.shield_active() {
            continue;
        }

        // Kill-on-contact convention: the rammer vanishes with no death
        // animation and no score.
        enemy.active = false;
        state.record_player_hit();
        audio.play(AudioEvent::Hit);
        particle::burst(particles, ids, rng, player.center(), 8, colors::EXPLOSION, 6.0);
    }
}

fn enemy_fire_vs_player(
    player: &Player,
    enemy_shots: &mut Pool<Projectile>,
    particles: &mut Pool<Particle>,
    state: &mut GameState,
    rng: &mut Pcg32,
    ids: &mut IdGen,
    audio: &mut dyn AudioSink,
) {
    for shot in enemy_shots.active_mut() {
        if !shot.active || !shot.aabb().overlaps(&player.aabb()) {
            continue;
        }
        // The round is spent either way; the shield only gates the damage
        shot.active = false;
        if state.shield_active() {
            continue;
        }

        state.record_player_hit();
        audio.play(AudioEvent::Hit);
        particle::burst(particles, ids, rng, shot.aabb().center(), 4, colors::SPARK, 4.0);
    }
    enemy_shots.sweep();
}

fn pickups_vs_player(
    player: &Player,
    powerups: &mut Pool<PowerUp>,
    particles: &mut Pool<Particle>,
    state: &mut GameState,
    rng: &mut Pcg32,
    ids: &mut IdGen,
    audio: &mut dyn AudioSink,
) {
    for item in powerups.active_mut() {
        if !item.active || !item.aabb().overlaps(&player.aabb()) {
            continue;
        }
        item.active = false;

        match item.kind {
            PowerUpKind::Health => state.health = (state.health + 1).min(MAX_HEALTH),
            PowerUpKind::Energy => state.energy = (state.energy + ENERGY_PICKUP).min(MAX_ENERGY),
            PowerUpKind::ScoreBonus => state.score += SCORE_PICKUP,
        }

        audio.play(AudioEvent::Powerup);
        particle::burst(
            particles,
            ids,
            rng,
            item.aabb().center(),
            8,
            colors::PICKUP,
            5.0,
        );
    }
    powerups.sweep();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::config::{EnemyTable, PlayerTuning};
    use crate::sim::entity::EntityId;
    use crate::sim::state::GamePhase;
    use glam::Vec2;
    use rand::SeedableRng;

    const VIEW: Vec2 = Vec2::new(800.0, 600.0);

    struct World {
        player: Player,
        enemies: Vec<Enemy>,
        player_shots: Pool<Projectile>,
        enemy_shots: Pool<Projectile>,
        particles: Pool<Particle>,
        powerups: Pool<PowerUp>,
        state: GameState,
        tuning: Tuning,
        rng: Pcg32,
        ids: IdGen,
    }

    impl World {
        fn new() -> Self {
            let mut ids = IdGen::new();
            let player = Player::new(ids.next(), &PlayerTuning::default(), VIEW);
            Self {
                player,
                enemies: Vec::new(),
                player_shots: Pool::new(Projectile::idle, Projectile::recycle),
                enemy_shots: Pool::new(Projectile::idle, Projectile::recycle),
                particles: Pool::new(Particle::idle, Particle::recycle),
                powerups: Pool::new(PowerUp::idle, PowerUp::recycle),
                state: GameState::new(0, 0),
                tuning: Tuning::default(),
                rng: Pcg32::seed_from_u64(23),
                ids,
            }
        }

        fn add_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> EntityId {
            let table = EnemyTable::default();
            let stats = match kind {
                EnemyKind::Basic => &table.basic,
                EnemyKind::Fast => &table.fast,
                EnemyKind::Tank => &table.tank,
                EnemyKind::Boss => &table.boss,
            };
            let mut e = Enemy::spawn(self.ids.next(), kind, pos.x, stats, &mut self.rng);
            e.pos = pos;
            let id = e.id;
            self.enemies.push(e);
            id
        }

        fn add_player_shot(&mut self, kind: ProjectileKind, pos: Vec2, damage: i32) {
            let id = self.ids.next();
            let shot = self.player_shots.acquire();
            shot.id = id;
            shot.kind = kind;
            shot.pos = pos;
            shot.size = Vec2::new(4.0, 10.0);
            shot.damage = damage;
        }

        fn add_enemy_shot(&mut self, pos: Vec2) {
            let id = self.ids.next();
            let shot = self.enemy_shots.acquire();
            shot.id = id;
            shot.pos = pos;
            shot.size = Vec2::new(3.0, 6.0);
            shot.damage = 1;
        }

        fn resolve(&mut self) {
            resolve(
                &self.player,
                &mut self.enemies,
                &mut self.player_shots,
                &mut self.enemy_shots,
                &mut self.particles,
                &mut self.powerups,
                &mut self.state,
                &self.tuning,
                &mut self.rng,
                &mut self.ids,
                &mut NullAudio,
            );
        }
    }

    #[test]
    fn test_bullet_damages_and_is_consumed() {
        let mut w = World::new();
        w.add_enemy(EnemyKind::Basic, Vec2::new(100.0, 100.0));
        w.add_player_shot(ProjectileKind::Bullet, Vec2::new(110.0, 105.0), 1);

        w.resolve();

        assert_eq!(w.enemies[0].health, 1);
        assert!(!w.enemies[0].dying);
        assert_eq!(w.player_shots.len(), 0); // consumed and swept
        assert!(w.particles.len() > 0); // sparks flew
    }

    #[test]
    fn test_kill_scores_exactly_once() {
        let mut w = World::new();
        w.add_enemy(EnemyKind::Basic, Vec2::new(100.0, 100.0));
        // Two rockets, each lethal on its own
        w.add_player_shot(ProjectileKind::Rocket, Vec2::new(105.0, 105.0), 5);
        w.add_player_shot(ProjectileKind::Rocket, Vec2::new(110.0, 110.0), 5);

        w.resolve();

        // First rocket kills; the dying enemy is no longer targetable, so
        // the second rocket flies on and no second score is awarded.
        assert!(w.enemies[0].dying);
        assert_eq!(w.state.score, 100);
        assert_eq!(w.state.total_kills, 1);
        assert_eq!(w.state.combo, 1);
        assert_eq!(w.player_shots.len(), 1);
    }

    #[test]
    fn test_laser_persists_and_sweeps_multiple_enemies() {
        let mut w = World::new();
        w.add_enemy(EnemyKind::Basic, Vec2::new(100.0, 100.0));
        w.add_enemy(EnemyKind::Basic, Vec2::new(100.0, 300.0));

        let id = w.ids.next();
        let beam = w.player_shots.acquire();
        beam.id = id;
        beam.kind = ProjectileKind::Laser;
        beam.pos = Vec2::new(110.0, 0.0);
        beam.size = Vec2::new(10.0, VIEW.y);
        beam.damage = 15;
        beam.ttl_ms = 500.0;

        w.resolve();

        // One beam tick kills both basics (15 > 2 hp) and survives
        assert!(w.enemies.iter().all(|e| e.dying));
        assert_eq!(w.state.total_kills, 2);
        assert_eq!(w.player_shots.len(), 1);
    }

    #[test]
    fn test_boss_kill_shakes_and_always_drops() {
        let mut w = World::new();
        w.add_enemy(EnemyKind::Boss, Vec2::new(300.0, 100.0));
        w.add_player_shot(ProjectileKind::Laser, Vec2::new(330.0, 0.0), 999);
        w.player_shots.active_mut()[0].size = Vec2::new(10.0, VIEW.y);

        w.resolve();

        assert!(w.enemies[0].dying);
        assert_eq!(w.state.score, 1_000);
        assert_eq!(w.state.screen_shake, 1.0);
        assert_eq!(w.powerups.len(), 1); // guaranteed boss drop
    }

    #[test]
    fn test_ram_damages_player_and_removes_enemy() {
        let mut w = World::new();
        w.state.combo = 5;
        let pos = w.player.pos;
        w.add_enemy(EnemyKind::Fast, pos);

        w.resolve();

        assert_eq!(w.state.health, 2);
        assert_eq!(w.state.combo, 0);
        assert!(!w.enemies[0].active);
        assert!(!w.enemies[0].dying); // no death animation on contact kills
        assert_eq!(w.state.score, 0); // and no score
    }

    #[test]
    fn test_enemy_shot_hits_player() {
        let mut w = World::new();
        w.add_enemy_shot(w.player.pos + Vec2::new(5.0, 5.0));

        w.resolve();

        assert_eq!(w.state.health, 2);
        assert_eq!(w.enemy_shots.len(), 0);
    }

    #[test]
    fn test_shield_blocks_all_damage_sources() {
        let mut w = World::new();
        w.state.shield_ms = 1_000.0;
        w.state.combo = 3;
        let pos = w.player.pos;
        w.add_enemy(EnemyKind::Basic, pos);
        w.add_enemy_shot(pos + Vec2::new(5.0, 5.0));

        w.resolve();

        assert_eq!(w.state.health, 3);
        assert_eq!(w.state.combo, 3); // no unblocked damage, no reset
        // The round is still spent; the rammer passes through unharmed
        assert_eq!(w.enemy_shots.len(), 0);
        assert!(w.enemies[0].active);
    }

    #[test]
    fn test_lethal_ram_ends_the_game() {
        let mut w = World::new();
        w.state.health = 1;
        let pos = w.player.pos;
        w.add_enemy(EnemyKind::Basic, pos);

        w.resolve();

        assert_eq!(w.state.health, 0);
        assert_eq!(w.state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_pickup_effects() {
        let mut w = World::new();
        w.state.health = 2;
        w.state.energy = 50.0;

        for kind in [PowerUpKind::Health, PowerUpKind::Energy, PowerUpKind::ScoreBonus] {
            let id = w.ids.next();
            let center = w.player.center();
            let item = w.powerups.acquire();
            item.id = id;
            item.kind = kind;
            item.pos = center;
        }

        w.resolve();

        assert_eq!(w.state.health, 3);
        assert_eq!(w.state.energy, 75.0);
        assert_eq!(w.state.score, SCORE_PICKUP);
        assert_eq!(w.powerups.len(), 0);
    }

    #[test]
    fn test_health_pickup_caps_at_max() {
        let mut w = World::new();
        assert_eq!(w.state.health, MAX_HEALTH);
        let id = w.ids.next();
        let center = w.player.center();
        let item = w.powerups.acquire();
        item.id = id;
        item.kind = PowerUpKind::Health;
        item.pos = center;

        w.resolve();
        assert_eq!(w.state.health, MAX_HEALTH);
    }

    #[test]
    fn test_drop_weights_favor_health_when_hurting() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(29);

        let tally = |health: i32, rng: &mut Pcg32| {
            let mut health_drops = 0;
            for _ in 0..10_000 {
                if roll_drop_kind(health, &tuning, rng) == PowerUpKind::Health {
                    health_drops += 1;
                }
            }
            health_drops
        };

        let hurting = tally(1, &mut rng);
        let healthy = tally(3, &mut rng);
        // 50% weight vs 15% weight
        assert!(hurting > 4_000);
        assert!(healthy < 2_500);
    }
}
