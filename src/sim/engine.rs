//! The simulation engine
//!
//! Owns the player, the enemy list, every pool and the RNG, and advances
//! them in a strict per-tick sequence: player → abilities → enemies →
//! director → projectiles → particles → power-ups → collision resolution →
//! wave bookkeeping. Single-threaded by design; the draw pass reads the
//! same data through [`SceneView`] without mutating anything.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioEvent, AudioSink, NullAudio};
use crate::config::Tuning;
use crate::consts::{ENERGY_REGEN_PER_MS, MAX_DT_MS, MAX_ENERGY, WAVE_TRANSITION_MS};
use crate::highscore::{HighScoreStore, MemoryStore};
use crate::input::{Action, InputSource};
use crate::render::SceneView;
use crate::sim::collision;
use crate::sim::enemy::{Enemy, EnemyKind};
use crate::sim::entity::IdGen;
use crate::sim::particle::Particle;
use crate::sim::player::Player;
use crate::sim::pool::Pool;
use crate::sim::powerup::PowerUp;
use crate::sim::projectile::{Projectile, ProjectileKind};
use crate::sim::spawner;
use crate::sim::starfield::Starfield;
use crate::sim::state::{GamePhase, GameState, kills_required};

// Player weapon stats (width, height, speed px/frame, damage)
const BULLET: (f32, f32, f32, i32) = (4.0, 10.0, 8.0, 1);
const ROCKET: (f32, f32, f32, i32) = (6.0, 15.0, 6.0, 5);
const SMART_ROCKET: (f32, f32, f32, i32) = (6.0, 15.0, 4.0, 8);
const LASER_WIDTH: f32 = 10.0;
const LASER_DAMAGE: i32 = 15;
const LASER_DURATION_MS: f32 = 500.0;

// Enemy weapon stats
const ENEMY_SHOT: (f32, f32, f32) = (3.0, 6.0, 2.0);
const BOSS_SHOT: (f32, f32, f32) = (4.0, 8.0, 3.0);
/// Horizontal offsets of the boss's three-shot volley
const BOSS_VOLLEY_OFFSETS: [f32; 3] = [-20.0, 0.0, 20.0];

/// A shot queued while iterating enemies, released afterwards
struct PendingShot {
    pos: Vec2,
    size: Vec2,
    speed: f32,
    vel: Vec2,
}

pub struct Engine {
    tuning: Tuning,
    view: Vec2,
    seed: u64,
    rng: Pcg32,
    ids: IdGen,
    state: GameState,
    player: Player,
    enemies: Vec<Enemy>,
    player_shots: Pool<Projectile>,
    enemy_shots: Pool<Projectile>,
    particles: Pool<Particle>,
    powerups: Pool<PowerUp>,
    starfield: Starfield,
    audio: Box<dyn AudioSink>,
    store: Box<dyn HighScoreStore>,
    /// Edge detection for the pause action
    pause_held: bool,
    /// Phase to return to when unpausing
    resume_phase: GamePhase,
}

impl Engine {
    /// Build an engine for the given viewport. The session does not tick
    /// until [`Engine::start`] is called.
    pub fn new(view_w: f32, view_h: f32, seed: u64) -> Self {
        let view = Vec2::new(view_w, view_h);
        let tuning = Tuning::default();
        let mut ids = IdGen::new();
        let player = Player::new(ids.next(), &tuning.player, view);
        Self {
            view,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ids,
            state: GameState::new(seed, 0),
            player,
            enemies: Vec::new(),
            player_shots: Pool::new(Projectile::idle, Projectile::recycle),
            enemy_shots: Pool::new(Projectile::idle, Projectile::recycle),
            particles: Pool::new(Particle::idle, Particle::recycle),
            powerups: Pool::new(PowerUp::idle, PowerUp::recycle),
            starfield: Starfield::new(view, seed ^ 0x5f37_59df),
            audio: Box::new(NullAudio),
            store: Box::new(MemoryStore::new()),
            pause_held: false,
            resume_phase: GamePhase::Playing,
            tuning,
        }
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.player = Player::new(self.player.id, &tuning.player, self.view);
        self.tuning = tuning;
        self
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_store(mut self, store: Box<dyn HighScoreStore>) -> Self {
        self.store = store;
        self
    }

    /// Reset every pool and entity and begin ticking
    pub fn start(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.enemies.clear();
        self.player_shots.clear();
        self.enemy_shots.clear();
        self.particles.clear();
        self.powerups.clear();

        self.player = Player::new(self.ids.next(), &self.tuning.player, self.view);

        let high_score = self.store.load();
        self.state = GameState::new(self.seed, high_score);
        self.state.phase = GamePhase::Playing;
        self.pause_held = false;

        log::info!("session started (seed {}, high score {high_score})", self.seed);
    }

    /// Equivalent to a fresh [`Engine::start`]
    pub fn restart(&mut self) {
        self.start();
    }

    /// Halt the session; the host stops scheduling ticks
    pub fn stop(&mut self) {
        self.state.phase = GamePhase::Idle;
    }

    /// Flip Playing ⇄ Paused. Ignored once the run has ended.
    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Playing | GamePhase::WaveTransition => {
                self.resume_phase = self.state.phase;
                self.state.phase = GamePhase::Paused;
            }
            GamePhase::Paused => self.state.phase = self.resume_phase,
            GamePhase::Idle | GamePhase::GameOver => {}
        }
    }

    /// Read-only scoreboard
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Immutable copy for the host UI, safe to hold across ticks
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Advance the simulation by `dt` milliseconds
    pub fn update(&mut self, dt: f32, input: &dyn InputSource) {
        // A stalled host hands us one huge dt; clamp rather than teleport
        let dt = dt.clamp(0.0, MAX_DT_MS);

        // Background keeps animating in every phase
        self.starfield.update(dt);

        let pause_pressed = input.is_pressed(Action::Pause);
        if pause_pressed && !self.pause_held {
            self.toggle_pause();
        }
        self.pause_held = pause_pressed;

        match self.state.phase {
            GamePhase::Playing | GamePhase::WaveTransition => {}
            GamePhase::Idle | GamePhase::Paused | GamePhase::GameOver => return,
        }

        self.state.time_survived_ms += dt as f64;

        self.state.screen_shake *= 0.9;
        if self.state.screen_shake < 0.01 {
            self.state.screen_shake = 0.0;
        }

        self.state.energy = (self.state.energy + ENERGY_REGEN_PER_MS * dt).min(MAX_ENERGY);
        self.state.shield_ms = (self.state.shield_ms - dt).max(0.0);

        self.player.update(dt, input, self.view);
        self.handle_abilities(input);

        match self.state.phase {
            GamePhase::Playing => {
                self.update_enemies(dt);
                if let Some(enemy) =
                    spawner::try_spawn(&self.state, &self.tuning, &mut self.rng, &mut self.ids, self.view)
                {
                    if enemy.kind == EnemyKind::Boss {
                        self.state.boss_active = true;
                        self.state.boss_max_health = enemy.max_health;
                        log::info!("boss incoming on wave {}", self.state.wave);
                    }
                    self.enemies.push(enemy);
                }
            }
            GamePhase::WaveTransition => {
                // Spawning, enemy movement and enemy fire are suspended;
                // death animations still play out.
                for enemy in &mut self.enemies {
                    enemy.advance_death(dt);
                }
                self.enemies.retain(|e| e.active);

                self.state.wave_countdown_ms = (self.state.wave_countdown_ms - dt).max(0.0);
                if self.state.wave_countdown_ms <= 0.0 {
                    self.state.phase = GamePhase::Playing;
                    log::info!("wave {} begins", self.state.wave);
                }
            }
            _ => {}
        }

        self.update_projectiles(dt);

        for p in self.particles.active_mut() {
            p.update(dt);
        }
        self.particles.sweep();

        let player_center = self.player.center();
        for item in self.powerups.active_mut() {
            item.update(dt, player_center, self.view);
        }
        self.powerups.sweep();

        collision::resolve(
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
            &mut *self.audio,
        );

        self.refresh_boss_status();

        if self.state.is_game_over() {
            self.on_game_over();
            return;
        }

        if self.state.phase == GamePhase::Playing
            && self.state.wave_kills >= self.state.wave_kills_required
        {
            self.advance_wave();
        }
    }

    /// Walk every active entity in the fixed draw order
    pub fn render(&self, scene: &mut dyn SceneView) {
        for (layer, stars) in self.starfield.layers().iter().enumerate() {
            for star in stars {
                scene.star(layer, star);
            }
        }

        if self.state.shield_active() {
            scene.shield_fx(
                self.player.center(),
                self.player.size.x * 0.8,
                self.state.shield_ms,
            );
        }

        match self.state.phase {
            GamePhase::Idle | GamePhase::GameOver => {}
            _ => scene.player(&self.player),
        }

        for shot in self.player_shots.active() {
            scene.player_shot(shot);
        }
        for shot in self.enemy_shots.active() {
            scene.enemy_shot(shot);
        }
        for enemy in self.enemies.iter().filter(|e| e.active) {
            scene.enemy(enemy);
        }
        for item in self.powerups.active() {
            scene.powerup(item);
        }
        for particle in self.particles.active() {
            scene.particle(particle);
        }

        scene.post_fx(self.state.screen_shake);
    }

    fn update_enemies(&mut self, dt: f32) {
        let player_center = self.player.center();
        let mut pending: Vec<PendingShot> = Vec::new();

        for enemy in &mut self.enemies {
            enemy.update(dt, player_center.x, self.view);

            if !enemy.tick_shoot_timer() {
                continue;
            }

            if enemy.kind == EnemyKind::Boss {
                for offset in BOSS_VOLLEY_OFFSETS {
                    let (w, h, speed) = BOSS_SHOT;
                    pending.push(PendingShot {
                        pos: Vec2::new(
                            enemy.center().x + offset - w / 2.0,
                            enemy.pos.y + enemy.size.y,
                        ),
                        size: Vec2::new(w, h),
                        speed,
                        vel: Vec2::new(0.0, 1.0),
                    });
                }
            } else {
                let (w, h, speed) = ENEMY_SHOT;
                let muzzle = Vec2::new(enemy.center().x - w / 2.0, enemy.pos.y + enemy.size.y);
                let aim = (player_center - muzzle).normalize_or_zero();
                pending.push(PendingShot {
                    pos: muzzle,
                    size: Vec2::new(w, h),
                    speed,
                    vel: if aim == Vec2::ZERO { Vec2::new(0.0, 1.0) } else { aim },
                });
            }
        }

        self.enemies.retain(|e| e.active);

        for shot in pending {
            let id = self.ids.next();
            let p = self.enemy_shots.acquire();
            p.id = id;
            p.kind = ProjectileKind::Bullet;
            p.pos = shot.pos;
            p.size = shot.size;
            p.speed = shot.speed;
            p.damage = 1;
            p.vel = shot.vel;
        }
    }

    fn update_projectiles(&mut self, dt: f32) {
        let enemies = &self.enemies;
        for shot in self.player_shots.active_mut() {
            shot.update(dt, enemies);
            if shot.is_off_view(self.view) {
                shot.active = false;
            }
        }
        self.player_shots.sweep();

        for shot in self.enemy_shots.active_mut() {
            shot.update(dt, &[]);
            if shot.is_off_view(self.view) {
                shot.active = false;
            }
        }
        self.enemy_shots.sweep();
    }

    fn handle_abilities(&mut self, input: &dyn InputSource) {
        let now = self.state.time_survived_ms;
        let cd = self.tuning.cooldowns.clone();
        let costs = self.tuning.energy_costs.clone();

        if input.is_pressed(Action::Shoot) && now - self.state.last_used.shoot >= cd.shoot {
            self.state.last_used.shoot = now;
            let (w, h, speed, damage) = BULLET;
            let pos = Vec2::new(self.player.center().x - w / 2.0, self.player.pos.y);
            self.spawn_player_shot(ProjectileKind::Bullet, pos, Vec2::new(w, h), speed, damage, None);
            self.audio.play(AudioEvent::Shoot);
        }

        if input.is_pressed(Action::Skill1)
            && now - self.state.last_used.rocket >= cd.rocket
            && self.state.energy >= costs.rocket
        {
            self.state.last_used.rocket = now;
            self.state.energy -= costs.rocket;
            let (w, h, speed, damage) = ROCKET;
            let pos = Vec2::new(self.player.center().x - w / 2.0, self.player.pos.y);
            self.spawn_player_shot(ProjectileKind::Rocket, pos, Vec2::new(w, h), speed, damage, None);
            self.audio.play(AudioEvent::Rocket);
        }

        if input.is_pressed(Action::Skill2)
            && now - self.state.last_used.smart_rocket >= cd.smart_rocket
            && self.state.energy >= costs.smart_rocket
        {
            self.state.last_used.smart_rocket = now;
            self.state.energy -= costs.smart_rocket;

            // Lock onto whatever is closest right now; launching with no
            // target is fine, the rocket just flies straight.
            let player_center = self.player.center();
            let target = self
                .enemies
                .iter()
                .filter(|e| e.is_targetable())
                .min_by(|a, b| {
                    let da = (a.center() - player_center).length_squared();
                    let db = (b.center() - player_center).length_squared();
                    da.total_cmp(&db)
                })
                .map(|e| e.id);

            let (w, h, speed, damage) = SMART_ROCKET;
            let pos = Vec2::new(player_center.x - w / 2.0, self.player.pos.y);
            self.spawn_player_shot(
                ProjectileKind::SmartRocket,
                pos,
                Vec2::new(w, h),
                speed,
                damage,
                target,
            );
            self.audio.play(AudioEvent::Homing);
        }

        if input.is_pressed(Action::Skill3)
            && now - self.state.last_used.laser >= cd.laser
            && self.state.energy >= costs.laser
        {
            self.state.last_used.laser = now;
            self.state.energy -= costs.laser;

            let pos = Vec2::new(self.player.center().x - LASER_WIDTH / 2.0, 0.0);
            let id = self.ids.next();
            let beam = self.player_shots.acquire();
            beam.id = id;
            beam.kind = ProjectileKind::Laser;
            beam.pos = pos;
            beam.size = Vec2::new(LASER_WIDTH, self.view.y);
            beam.speed = 0.0;
            beam.damage = LASER_DAMAGE;
            beam.ttl_ms = LASER_DURATION_MS;
            self.audio.play(AudioEvent::Shoot);
        }

        if input.is_pressed(Action::Shield)
            && now - self.state.last_used.shield >= cd.shield
            && self.state.energy >= costs.shield
        {
            self.state.last_used.shield = now;
            self.state.energy -= costs.shield;
            self.state.shield_ms = self.tuning.shield_duration_ms;
            self.audio.play(AudioEvent::Shield);
        }
    }

    fn spawn_player_shot(
        &mut self,
        kind: ProjectileKind,
        pos: Vec2,
        size: Vec2,
        speed: f32,
        damage: i32,
        target: Option<crate::sim::entity::EntityId>,
    ) {
        let id = self.ids.next();
        let p = self.player_shots.acquire();
        p.id = id;
        p.kind = kind;
        p.pos = pos;
        p.size = size;
        p.speed = speed;
        p.damage = damage;
        p.target = target;
    }

    /// Mirror the surviving boss (if any) into the snapshot for the HUD
    fn refresh_boss_status(&mut self) {
        match self
            .enemies
            .iter()
            .find(|e| e.kind == EnemyKind::Boss && e.is_targetable())
        {
            Some(boss) => {
                self.state.boss_active = true;
                self.state.boss_health = boss.health;
                self.state.boss_max_health = boss.max_health;
            }
            None => {
                self.state.boss_active = false;
                self.state.boss_health = 0;
            }
        }
    }

    fn advance_wave(&mut self) {
        self.state.wave += 1;
        self.state.wave_kills = 0;
        self.state.wave_kills_required = kills_required(self.state.wave);
        self.state.wave_countdown_ms = WAVE_TRANSITION_MS;
        self.state.phase = GamePhase::WaveTransition;
        self.audio.play(AudioEvent::WaveClear);
        log::info!(
            "wave cleared; wave {} needs {} kills",
            self.state.wave,
            self.state.wave_kills_required
        );
    }

    fn on_game_over(&mut self) {
        self.audio.play(AudioEvent::GameOver);
        if self.state.score > self.state.high_score {
            self.state.high_score = self.state.score;
            self.store.save(self.state.high_score);
            log::info!("new high score: {}", self.state.high_score);
        }
        log::info!(
            "game over: score {} wave {} kills {} survived {:.1}s",
            self.state.score,
            self.state.wave,
            self.state.total_kills,
            self.state.time_survived_ms / 1_000.0
        );
    }
}
