//! Game state snapshot and phase machine
//!
//! [`GameState`] is the externally visible scoreboard: every field is only
//! mutated inside the update phase, and consumers receive clones, never
//! references. The phase machine is
//! `Idle → Playing ⇄ Paused`, `Playing → WaveTransition → Playing`,
//! `Playing → GameOver → (restart) → Playing`.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ENERGY, MAX_HEALTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed but not started
    Idle,
    Playing,
    Paused,
    /// Rest period between waves; projectiles already in flight keep going
    WaveTransition,
    /// Terminal until restart
    GameOver,
}

/// Sim-clock timestamps of the last use of each ability (ms). Cooldowns are
/// `now - last_used >= cooldown`; a sentinel far in the past makes every
/// ability available at session start.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AbilityClock {
    pub shoot: f64,
    pub rocket: f64,
    pub smart_rocket: f64,
    pub laser: f64,
    pub shield: f64,
}

impl Default for AbilityClock {
    fn default() -> Self {
        let never = f64::MIN;
        Self {
            shoot: never,
            rocket: never,
            smart_rocket: never,
            laser: never,
            shield: never,
        }
    }
}

/// Read-only scoreboard snapshot exposed to the host UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub seed: u64,
    pub score: u32,
    /// 0..=3
    pub health: i32,
    /// 0.0..=100.0, regenerates over time
    pub energy: f32,
    pub wave: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub total_kills: u32,
    pub wave_kills: u32,
    pub wave_kills_required: u32,
    pub phase: GamePhase,
    /// Remaining wave-transition time (ms); 0 outside transitions
    pub wave_countdown_ms: f32,
    pub boss_active: bool,
    pub boss_health: i32,
    pub boss_max_health: i32,
    pub high_score: u32,
    /// Remaining shield time (ms); the shield gate is `shield_ms > 0`
    pub shield_ms: f32,
    /// Decaying camera-shake magnitude for the renderer
    pub screen_shake: f32,
    pub last_used: AbilityClock,
    pub time_survived_ms: f64,
}

impl GameState {
    pub fn new(seed: u64, high_score: u32) -> Self {
        Self {
            seed,
            score: 0,
            health: MAX_HEALTH,
            energy: MAX_ENERGY,
            wave: 1,
            combo: 0,
            max_combo: 0,
            total_kills: 0,
            wave_kills: 0,
            wave_kills_required: kills_required(1),
            phase: GamePhase::Idle,
            wave_countdown_ms: 0.0,
            boss_active: false,
            boss_health: 0,
            boss_max_health: 0,
            high_score,
            shield_ms: 0.0,
            screen_shake: 0.0,
            last_used: AbilityClock::default(),
            time_survived_ms: 0.0,
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn is_wave_transition(&self) -> bool {
        self.phase == GamePhase::WaveTransition
    }

    #[inline]
    pub fn shield_active(&self) -> bool {
        self.shield_ms > 0.0
    }

    /// Whole seconds left on the wave countdown (3, 2, 1 for the HUD)
    pub fn wave_countdown_secs(&self) -> u32 {
        (self.wave_countdown_ms / 1_000.0).ceil() as u32
    }

    /// Register a kill: scoring, combo and wave bookkeeping
    pub(crate) fn record_kill(&mut self, points: u32) {
        self.score += points;
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.total_kills += 1;
        self.wave_kills += 1;
    }

    /// Register an unblocked player damage event. Health never goes below
    /// zero even if several hits land in the same tick.
    pub(crate) fn record_player_hit(&mut self) {
        self.health = (self.health - 1).max(0);
        self.combo = 0;
        self.screen_shake = 1.0;
        if self.health == 0 {
            self.phase = GamePhase::GameOver;
        }
    }
}

/// Kills needed to clear the given wave; strictly increasing in `wave`
#[inline]
pub fn kills_required(wave: u32) -> u32 {
    8 + wave * 3
}
