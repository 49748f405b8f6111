//! Galactic Defender - a wave-survival arcade shooter simulation engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, pools, collisions, waves)
//! - `input`: Abstract action-query contract for the host's input layer
//! - `render`: Read-only scene-visitor contract for the host's renderer
//! - `audio`: Fire-and-forget sound event contract
//! - `highscore`: Best-effort high score persistence
//! - `config`: Data-driven game balance

pub mod audio;
pub mod config;
pub mod highscore;
pub mod input;
pub mod render;
pub mod sim;

pub use audio::{AudioEvent, AudioSink, NullAudio};
pub use config::Tuning;
pub use highscore::{HighScoreStore, JsonFileStore, MemoryStore};
pub use input::{Action, InputSource, InputState};
pub use sim::{Engine, GamePhase, GameState};

/// Game configuration constants
pub mod consts {
    /// Maximum dt fed into one simulation step, to avoid catastrophic
    /// integration after a host stall (ms)
    pub const MAX_DT_MS: f32 = 50.0;
    /// Reference frame length the legacy per-frame speeds were tuned at (ms)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Margin past the viewport edge before a projectile is culled
    pub const CULL_MARGIN: f32 = 50.0;
    /// Margin past the bottom edge before an enemy or power-up despawns
    pub const DESPAWN_MARGIN: f32 = 50.0;
    /// Enemies hold fire until they have descended this far into the view
    pub const SHOOT_MIN_Y: f32 = 20.0;

    /// Death animation length before a killed enemy is reclaimed (ms)
    pub const DEATH_ANIM_MS: f32 = 200.0;
    /// Rest period between waves (ms)
    pub const WAVE_TRANSITION_MS: f32 = 3_000.0;

    /// Radius within which a power-up drifts toward the player
    pub const ATTRACT_RADIUS: f32 = 80.0;

    /// Energy regeneration per millisecond (0.1 per frame at 60 Hz)
    pub const ENERGY_REGEN_PER_MS: f32 = 0.1 * 60.0 / 1000.0;
    /// Energy and health caps
    pub const MAX_ENERGY: f32 = 100.0;
    pub const MAX_HEALTH: i32 = 3;
}

/// Convert a legacy per-frame speed (pixels/frame at 60 Hz) to pixels/ms
#[inline]
pub fn px_per_ms(speed_per_frame: f32) -> f32 {
    speed_per_frame * 60.0 / 1000.0
}
