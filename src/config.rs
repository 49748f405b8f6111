//! Data-driven game balance
//!
//! All gameplay numbers live in [`Tuning`]. `Default` carries the shipped
//! values; hosts may override them from JSON before constructing the engine.

use serde::{Deserialize, Serialize};

/// Player ship dimensions and movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Pixels per frame at the 60 Hz reference rate
    pub speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            speed: 5.0,
        }
    }
}

/// Ability cooldowns in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Cooldowns {
    pub shoot: f64,
    pub rocket: f64,
    pub smart_rocket: f64,
    pub laser: f64,
    pub shield: f64,
}

impl Default for Cooldowns {
    fn default() -> Self {
        Self {
            shoot: 150.0,
            rocket: 1_000.0,
            smart_rocket: 2_000.0,
            laser: 3_000.0,
            shield: 12_000.0,
        }
    }
}

/// Energy prices for the four powered abilities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyCosts {
    pub rocket: f32,
    pub smart_rocket: f32,
    pub laser: f32,
    pub shield: f32,
}

impl Default for EnergyCosts {
    fn default() -> Self {
        Self {
            rocket: 20.0,
            smart_rocket: 30.0,
            laser: 40.0,
            shield: 25.0,
        }
    }
}

/// Per-archetype enemy stats, fixed at spawn
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyStats {
    pub width: f32,
    pub height: f32,
    /// Spawn speed range, pixels per frame at 60 Hz
    pub speed_min: f32,
    pub speed_max: f32,
    pub health: i32,
    pub points: u32,
    /// Update ticks between shots (ignored for archetypes that never fire)
    pub shoot_interval: u32,
}

impl EnemyStats {
    const fn new(
        width: f32,
        height: f32,
        speed_min: f32,
        speed_max: f32,
        health: i32,
        points: u32,
        shoot_interval: u32,
    ) -> Self {
        Self {
            width,
            height,
            speed_min,
            speed_max,
            health,
            points,
            shoot_interval,
        }
    }
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self::new(30.0, 30.0, 1.0, 3.0, 2, 100, 120)
    }
}

/// Stat table for every enemy archetype
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    pub basic: EnemyStats,
    pub fast: EnemyStats,
    pub tank: EnemyStats,
    pub boss: EnemyStats,
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            basic: EnemyStats::new(30.0, 30.0, 1.0, 3.0, 2, 100, 120),
            fast: EnemyStats::new(30.0, 30.0, 3.0, 5.0, 1, 150, 120),
            tank: EnemyStats::new(40.0, 40.0, 0.5, 1.5, 5, 200, 120),
            boss: EnemyStats::new(80.0, 80.0, 1.0, 1.0, 50, 1_000, 60),
        }
    }
}

/// Power-up drop chances and type weights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DropTuning {
    /// Base drop chance on any kill
    pub base_chance: f32,
    /// Drop chance for tank kills
    pub tank_chance: f32,
    /// Drop chance for boss kills
    pub boss_chance: f32,
    /// (health, energy, score) weights while the player is hurting
    pub weights_low_health: [f32; 3],
    /// (health, energy, score) weights otherwise
    pub weights_normal: [f32; 3],
}

impl Default for DropTuning {
    fn default() -> Self {
        Self {
            base_chance: 0.12,
            tank_chance: 0.25,
            boss_chance: 1.0,
            weights_low_health: [0.5, 0.3, 0.2],
            weights_normal: [0.15, 0.45, 0.4],
        }
    }
}

/// Complete balance sheet for one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub cooldowns: Cooldowns,
    pub energy_costs: EnergyCosts,
    pub shield_duration_ms: f32,
    pub enemies: EnemyTable,
    pub drops: DropTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            cooldowns: Cooldowns::default(),
            energy_costs: EnergyCosts::default(),
            shield_duration_ms: 5_000.0,
            enemies: EnemyTable::default(),
            drops: DropTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse a host-supplied override; unknown fields fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
