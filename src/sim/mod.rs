//! Deterministic simulation module
//!
//! All gameplay logic lives here. The module is pure with respect to its
//! inputs: a seeded RNG, a dt per tick, and the abstract input contract.
//! No rendering, audio or platform dependencies - those are traits the
//! host implements.

pub mod collision;
pub mod enemy;
pub mod engine;
pub mod entity;
pub mod particle;
pub mod player;
pub mod pool;
pub mod powerup;
pub mod projectile;
pub mod spawner;
pub mod starfield;
pub mod state;

pub use enemy::{Enemy, EnemyKind};
pub use engine::Engine;
pub use entity::{Aabb, EntityId, IdGen};
pub use particle::Particle;
pub use player::Player;
pub use pool::{Pool, Slot};
pub use powerup::{PowerUp, PowerUpKind};
pub use projectile::{Projectile, ProjectileKind};
pub use starfield::{Star, Starfield};
pub use state::{AbilityClock, GamePhase, GameState, kills_required};
