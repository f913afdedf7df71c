//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed, tuning and sequence of
//! `(input, timestamp)` pairs the world evolves identically:
//! - Seeded RNG only
//! - Enemies and items updated in spawn order
//! - No rendering or platform dependencies

pub mod ambient;
pub mod autopilot;
pub mod combat;
pub mod effects;
pub mod geometry;
pub mod schedule;
pub mod spawner;
pub mod state;
pub mod tick;

pub use ambient::{Ambient, Leaf, RainDrop};
pub use combat::{StrikeKind, StrikePath, apply_deferred, enemy_strike, player_strike};
pub use effects::{Particle, Stain, StainBuffer};
pub use schedule::{Deferred, Scheduler};
pub use spawner::SpawnTimers;
pub use state::{
    CombatState, EnemyKind, Entity, GameEvent, GameState, GameStatus, Item, ItemKind, Role, Viewport,
};
pub use tick::{FrameClock, InputState, tick};
