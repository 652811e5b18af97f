//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use spawner::Spawner;
pub use state::{Banner, Bit, EndReason, GameEvent, GameState, Obstacle, Player, RunState, Status};
pub use tick::update;
