//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{Aabb, coin_aabb, obstacle_aabb, player_aabb};
pub use state::{Coin, GamePhase, GameState, Obstacle, Player, Wave};
pub use tick::{TickInput, tick};
pub use wave::{create_wave, recycle, spawn_initial};
