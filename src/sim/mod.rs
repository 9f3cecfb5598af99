//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One grid step per logic tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod queue;
pub mod state;
pub mod tick;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use queue::DirectionQueue;
pub use state::{Collision, Direction, GamePhase, GameState, Position};
pub use tick::{TickEvent, tick};
