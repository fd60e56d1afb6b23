//! Deterministic session engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied clock readings only (no internal `Date::now`)
//! - Seeded RNG owned by the session
//! - Stable droplet order (insertion order, oldest first)
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod droplet;
pub mod problem;
pub mod score;
pub mod state;
pub mod tick;

pub use clock::{DeltaClock, SpawnTimer};
pub use droplet::{Droplet, advance, partition_dropped, take_match};
pub use problem::Problem;
pub use score::{combo_bonus, score_for, speed_bonus};
pub use state::{
    Difficulty, DifficultyConfig, GameEvent, GameMode, GameSession, SessionSummary,
};
pub use tick::tick;
