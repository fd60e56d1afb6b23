//! Multiplication Rain - a falling-droplet times-table drill
//!
//! Core modules:
//! - `sim`: Deterministic session engine (droplet physics, scoring, state machine)
//! - `settings`: Player preferences with LocalStorage persistence
//! - `stats`: Aggregate statistics, high scores and badge unlocks
//! - `audio`: Discrete game-event sounds (Web Audio on wasm)

pub mod audio;
pub mod badges;
pub mod settings;
pub mod sim;
pub mod stats;

pub use settings::{InputMethod, Settings, Theme};
pub use stats::Statistics;

/// Game configuration constants
pub mod consts {
    /// Lowest times table a session can practice
    pub const MIN_STAGE: u8 = 2;
    /// Highest times table; clearing it in stage mode ends the session
    pub const MAX_STAGE: u8 = 9;
    /// Correct answers required to clear one stage
    pub const STAGE_CLEAR_REQUIREMENT: u32 = 10;

    /// Base points per correct answer
    pub const BASE_POINTS: u64 = 10;
    /// Flat bonus awarded on every stage clear
    pub const STAGE_CLEAR_BONUS: u64 = 200;
    /// Cap on the answer-latency bonus (points)
    pub const SPEED_BONUS_MAX: f64 = 5.0;

    /// Horizontal spawn band (percent of field width)
    pub const SPAWN_X_MIN: f32 = 5.0;
    pub const SPAWN_X_MAX: f32 = 95.0;
    /// Droplets start above the visible field
    pub const SPAWN_Y: f32 = -10.0;
    /// A droplet at or past this y has hit the floor
    pub const FLOOR_Y: f32 = 100.0;

    /// Target interval between position ticks (~60 Hz); the engine always
    /// measures the real elapsed delta rather than assuming this
    pub const FRAME_INTERVAL_MS: f64 = 16.0;
    /// Upper clamp on a single tick's delta. A suspended tab must not
    /// teleport every droplet past the floor in one tick.
    pub const MAX_TICK_DELTA_MS: f64 = 250.0;
}

/// Current wall-clock reading in milliseconds.
///
/// Host-side convenience only: the session engine never reads a clock
/// itself, every operation takes `now_ms` from the caller.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
