//! Scoring engine
//!
//! A correct answer earns base points plus a combo-tier bonus plus an
//! answer-latency bonus. Pure given its inputs; the clock reading comes
//! from the caller.

use crate::consts::{BASE_POINTS, SPEED_BONUS_MAX};

/// Combo tiers, highest first. Only the single highest applicable tier
/// applies; tiers never stack.
const COMBO_TIERS: [(u32, u64); 3] = [(15, 100), (10, 50), (5, 20)];

/// Bonus for the current consecutive-correct streak
pub fn combo_bonus(combo: u32) -> u64 {
    COMBO_TIERS
        .iter()
        .find(|(threshold, _)| combo >= *threshold)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0)
}

/// Bonus for answering quickly: `floor(clamp(5 - elapsed_secs, 0, 5))`.
/// Each elapsed second shaves a point; anything past five seconds earns
/// nothing.
pub fn speed_bonus(created_at_ms: f64, now_ms: f64) -> u64 {
    let elapsed_secs = (now_ms - created_at_ms) / 1000.0;
    (SPEED_BONUS_MAX - elapsed_secs).clamp(0.0, SPEED_BONUS_MAX).floor() as u64
}

/// Total award for one correct answer
pub fn score_for(base: u64, combo: u32, created_at_ms: f64, now_ms: f64) -> u64 {
    base + combo_bonus(combo) + speed_bonus(created_at_ms, now_ms)
}

/// Standard award with the default base points
pub fn award(combo: u32, created_at_ms: f64, now_ms: f64) -> u64 {
    score_for(BASE_POINTS, combo, created_at_ms, now_ms)
}
