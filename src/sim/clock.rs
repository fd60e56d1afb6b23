//! Session clock primitives
//!
//! The engine never assumes a scheduling primitive. The host drives
//! `tick()` from whatever it has (animation frame, OS timer, test loop);
//! these two timers turn caller-supplied clock readings into bounded
//! deltas and fixed-rate spawn firings. Both live as session fields, so
//! resetting or dropping the session cancels them - nothing can fire
//! after termination.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_TICK_DELTA_MS;

/// Measures the real elapsed time between position ticks.
///
/// Deltas are clamped to `[0, MAX_TICK_DELTA_MS]`: a negative delta
/// (clock skew) or a huge one (suspended tab) must not be applied
/// verbatim, or one tick would teleport every droplet past the floor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeltaClock {
    last_update_ms: f64,
}

impl DeltaClock {
    pub fn new(now_ms: f64) -> Self {
        Self {
            last_update_ms: now_ms,
        }
    }

    /// Elapsed milliseconds since the previous reading, clamped, and
    /// advance the baseline.
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        let raw = now_ms - self.last_update_ms;
        self.last_update_ms = now_ms;
        raw.clamp(0.0, MAX_TICK_DELTA_MS)
    }

    /// Reset the baseline without producing a delta. Called on resume so
    /// time spent paused is never simulated.
    pub fn resync(&mut self, now_ms: f64) {
        self.last_update_ms = now_ms;
    }
}

/// Fixed-rate spawn timer driven by the position tick's deltas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnTimer {
    interval_ms: f64,
    elapsed_ms: f64,
}

impl SpawnTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Make the next advance fire immediately (session start/reset spawns
    /// the first droplet right away).
    pub fn prime(&mut self) {
        self.elapsed_ms = self.interval_ms;
    }

    /// Zero the accumulated phase. Resuming from pause restarts the
    /// interval with no compensation for time paused.
    pub fn reset_phase(&mut self) {
        self.elapsed_ms = 0.0;
    }

    /// Accumulate a delta and return how many firings are due.
    ///
    /// With deltas clamped well below every spawn interval this is 0 or 1
    /// in practice; the loop handles the general case.
    pub fn advance(&mut self, delta_ms: f64) -> u32 {
        self.elapsed_ms += delta_ms;
        let mut fires = 0;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            fires += 1;
        }
        fires
    }
}
