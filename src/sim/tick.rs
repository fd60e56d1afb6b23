//! Position tick
//!
//! Advances the falling droplets by the real elapsed time, reaps floor
//! hits, applies life loss and termination, then lets the spawn timer
//! fire. One call per host frame; the host supplies the clock reading.

use super::droplet;
use super::state::{GameEvent, GameSession};

/// Advance the session by one frame.
///
/// Suspended (no-op) while paused or in menu/result, so a terminal
/// session can never be mutated by a stray late tick. Within one call,
/// advancement and reaping complete before any later `submit_answer`
/// can observe the droplet set.
pub fn tick(session: &mut GameSession, now_ms: f64) {
    if !session.is_running() {
        return;
    }

    let delta_ms = session.clock.delta(now_ms);

    let advanced = droplet::advance(std::mem::take(&mut session.droplets), delta_ms);
    let (remaining, dropped) = droplet::partition_dropped(advanced);
    session.droplets = remaining;

    if !dropped.is_empty() {
        session.combo = 0;
        session.lives = session.lives.saturating_sub(dropped.len() as u8);
        for d in dropped {
            session.missed_problems.push(d.problem);
            session.push_event(GameEvent::Dropped);
        }
        if session.lives == 0 {
            // Terminal in the same tick; the spawn timer never fires again
            session.finish(now_ms);
            return;
        }
    }

    let fires = session.spawn_timer.advance(delta_ms);
    for _ in 0..fires {
        session.try_spawn(now_ms);
    }
}
