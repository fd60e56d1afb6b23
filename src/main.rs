//! Multiplication Rain entry point
//!
//! The web host drives the session from the browser's frame loop; the
//! native binary runs a headless autoplay demo to exercise the engine.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Multiplication Rain engine loaded");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Multiplication Rain (native) - headless autoplay demo");

    run_autoplay();
}

/// Drive a full challenge session on a simulated 60 Hz clock, answering
/// droplets that fall past mid-field and deliberately fumbling every
/// eighth answer. Shows the engine runs under any scheduler that can
/// supply elapsed time.
#[cfg(not(target_arch = "wasm32"))]
fn run_autoplay() {
    use multiplication_rain::audio::SoundEffect;
    use multiplication_rain::consts::FRAME_INTERVAL_MS;
    use multiplication_rain::sim::{Difficulty, GameMode, GameSession, tick};
    use multiplication_rain::stats::Statistics;

    let seed = multiplication_rain::now_ms() as u64;
    let mut session = GameSession::new(seed);
    session.start(GameMode::Challenge, 2, Difficulty::Hard, 0.0);

    let mut now = 0.0;
    let mut attempts: u32 = 0;
    while session.mode != GameMode::Result && now < 120_000.0 {
        now += FRAME_INTERVAL_MS;
        tick(&mut session, now);

        // Answer the oldest droplet once it falls past mid-field
        if let Some(d) = session.droplets().iter().find(|d| d.pos.y > 50.0) {
            attempts += 1;
            let answer = if attempts % 8 == 0 {
                // Fumble: off by one
                d.problem.answer() + 1
            } else {
                d.problem.answer()
            };
            session.submit_answer(answer, now);
        }

        for event in session.take_events() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                log::debug!("event {event:?} -> sound {effect:?}");
            }
        }
    }

    let summary = session.summary();
    let mut stats = Statistics::load();
    let unlocked = stats.record_session(&summary);
    stats.save();

    println!(
        "played {:.1}s: score {} | correct {} wrong {} | max combo {} | lives {}",
        now / 1000.0,
        summary.score,
        summary.correct_count,
        summary.wrong_count,
        summary.max_combo,
        session.lives,
    );
    if !unlocked.is_empty() {
        println!("badges unlocked: {}", unlocked.join(", "));
    }
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("summary serialization failed: {err}"),
    }
}
