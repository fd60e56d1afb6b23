//! Game-event sounds
//!
//! The session engine only emits [`GameEvent`]s; this module maps them to
//! discrete sound effects and, on wasm, renders them with procedurally
//! generated Web Audio oscillators - no external files needed.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Answer matched a droplet
    Correct,
    /// Answer matched nothing
    Wrong,
    /// Combo tier reached
    Combo,
    /// Droplet hit the floor
    Drop,
    /// Stage cleared
    StageClear,
    /// Session ended
    GameOver,
}

impl SoundEffect {
    /// Effect for a drained game event, if the event is audible
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Correct => Some(SoundEffect::Correct),
            GameEvent::Wrong => Some(SoundEffect::Wrong),
            GameEvent::ComboTier(_) => Some(SoundEffect::Combo),
            GameEvent::Dropped => Some(SoundEffect::Drop),
            GameEvent::StageClear(_) => Some(SoundEffect::StageClear),
            GameEvent::SessionEnded => Some(SoundEffect::GameOver),
        }
    }
}

/// Audio manager rendering effects through the Web Audio API
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<web_sys::AudioContext>,
    volume: f32,
}

#[cfg(target_arch = "wasm32")]
impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = web_sys::AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 0.7 }
    }

    /// Set effect volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let vol = self.volume;
        match effect {
            SoundEffect::Correct => self.play_correct(ctx, vol),
            SoundEffect::Wrong => self.play_wrong(ctx, vol),
            SoundEffect::Combo => self.play_combo(ctx, vol),
            SoundEffect::Drop => self.play_drop(ctx, vol),
            SoundEffect::StageClear => self.play_stage_clear(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &web_sys::AudioContext,
        freq: f32,
        osc_type: web_sys::OscillatorType,
    ) -> Option<(web_sys::OscillatorNode, web_sys::GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Correct answer - bright rising chime
    fn play_correct(&self, ctx: &web_sys::AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 660.0, web_sys::OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency().set_value_at_time(660.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(990.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.25).ok();
    }

    /// Wrong answer - dull descending buzz
    fn play_wrong(&self, ctx: &web_sys::AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, web_sys::OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.25)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Combo tier - quick two-note fanfare
    fn play_combo(&self, ctx: &web_sys::AudioContext, vol: f32) {
        for (i, freq) in [880.0, 1320.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, web_sys::OscillatorType::Triangle)
            else {
                return;
            };
            let t = ctx.current_time() + i as f64 * 0.08;

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.18).ok();
        }
    }

    /// Droplet hit the floor - low splash
    fn play_drop(&self, ctx: &web_sys::AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 180.0, web_sys::OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(180.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Stage clear - ascending arpeggio
    fn play_stage_clear(&self, ctx: &web_sys::AudioContext, vol: f32) {
        for (i, freq) in [523.0, 659.0, 784.0, 1047.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, web_sys::OscillatorType::Sine)
            else {
                return;
            };
            let t = ctx.current_time() + i as f64 * 0.12;

            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.3).ok();
        }
    }

    /// Game over - slow falling tone
    fn play_game_over(&self, ctx: &web_sys::AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 440.0, web_sys::OscillatorType::Sawtooth)
        else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.8)
            .ok();
        osc.frequency().set_value_at_time(440.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.8)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.9).ok();
    }
}
