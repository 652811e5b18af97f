//! Audio cues using the Web Audio API
//!
//! Procedurally generated blips, no external files. The event-to-cue mapping
//! is host-independent; playback only exists in the browser build.

use crate::sim::{Bit, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run started
    Start,
    /// Player left the ground
    Jump,
    /// Touched a zero block
    ZeroHit,
    /// Touched a one block
    OneHit,
    /// Ones counter overflowed
    Overflow,
}

impl SoundEffect {
    /// Cue for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => Some(SoundEffect::Start),
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Collided(Bit::Zero) => Some(SoundEffect::ZeroHit),
            GameEvent::Collided(Bit::One) => Some(SoundEffect::OneHit),
            GameEvent::GameOver { .. } => Some(SoundEffect::Overflow),
            GameEvent::Banner(_) | GameEvent::Reset | GameEvent::Spawned(_) => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(muted: bool) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: 0.6,
                muted,
            }
        }

        /// Play the cue for every event that has one
        pub fn play_events(&self, events: &[GameEvent]) {
            for effect in events.iter().filter_map(SoundEffect::for_event) {
                self.play(effect);
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.muted || self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let vol = self.volume;
            match effect {
                SoundEffect::Start => self.play_start(ctx, vol),
                SoundEffect::Jump => self.play_jump(ctx, vol),
                SoundEffect::ZeroHit => self.play_zero(ctx, vol),
                SoundEffect::OneHit => self.play_one(ctx, vol),
                SoundEffect::Overflow => self.play_overflow(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short decaying tone, optionally sliding to `end_freq`
        fn blip(
            &self,
            ctx: &AudioContext,
            vol: f32,
            freq: f32,
            end_freq: f32,
            duration: f64,
            osc_type: OscillatorType,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();
            if end_freq != freq {
                osc.frequency().set_value_at_time(freq, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(end_freq, t + duration)
                    .ok();
            }

            osc.start().ok();
            osc.stop_with_when(t + duration + 0.05).ok();
        }

        /// Start - rising sweep
        fn play_start(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, vol * 0.3, 200.0, 600.0, 0.2, OscillatorType::Triangle);
        }

        /// Jump - quick chirp up
        fn play_jump(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, vol * 0.25, 300.0, 700.0, 0.1, OscillatorType::Square);
        }

        /// Zero - soft tick
        fn play_zero(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, vol * 0.3, 400.0, 400.0, 0.08, OscillatorType::Sine);
        }

        /// One - harsh buzz
        fn play_one(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, vol * 0.35, 120.0, 80.0, 0.15, OscillatorType::Sawtooth);
        }

        /// Overflow - descending crash
        fn play_overflow(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 300.0, 200.0, 100.0].iter().enumerate() {
                let delay = i as f64 * 0.15;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sawtooth) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }
    }
}
