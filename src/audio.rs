//! Audio cues using the Web Audio API
//!
//! Two short synthesized tones, no audio files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Coin leaves the hand - rising chirp
    Flip,
    /// Coin lands - short low tap
    Land,
}

/// Audio manager for the widget
pub struct AudioManager {
    ctx: Option<AudioContext>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    /// Create the manager. The context itself is created lazily on the
    /// first sound, since browsers only allow it after a user gesture.
    pub fn new() -> Self {
        Self { ctx: None }
    }

    fn context(&mut self) -> Option<&AudioContext> {
        if self.ctx.is_none() {
            self.ctx = AudioContext::new().ok();
            if self.ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
                return None;
            }
        }
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let Some(ctx) = self.context() else { return };

        match effect {
            SoundEffect::Flip => play_flip(ctx),
            SoundEffect::Land => play_land(ctx),
        }
    }
}

/// Create a sine oscillator routed through a gain node
fn create_osc(ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(OscillatorType::Sine);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

fn play_flip(ctx: &AudioContext) {
    let Some((osc, gain)) = create_osc(ctx, 400.0) else {
        return;
    };
    let t = ctx.current_time();

    osc.frequency().set_value_at_time(400.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(800.0, t + 0.1)
        .ok();
    gain.gain().set_value_at_time(0.1, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.1)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.1).ok();
}

fn play_land(ctx: &AudioContext) {
    let Some((osc, gain)) = create_osc(ctx, 200.0) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(0.15, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.05)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.05).ok();
}
