//! Audio output using the Web Audio API
//!
//! Effects are synthesized with oscillators, no sample files. The music
//! tracks would need decoded buffers, so until those ship they are no-ops;
//! the simulation keeps emitting play/stop events either way. On native
//! builds the whole manager is a logging stub.

use crate::settings::SoundSettings;
use crate::sim::Sound;

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    settings: SoundSettings,
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new(settings: SoundSettings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, settings }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(settings: SoundSettings) -> Self {
        Self { settings }
    }

    pub fn set_settings(&mut self, settings: SoundSettings) {
        self.settings = settings;
    }

    /// Resume the audio context (required after the first user gesture).
    #[cfg(target_arch = "wasm32")]
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn resume(&self) {}

    fn volume_for(&self, sound: Sound) -> f32 {
        match sound {
            Sound::Jump => self.settings.jump_volume(),
            Sound::BgMusic | Sound::BgGameOver => self.settings.effective_bgm(),
            _ => self.settings.effective_sfx(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, sound: Sound) {
        let vol = self.volume_for(sound);
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match sound {
            Sound::Jump => self.play_jump(ctx, vol),
            Sound::Star => self.play_star(ctx, vol),
            Sound::Click => self.play_click(ctx, vol),
            Sound::ProjectileHit => self.play_projectile_hit(ctx, vol),
            // Music needs decoded buffers; nothing to start yet
            Sound::BgMusic | Sound::BgGameOver => {
                log::debug!("music track not available: {sound:?}");
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn stop(&self, sound: Sound) {
        // The synthesized effects are one-shots; only music would need this
        log::debug!("stop requested: {sound:?}");
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, sound: Sound) {
        log::debug!("play {sound:?} at {:.2}", self.volume_for(sound));
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn stop(&self, sound: Sound) {
        log::debug!("stop {sound:?}");
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
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

    /// Jump - quick rising whoop
    #[cfg(target_arch = "wasm32")]
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 250.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.18)
            .ok();
        osc.frequency().set_value_at_time(250.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(550.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Power-up collect - happy ascending chime
    #[cfg(target_arch = "wasm32")]
    fn play_star(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [700.0, 900.0, 1200.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// UI click - short tap
    #[cfg(target_arch = "wasm32")]
    fn play_click(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 320.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.05)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.08).ok();
    }

    /// Projectile impact - low thud
    #[cfg(target_arch = "wasm32")]
    fn play_projectile_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 160.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(160.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(55.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();

        // High crack on top
        if let Some((osc2, gain2)) = self.create_osc(ctx, 1200.0, OscillatorType::Square) {
            gain2.gain().set_value_at_time(vol * 0.15, t).ok();
            gain2
                .gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.06)
                .ok();
            osc2.start().ok();
            osc2.stop_with_when(t + 0.08).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_settings_retunes_the_mixer() {
        let mut audio = AudioManager::new(SoundSettings::default());
        assert!(audio.volume_for(Sound::Star) > 0.0);
        assert!(audio.volume_for(Sound::Jump) < audio.volume_for(Sound::Star));

        audio.set_settings(SoundSettings {
            muted: true,
            ..SoundSettings::default()
        });
        assert_eq!(audio.volume_for(Sound::Star), 0.0);
        assert_eq!(audio.volume_for(Sound::BgMusic), 0.0);

        audio.set_settings(SoundSettings {
            muted: false,
            ..SoundSettings::default()
        });
        assert!(audio.volume_for(Sound::BgMusic) > 0.0);
    }
}
