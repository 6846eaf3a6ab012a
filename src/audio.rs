//! Audio: named sound cues and two background loops
//!
//! The game only ever talks to an `AudioSink`. On the web the sink is
//! `WebAudio`, which synthesizes everything with oscillators - no sound files.

pub use crate::sim::MusicMode;

/// Sound effect cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Light-gun zap on a hit
    Hit,
    /// Light-gun zap with nothing hit
    Miss,
    /// Dull boop when shooting into the grass
    Dud,
    /// Egg splats on the screen
    Impact,
    /// Duck laughs at the player
    Laugh,
    /// Duck gets hit
    Oof,
    /// Record scratch when the music turns
    Scratch,
}

/// Anything that can play cues and loop music
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);

    /// Start a loop, or stop music with `None`
    fn set_music(&mut self, mode: Option<MusicMode>);

    /// Advance music timing; called once per frame
    fn update(&mut self, _dt: f32) {}
}

/// Sink for headless runs: tracks state and logs
#[derive(Debug, Default)]
pub struct SilentAudio {
    pub music: Option<MusicMode>,
    pub cues_played: usize,
}

impl AudioSink for SilentAudio {
    fn play(&mut self, cue: SoundCue) {
        self.cues_played += 1;
        log::debug!("cue {:?}", cue);
    }

    fn set_music(&mut self, mode: Option<MusicMode>) {
        if self.music != mode {
            log::debug!("music {:?} -> {:?}", self.music, mode);
        }
        self.music = mode;
    }
}

/// Note pattern and step interval for a music mode
pub fn music_pattern(mode: MusicMode) -> (&'static [f32; 8], f32) {
    match mode {
        // Cheerful arpeggio
        MusicMode::Calm => (&[440.0, 494.0, 523.0, 587.0, 523.0, 494.0, 440.0, 392.0], 0.14),
        // Ominous minor-ish crawl
        MusicMode::Tense => (&[392.0, 370.0, 392.0, 415.0, 392.0, 349.0, 330.0, 311.0], 0.18),
    }
}

/// Steps a music loop: returns how many notes are due after `dt`
#[derive(Debug, Clone, Default)]
pub struct MusicClock {
    elapsed: f32,
    step: usize,
}

impl MusicClock {
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.step = 0;
    }

    /// Advance and collect the note indices that fall due
    pub fn advance(&mut self, dt: f32, interval: f32, pattern_len: usize, out: &mut Vec<usize>) {
        if interval <= 0.0 || pattern_len == 0 {
            return;
        }
        self.elapsed += dt;
        while self.elapsed >= interval {
            self.elapsed -= interval;
            out.push(self.step % pattern_len);
            self.step += 1;
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, MusicClock, MusicMode, SoundCue, music_pattern};
    use crate::Settings;

    /// Web Audio synthesizer
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        sfx_volume: f32,
        music_volume: f32,
        music: Option<MusicMode>,
        clock: MusicClock,
        due: Vec<usize>,
    }

    impl WebAudio {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            let mut audio = Self {
                ctx,
                sfx_volume: 0.0,
                music_volume: 0.0,
                music: None,
                clock: MusicClock::default(),
                due: Vec::with_capacity(4),
            };
            audio.apply_settings(settings);
            audio
        }

        /// Pick up volume/mute changes
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.sfx_volume = settings.effective_sfx_volume();
            self.music_volume = settings.effective_music_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn context(&self) -> Option<&AudioContext> {
            let ctx = self.ctx.as_ref()?;
            // Browsers suspend the context until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            Some(ctx)
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
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

        /// Single decaying tone starting `delay` seconds from now
        fn beep(&self, freq: f32, dur: f64, osc_type: OscillatorType, vol: f32, delay: f64) {
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = self.context() else { return };
            let Some((osc, gain)) = Self::create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + delay;

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.0001, t + dur)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + dur + 0.01).ok();
        }

        /// Tone with a pitch glide
        fn sweep(&self, from: f32, to: f32, dur: f64, osc_type: OscillatorType, vol: f32) {
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = self.context() else { return };
            let Some((osc, gain)) = Self::create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.0001, t + dur)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + dur)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + dur + 0.01).ok();
        }

        fn play_note(&self, mode: MusicMode, freq: f32) {
            let vol = self.music_volume;
            match mode {
                MusicMode::Calm => {
                    self.beep(freq, 0.08, OscillatorType::Square, vol * 0.12, 0.0);
                    self.beep(freq / 2.0, 0.12, OscillatorType::Triangle, vol * 0.07, 0.0);
                }
                MusicMode::Tense => {
                    self.beep(freq, 0.1, OscillatorType::Square, vol * 0.12, 0.0);
                    self.beep(freq / 2.0, 0.14, OscillatorType::Triangle, vol * 0.06, 0.0);
                }
            }
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, cue: SoundCue) {
            let vol = self.sfx_volume;
            match cue {
                SoundCue::Hit => {
                    self.beep(1400.0, 0.06, OscillatorType::Square, vol * 0.35, 0.0);
                    self.beep(900.0, 0.08, OscillatorType::Sawtooth, vol * 0.2, 0.0);
                }
                SoundCue::Miss => {
                    self.beep(1200.0, 0.05, OscillatorType::Square, vol * 0.3, 0.0);
                    self.beep(700.0, 0.07, OscillatorType::Sawtooth, vol * 0.15, 0.0);
                }
                SoundCue::Dud => {
                    self.beep(220.0, 0.15, OscillatorType::Triangle, vol * 0.25, 0.0);
                }
                SoundCue::Impact => {
                    self.beep(160.0, 0.08, OscillatorType::Square, vol * 0.25, 0.0);
                }
                SoundCue::Laugh => {
                    self.beep(600.0, 0.06, OscillatorType::Square, vol * 0.25, 0.0);
                    self.beep(520.0, 0.06, OscillatorType::Square, vol * 0.25, 0.07);
                    self.beep(440.0, 0.08, OscillatorType::Square, vol * 0.25, 0.14);
                }
                SoundCue::Oof => {
                    self.beep(300.0, 0.12, OscillatorType::Triangle, vol * 0.2, 0.0);
                }
                SoundCue::Scratch => {
                    self.sweep(1200.0, 180.0, 0.18, OscillatorType::Sawtooth, vol * 0.35);
                    self.sweep(900.0, 120.0, 0.18, OscillatorType::Square, vol * 0.15);
                }
            }
        }

        fn set_music(&mut self, mode: Option<MusicMode>) {
            if self.music != mode {
                self.clock.reset();
            }
            self.music = mode;
        }

        fn update(&mut self, dt: f32) {
            let Some(mode) = self.music else { return };
            let (pattern, interval) = music_pattern(mode);
            let mut due = std::mem::take(&mut self.due);
            self.clock.advance(dt, interval, pattern.len(), &mut due);
            for index in due.drain(..) {
                self.play_note(mode, pattern[index]);
            }
            self.due = due;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_clock_steps_through_pattern() {
        let mut clock = MusicClock::default();
        let mut due = Vec::new();
        // 0.125 is exact in binary, so 9 steps land precisely
        for _ in 0..9 {
            clock.advance(0.125, 0.125, 8, &mut due);
        }
        assert_eq!(due, vec![0, 1, 2, 3, 4, 5, 6, 7, 0]);
    }

    #[test]
    fn test_music_clock_catches_up_after_stall() {
        let mut clock = MusicClock::default();
        let mut due = Vec::new();
        clock.advance(0.5, 0.125, 8, &mut due);
        assert_eq!(due.len(), 4);
        clock.reset();
        due.clear();
        clock.advance(0.1, 0.125, 8, &mut due);
        assert!(due.is_empty());
    }

    #[test]
    fn test_patterns_differ() {
        let (calm, calm_step) = music_pattern(MusicMode::Calm);
        let (tense, tense_step) = music_pattern(MusicMode::Tense);
        assert_ne!(calm, tense);
        assert!(tense_step > calm_step);
    }

    #[test]
    fn test_silent_audio_tracks_music() {
        let mut audio = SilentAudio::default();
        audio.set_music(Some(MusicMode::Calm));
        audio.play(SoundCue::Hit);
        assert_eq!(audio.music, Some(MusicMode::Calm));
        assert_eq!(audio.cues_played, 1);
        audio.set_music(None);
        assert_eq!(audio.music, None);
    }
}
