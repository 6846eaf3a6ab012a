//! Frame driver
//!
//! Glues one animation frame together: input -> simulation -> events ->
//! audio/UI -> draw. Platform code owns the canvas, the audio sink and the
//! frame timer and calls `Game::frame` once per `requestAnimationFrame`.

use crate::Settings;
use crate::audio::AudioSink;
use crate::consts::MAX_FRAME_DT;
use crate::present;
use crate::render::{Surface, draw_scene};
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::ui::Overlay;

/// Turns timestamps into clamped frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Seconds since the previous call. 0 on the first frame, never more
    /// than `MAX_FRAME_DT` (tab switches and debugger stops are not replayed).
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        }
    }

    /// Forget the previous timestamp
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

const FPS_WINDOW: usize = 60;

/// Rolling FPS over the last 60 frames
#[derive(Debug, Clone)]
struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    fn record(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one we will overwrite next
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

/// Game instance holding everything a frame touches
pub struct Game {
    pub state: GameState,
    pub overlay: Overlay,
    pub settings: Settings,
    /// Input gathered since the last frame
    pub input: TickInput,
    clock: FrameClock,
    fps: FpsCounter,
    /// Wall-clock seconds, drives decoration only
    wall_time: f32,
}

impl Game {
    /// New session on the title screen. `settings.seed` wins over `fallback_seed`.
    pub fn new(settings: Settings, fallback_seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(fallback_seed);
        log::info!("New game session, seed {}", seed);
        Self {
            state: GameState::new(seed),
            overlay: Overlay::new(seed.rotate_left(17)),
            settings,
            input: TickInput::default(),
            clock: FrameClock::default(),
            fps: FpsCounter::new(),
            wall_time: 0.0,
        }
    }

    /// Advance by `dt` seconds and route the resulting events.
    /// Returns the events so callers can react (HUD, logs).
    pub fn step(&mut self, dt: f32, audio: &mut dyn AudioSink) -> Vec<GameEvent> {
        self.wall_time += dt;

        tick(&mut self.state, &self.input, dt);
        self.input.clear_one_shots();

        let events = self.state.drain_events();
        present::dispatch(&events, audio, &mut self.overlay, &self.settings);

        self.overlay.update(dt);
        audio.update(dt);
        events
    }

    /// Draw the current state
    pub fn draw(&self, surface: &mut dyn Surface) {
        draw_scene(&self.state, &self.overlay, self.wall_time, surface);
    }

    /// One animation frame at timestamp `now_ms`
    pub fn frame(
        &mut self,
        now_ms: f64,
        audio: &mut dyn AudioSink,
        surface: &mut dyn Surface,
    ) -> Vec<GameEvent> {
        let dt = self.clock.advance(now_ms);
        self.fps.record(now_ms);
        let events = self.step(dt, audio);
        self.draw(surface);
        events
    }

    /// Forget frame timing (after the tab was hidden)
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps
    }
}
