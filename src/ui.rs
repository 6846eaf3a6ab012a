//! Transient UI: floating text, screen flash, egg splats and banners
//!
//! Requests are fire-and-forget. `Overlay` keeps each item with its own
//! time-to-live and drops it in `update`, so nothing outlives its lifetime
//! and nothing points back into the simulation.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Rays in an egg crack
pub const CRACK_RAYS: usize = 6;
/// Base ray length of a crack, in playfield units
const CRACK_RADIUS: f32 = 16.0;
/// Cracks hold full opacity briefly, then fade over the rest of their life
const CRACK_HOLD: f32 = 0.08;
/// Floating text drift, units/sec upward
const FLOAT_RISE: f32 = 8.0;

/// Something that shows transient UI
pub trait UiSink {
    /// Floating text near `pos`
    fn float_text(&mut self, pos: Vec2, text: &str, duration: f32);
    /// Full-screen white flash
    fn flash(&mut self, duration: f32);
    /// Egg mess at `pos`
    fn splat(&mut self, pos: Vec2, kind: SplatKind, duration: f32);
    /// Centered message box
    fn banner(&mut self, text: &str, duration: f32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplatKind {
    Yolk,
    Crack,
}

/// An item with an age and a lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub item: T,
    pub age: f32,
    pub ttl: f32,
}

impl<T> Timed<T> {
    fn new(item: T, ttl: f32) -> Self {
        Self { item, age: 0.0, ttl }
    }

    /// 0.0 at spawn, 1.0 at expiry
    pub fn progress(&self) -> f32 {
        if self.ttl <= 0.0 {
            1.0
        } else {
            (self.age / self.ttl).clamp(0.0, 1.0)
        }
    }

    pub fn expired(&self) -> bool {
        self.age >= self.ttl
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatText {
    pub pos: Vec2,
    pub text: String,
}

impl Timed<FloatText> {
    /// Current draw position (rises over its life)
    pub fn draw_pos(&self) -> Vec2 {
        self.item.pos - Vec2::new(0.0, self.age * FLOAT_RISE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Splat {
    pub pos: Vec2,
    pub kind: SplatKind,
    /// (angle, length) per crack ray; empty for yolk
    pub rays: Vec<(f32, f32)>,
}

impl Timed<Splat> {
    /// Opacity for drawing
    pub fn alpha(&self) -> f32 {
        match self.item.kind {
            SplatKind::Yolk => 1.0 - self.progress().powi(4),
            SplatKind::Crack => {
                let fade = (self.ttl - CRACK_HOLD).max(f32::EPSILON);
                let t = ((self.age - CRACK_HOLD) / fade).clamp(0.0, 1.0);
                0.95 * (1.0 - t)
            }
        }
    }
}

/// Collected transient UI state
#[derive(Debug, Clone)]
pub struct Overlay {
    pub texts: Vec<Timed<FloatText>>,
    pub splats: Vec<Timed<Splat>>,
    pub banner: Option<Timed<String>>,
    /// Seconds of flash left
    pub flash_remaining: f32,
    /// Cosmetic only (crack shapes); never touches the game RNG
    rng: Pcg32,
}

impl Overlay {
    pub fn new(seed: u64) -> Self {
        Self {
            texts: Vec::new(),
            splats: Vec::new(),
            banner: None,
            flash_remaining: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Age every item and drop the expired ones
    pub fn update(&mut self, dt: f32) {
        for text in &mut self.texts {
            text.age += dt;
        }
        self.texts.retain(|t| !t.expired());

        for splat in &mut self.splats {
            splat.age += dt;
        }
        self.splats.retain(|s| !s.expired());

        if let Some(banner) = self.banner.as_mut() {
            banner.age += dt;
        }
        if self.banner.as_ref().is_some_and(|b| b.expired()) {
            self.banner = None;
        }

        self.flash_remaining = (self.flash_remaining - dt).max(0.0);
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
            && self.splats.is_empty()
            && self.banner.is_none()
            && self.flash_remaining <= 0.0
    }

    fn crack_rays(&mut self) -> Vec<(f32, f32)> {
        (0..CRACK_RAYS)
            .map(|i| {
                let angle = TAU * i as f32 / CRACK_RAYS as f32 + self.rng.random_range(-0.2..0.2);
                let len = CRACK_RADIUS + self.rng.random_range(-4.0..6.0);
                (angle, len)
            })
            .collect()
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(0)
    }
}

impl UiSink for Overlay {
    fn float_text(&mut self, pos: Vec2, text: &str, duration: f32) {
        self.texts.push(Timed::new(
            FloatText {
                pos,
                text: text.to_owned(),
            },
            duration,
        ));
    }

    fn flash(&mut self, duration: f32) {
        self.flash_remaining = self.flash_remaining.max(duration);
    }

    fn splat(&mut self, pos: Vec2, kind: SplatKind, duration: f32) {
        let rays = match kind {
            SplatKind::Yolk => Vec::new(),
            SplatKind::Crack => self.crack_rays(),
        };
        self.splats
            .push(Timed::new(Splat { pos, kind, rays }, duration));
    }

    fn banner(&mut self, text: &str, duration: f32) {
        // A newer banner replaces the old one and restarts its clock
        self.banner = Some(Timed::new(text.to_owned(), duration));
    }
}
