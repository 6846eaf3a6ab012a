//! Duck Reckoning - a light-gun arcade game where the ducks fight back
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ducks, eggs, rounds, session state)
//! - `render`: Drawing surface abstraction and scene translation
//! - `audio`: Sound cue sink and Web Audio synthesis
//! - `ui`: Transient overlay effects (taunt bubbles, flashes, splats)
//! - `present`: Maps simulation events onto audio and UI
//! - `driver`: Frame clock and per-frame update/draw
//! - `settings`: Player preferences

pub mod audio;
pub mod driver;
pub mod present;
pub mod render;
pub mod settings;
pub mod sim;
pub mod ui;

pub use driver::{FrameClock, Game};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical playfield size (caller scales to device pixels)
    pub const PLAYFIELD_WIDTH: f32 = 256.0;
    pub const PLAYFIELD_HEIGHT: f32 = 240.0;
    /// Top of the ground strip
    pub const GROUND_Y: f32 = 190.0;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Minimum time between player shots (seconds)
    pub const SHOT_COOLDOWN: f32 = 0.22;
    pub const INITIAL_LIVES: u8 = 3;
    pub const POINTS_SHOT: i64 = 500;
    pub const POINTS_RESURRECT_PENALTY: i64 = 1000;
    /// Eggs closer than this to the crosshair hit the player
    pub const PLAYER_HIT_RADIUS: f32 = 7.0;
    /// Aiming below GROUND_Y - this counts as shooting into the grass
    pub const GRASS_BAND: f32 = 4.0;

    /// Forced round advance after this many seconds
    pub const ESCALATION_PERIOD: f32 = 20.0;

    /// Duck defaults
    pub const DUCK_SIZE: f32 = 12.0;
    pub const ELITE_DUCK_SIZE: f32 = 18.0;
    pub const ELITE_HIT_POINTS: u8 = 3;
    pub const HELMET_MIN_ROUND: u32 = 3;
    pub const HELMET_CHANCE: f32 = 0.45;

    /// Wander bounds for flying ducks
    pub const SKY_MIN_X: f32 = 16.0;
    pub const SKY_MAX_X: f32 = PLAYFIELD_WIDTH - 16.0;
    pub const SKY_MIN_Y: f32 = 20.0;
    pub const SKY_MAX_Y: f32 = GROUND_Y - 20.0;

    /// Spawn region for a new roster
    pub const SPAWN_MIN_X: f32 = 40.0;
    pub const SPAWN_MAX_X: f32 = PLAYFIELD_WIDTH - 40.0;
    pub const SPAWN_MIN_Y: f32 = 30.0;
    pub const SPAWN_MAX_Y: f32 = GROUND_Y - 40.0;

    /// Egg defaults
    pub const EGG_RADIUS: f32 = 2.5;
    /// Eggs die this far outside the playfield
    pub const EGG_BOUNDS_MARGIN: f32 = 10.0;
    /// Random aim error applied per axis when a duck fires
    pub const EGG_AIM_JITTER: f32 = 8.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Unit vector pointing from `from` to `to`.
///
/// Coincident points yield straight down (0, 1) so a zero-length aim never
/// produces NaN velocities.
#[inline]
pub fn aim_direction(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let len = delta.length();
    if len > f32::EPSILON {
        delta / len
    } else {
        Vec2::Y
    }
}

/// Clamp a point into the logical playfield
#[inline]
pub fn clamp_to_playfield(point: Vec2) -> Vec2 {
    use consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
    Vec2::new(
        point.x.clamp(0.0, PLAYFIELD_WIDTH),
        point.y.clamp(0.0, PLAYFIELD_HEIGHT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(4.0, 8.0, 0.0), 4.0);
        assert_eq!(lerp(4.0, 8.0, 1.0), 8.0);
    }

    #[test]
    fn test_aim_direction_is_unit() {
        let dir = aim_direction(Vec2::new(10.0, 10.0), Vec2::new(13.0, 14.0));
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!((dir.x - 0.6).abs() < 1e-5);
        assert!((dir.y - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_aim_direction_degenerate_falls_back_down() {
        let p = Vec2::new(50.0, 50.0);
        let dir = aim_direction(p, p);
        assert_eq!(dir, Vec2::Y);
        assert!(!dir.x.is_nan() && !dir.y.is_nan());
    }

    #[test]
    fn test_clamp_to_playfield() {
        let p = clamp_to_playfield(Vec2::new(-5.0, 400.0));
        assert_eq!(p, Vec2::new(0.0, consts::PLAYFIELD_HEIGHT));
    }
}
