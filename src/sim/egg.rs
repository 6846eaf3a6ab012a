//! Eggs: the projectiles ducks lob at the crosshair
//!
//! Straight-line ballistics only. No gravity, no bouncing, no homing.

use glam::Vec2;

use super::collision::{outside_field, point_in_circle};
use crate::aim_direction;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Egg {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alive: bool,
}

impl Egg {
    /// Launch an egg from `origin` toward `aim` at `speed` units/sec.
    ///
    /// Direction is fixed at creation; see [`aim_direction`] for the
    /// coincident-points fallback.
    pub fn new(origin: Vec2, aim: Vec2, speed: f32) -> Self {
        Self {
            pos: origin,
            vel: aim_direction(origin, aim) * speed,
            radius: EGG_RADIUS,
            alive: true,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Integrate position; dies once it leaves the playfield plus margin
    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.pos += self.vel * dt;
        if outside_field(self.pos, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT, EGG_BOUNDS_MARGIN) {
            self.alive = false;
        }
    }

    /// Caller deactivates the egg on a hit
    pub fn collides_with_point(&self, point: Vec2, hit_radius: f32) -> bool {
        point_in_circle(point, self.pos, hit_radius)
    }
}
