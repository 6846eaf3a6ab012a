//! Collision tests for the playfield
//!
//! Everything here is a point query: the crosshair is a point, ducks are
//! axis-aligned boxes and eggs are circles.

use glam::Vec2;

/// True if `point` lies inside the axis-aligned box of side `size` centered on `center`.
///
/// Edges count as inside.
#[inline]
pub fn point_in_box(point: Vec2, center: Vec2, size: f32) -> bool {
    let half = size / 2.0;
    point.x >= center.x - half
        && point.x <= center.x + half
        && point.y >= center.y - half
        && point.y <= center.y + half
}

/// True if `point` is strictly closer than `radius` to `center`
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) < radius * radius
}

/// True if `pos` is more than `margin` outside the `width` x `height` field
#[inline]
pub fn outside_field(pos: Vec2, width: f32, height: f32, margin: f32) -> bool {
    pos.x < -margin || pos.x > width + margin || pos.y < -margin || pos.y > height + margin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_box_center_and_edges() {
        let c = Vec2::new(100.0, 50.0);
        assert!(point_in_box(c, c, 12.0));
        assert!(point_in_box(Vec2::new(106.0, 56.0), c, 12.0));
        assert!(point_in_box(Vec2::new(94.0, 44.0), c, 12.0));
        assert!(!point_in_box(Vec2::new(106.1, 50.0), c, 12.0));
        assert!(!point_in_box(Vec2::new(100.0, 43.9), c, 12.0));
    }

    #[test]
    fn test_point_in_circle_is_strict() {
        let c = Vec2::ZERO;
        assert!(point_in_circle(Vec2::new(6.9, 0.0), c, 7.0));
        assert!(!point_in_circle(Vec2::new(7.0, 0.0), c, 7.0));
        assert!(point_in_circle(Vec2::new(4.0, 4.0), c, 7.0));
    }

    #[test]
    fn test_outside_field_margin() {
        assert!(!outside_field(Vec2::new(-10.0, 0.0), 256.0, 240.0, 10.0));
        assert!(outside_field(Vec2::new(-10.5, 0.0), 256.0, 240.0, 10.0));
        assert!(outside_field(Vec2::new(100.0, 251.0), 256.0, 240.0, 10.0));
        assert!(!outside_field(Vec2::new(266.0, 250.0), 256.0, 240.0, 10.0));
    }
}
