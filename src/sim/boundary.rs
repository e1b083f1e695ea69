//! Side walls: a vertical entry chute that splays out along the pin lattice
//!
//! Each wall is a three-point polyline: chute top, chute bottom (first pin
//! row) and the splayed point at the last pin row. Between the chute bottom
//! and the containment floor the allowed x-range moves linearly from the
//! chute x to the splayed x; below the floor balls are never constrained.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::lerp;

/// The two side walls of the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boundary {
    /// Left wall: chute top, chute bottom, splayed bottom
    pub left: [Vec2; 3],
    /// Right wall: chute top, chute bottom, splayed bottom
    pub right: [Vec2; 3],
    /// Below this y the walls no longer apply
    pub floor_y: f32,
}

impl Boundary {
    pub fn new(left: [Vec2; 3], right: [Vec2; 3], floor_y: f32) -> Self {
        Self {
            left,
            right,
            floor_y,
        }
    }

    /// y where the chute ends and the walls start to splay
    #[inline]
    pub fn chute_bottom_y(&self) -> f32 {
        self.left[1].y
    }

    /// Allowed (left, right) x at height `y`, before accounting for ball radius
    pub fn span_at(&self, y: f32) -> (f32, f32) {
        let chute_bottom = self.chute_bottom_y();
        if y < chute_bottom {
            return (self.left[0].x, self.right[0].x);
        }
        let progress = (y - chute_bottom) / (self.floor_y - chute_bottom);
        (
            lerp(self.left[1].x, self.left[2].x, progress),
            lerp(self.right[1].x, self.right[2].x, progress),
        )
    }

    /// Whether a ball center at `pos` is inside the walls
    pub fn contains(&self, pos: Vec2) -> bool {
        if pos.y > self.floor_y {
            return true;
        }
        let (left_x, right_x) = self.span_at(pos.y);
        pos.x >= left_x && pos.x <= right_x
    }

    /// Commit a proposed move against the walls.
    ///
    /// Inside: the proposal is returned unchanged. Outside: outward horizontal
    /// speed is absorbed (no bounce) and x is clamped so the ball rests against
    /// the wall. y is never changed here.
    pub fn contain(&self, proposed: Vec2, vel: Vec2, radius: f32) -> (Vec2, Vec2) {
        if self.contains(proposed) {
            return (proposed, vel);
        }

        let (left_x, right_x) = self.span_at(proposed.y);
        let mut vel = vel;
        if (proposed.x < left_x && vel.x < 0.0) || (proposed.x > right_x && vel.x > 0.0) {
            vel.x = 0.0;
        }

        // max/min rather than clamp: a chute narrower than the ball must not panic
        let x = proposed.x.min(right_x - radius).max(left_x + radius);
        (Vec2::new(x, proposed.y), vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Chute 396..556 above y=70, splaying to 96..856 at y=630, floor at 670
    fn walls() -> Boundary {
        Boundary::new(
            [
                Vec2::new(396.0, 0.0),
                Vec2::new(396.0, 70.0),
                Vec2::new(96.0, 630.0),
            ],
            [
                Vec2::new(556.0, 0.0),
                Vec2::new(556.0, 70.0),
                Vec2::new(856.0, 630.0),
            ],
            670.0,
        )
    }

    #[test]
    fn test_chute_is_vertical() {
        let b = walls();
        assert_eq!(b.span_at(0.0), (396.0, 556.0));
        assert_eq!(b.span_at(69.9), (396.0, 556.0));
        assert!(b.contains(Vec2::new(400.0, 20.0)));
        assert!(!b.contains(Vec2::new(390.0, 20.0)));
    }

    #[test]
    fn test_walls_splay_linearly() {
        let b = walls();
        let (l, r) = b.span_at(370.0); // halfway between 70 and 670
        assert!((l - 246.0).abs() < 0.001);
        assert!((r - 706.0).abs() < 0.001);
        assert!(b.contains(Vec2::new(250.0, 370.0)));
        assert!(!b.contains(Vec2::new(240.0, 370.0)));
    }

    #[test]
    fn test_unconstrained_below_floor() {
        let b = walls();
        assert!(b.contains(Vec2::new(0.0, 671.0)));
        assert!(b.contains(Vec2::new(10_000.0, 700.0)));
    }

    #[test]
    fn test_contain_absorbs_outward_speed() {
        let b = walls();
        let (pos, vel) = b.contain(Vec2::new(390.0, 30.0), Vec2::new(-3.0, 2.0), 10.0);
        assert_eq!(pos, Vec2::new(406.0, 30.0));
        assert_eq!(vel, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_contain_keeps_inward_speed() {
        let b = walls();
        // Outside on the right but already heading back in
        let (pos, vel) = b.contain(Vec2::new(560.0, 30.0), Vec2::new(-1.0, 2.0), 10.0);
        assert_eq!(pos, Vec2::new(546.0, 30.0));
        assert_eq!(vel, Vec2::new(-1.0, 2.0));
    }

    #[test]
    fn test_contain_passes_inside_moves_through() {
        let b = walls();
        let proposed = Vec2::new(476.0, 300.0);
        let vel = Vec2::new(5.0, 1.0);
        assert_eq!(b.contain(proposed, vel, 10.0), (proposed, vel));
    }
}
