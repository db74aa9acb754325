//! Straight walls, treated as capsules (segment + half thickness)

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::Ball;
use super::collision::{CollisionTime, earliest_root, reflect_velocity};
use crate::assert_finite;

/// A static wall segment from `a` to `b`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub a: DVec2,
    pub b: DVec2,
    /// Half of the drawn wall thickness
    pub half_thickness: f64,
}

impl Wall {
    pub fn new(a: DVec2, b: DVec2, half_thickness: f64) -> Self {
        assert_finite(a, "wall endpoint");
        assert_finite(b, "wall endpoint");
        assert!(a != b, "wall endpoints must be distinct, got {a} twice");
        assert!(
            half_thickness.is_finite() && half_thickness >= 0.0,
            "wall half thickness must be non-negative, got {half_thickness}"
        );
        Self {
            a,
            b,
            half_thickness,
        }
    }

    /// Direction vector from `a` to `b` (not normalized)
    #[inline]
    pub fn direction(&self) -> DVec2 {
        self.b - self.a
    }

    /// Unit normal of the wall line
    pub fn normal(&self) -> DVec2 {
        self.direction().perp().normalize()
    }

    /// Time until the ball touches either face of the wall.
    ///
    /// The wall is an infinite line widened by `ball.radius + half_thickness`
    /// on both sides; the contact is then kept only if it lands between the
    /// endpoints. Hits past an endpoint are left to the post sitting there.
    pub fn collision_time(&self, ball: &Ball, eps: f64) -> CollisionTime {
        let d = self.direction();

        let den = d.perp_dot(ball.vel);
        if den == 0.0 {
            return None;
        }

        let reach = (ball.radius + self.half_thickness) * d.length();
        let side = d.perp_dot(ball.pos - self.a);
        let t = earliest_root([(reach - side) / den, (-reach - side) / den], eps)?;

        let contact = ball.position_at(t + eps);
        let u = d.dot(contact - self.a) / d.length_squared();
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        Some(t)
    }

    /// Mirror the ball's velocity about the wall line
    pub fn apply_response(&self, ball: &mut Ball) {
        ball.vel = reflect_velocity(ball.vel, self.normal());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TIME_EPSILON as EPS;

    fn vertical_wall(x: f64) -> Wall {
        Wall::new(DVec2::new(x, 0.0), DVec2::new(x, 100.0), 1.0)
    }

    #[test]
    fn test_head_on_hit() {
        // Centre 10 from the wall line, reach 5 + 1, closing at 50/tick
        let wall = vertical_wall(20.0);
        let mut ball = Ball::new(DVec2::new(10.0, 10.0), DVec2::new(50.0, 0.0), 5.0);

        let t = wall.collision_time(&ball, EPS).unwrap();
        assert!((t - 0.08).abs() < 1e-4);
        assert!(t < 0.08);

        ball.advance(t);
        wall.apply_response(&mut ball);
        assert!((ball.vel.x + 50.0).abs() < 1e-9);
        assert!(ball.vel.y.abs() < 1e-9);
    }

    #[test]
    fn test_hit_from_the_other_side() {
        let wall = Wall::new(DVec2::ZERO, DVec2::new(0.0, 100.0), 1.0);
        let ball = Ball::new(DVec2::new(10.0, 10.0), DVec2::new(-50.0, 0.0), 5.0);

        let t = wall.collision_time(&ball, EPS).unwrap();
        assert!((t - 0.08).abs() < 1e-4);
    }

    #[test]
    fn test_parallel_motion_never_hits() {
        let wall = vertical_wall(20.0);
        let ball = Ball::new(DVec2::new(10.0, 10.0), DVec2::new(0.0, 30.0), 5.0);
        assert_eq!(wall.collision_time(&ball, EPS), None);
    }

    #[test]
    fn test_moving_away_never_hits() {
        let wall = vertical_wall(20.0);
        let ball = Ball::new(DVec2::new(10.0, 10.0), DVec2::new(-50.0, 3.0), 5.0);
        assert_eq!(wall.collision_time(&ball, EPS), None);
    }

    #[test]
    fn test_contact_past_endpoint_is_ignored() {
        // Wall spans y in [0, 20]; the ball crosses the line at y = 50
        let wall = Wall::new(DVec2::new(20.0, 0.0), DVec2::new(20.0, 20.0), 1.0);
        let ball = Ball::new(DVec2::new(10.0, 50.0), DVec2::new(50.0, 0.0), 5.0);
        assert_eq!(wall.collision_time(&ball, EPS), None);
    }

    #[test]
    fn test_diagonal_reflection_is_a_mirror() {
        let wall = Wall::new(DVec2::ZERO, DVec2::new(100.0, 100.0), 1.0);
        let mut ball = Ball::new(DVec2::new(50.0, 10.0), DVec2::new(-3.0, 7.0), 2.0);

        let tangent = wall.direction().normalize();
        let normal = wall.normal();
        let before_t = ball.vel.dot(tangent);
        let before_n = ball.vel.dot(normal);
        let speed = ball.speed();

        wall.apply_response(&mut ball);

        assert!((ball.vel.dot(tangent) - before_t).abs() < 1e-12);
        assert!((ball.vel.dot(normal) + before_n).abs() < 1e-12);
        assert!((ball.speed() - speed).abs() < 1e-12);
    }

    #[test]
    fn test_no_retrigger_after_bounce() {
        let wall = vertical_wall(20.0);
        let mut ball = Ball::new(DVec2::new(10.0, 10.0), DVec2::new(50.0, 0.0), 5.0);

        let t = wall.collision_time(&ball, EPS).unwrap();
        ball.advance(t);
        wall.apply_response(&mut ball);

        match wall.collision_time(&ball, EPS) {
            None => {}
            Some(t) => assert!(t > 0.0),
        }
    }

    #[test]
    #[should_panic(expected = "distinct")]
    fn test_rejects_degenerate_wall() {
        Wall::new(DVec2::ONE, DVec2::ONE, 1.0);
    }
}
