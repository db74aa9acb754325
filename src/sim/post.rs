//! Circular obstacles: posts (static or drifting) and the player's paddle
//!
//! Both share the same time-of-impact solve; they differ in who drives their
//! velocity. A post keeps whatever velocity it was built with, the paddle is
//! steered toward a target once per tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::Ball;
use super::collision::{CollisionTime, circle_contact_time, reflect_off_moving};
use crate::{assert_finite, assert_radius};

/// Unit vector from an obstacle centre toward the ball, or zero if they coincide
#[inline]
fn line_of_centres(ball: &Ball, center: DVec2) -> DVec2 {
    (ball.pos - center).normalize_or_zero()
}

/// A circular post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub center: DVec2,
    pub radius: f64,
    /// Zero for static posts
    pub vel: DVec2,
}

impl Post {
    /// A post that never moves
    pub fn fixed(center: DVec2, radius: f64) -> Self {
        Self::moving(center, radius, DVec2::ZERO)
    }

    /// A post drifting with a constant velocity
    pub fn moving(center: DVec2, radius: f64, vel: DVec2) -> Self {
        assert_finite(center, "post centre");
        assert_finite(vel, "post velocity");
        assert_radius(radius, "post");
        Self {
            center,
            radius,
            vel,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.vel != DVec2::ZERO
    }

    pub fn collision_time(&self, ball: &Ball, eps: f64) -> CollisionTime {
        circle_contact_time(
            ball.pos - self.center,
            ball.vel - self.vel,
            ball.radius + self.radius,
            eps,
        )
    }

    /// Bounce the ball off the post.
    ///
    /// The ball's along-centre velocity relative to the post is negated and
    /// its tangential velocity kept. The post's own velocity never changes.
    pub fn apply_response(&self, ball: &mut Ball) {
        let n = line_of_centres(ball, self.center);
        ball.vel = reflect_off_moving(ball.vel, self.vel, n);
    }

    pub fn advance(&mut self, dt: f64) {
        self.center += self.vel * dt;
    }
}

/// The player-driven paddle (hammer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub center: DVec2,
    pub radius: f64,
    /// Velocity for the current tick, derived from the target in `prepare_move`
    pub vel: DVec2,
    /// Lowest allowed centre (field corner inset by radius)
    min: DVec2,
    /// Highest allowed centre
    max: DVec2,
}

impl Paddle {
    /// Create a paddle confined to the box `[field_min, field_max]`
    pub fn new(center: DVec2, radius: f64, field_min: DVec2, field_max: DVec2) -> Self {
        assert_finite(center, "paddle centre");
        assert_radius(radius, "paddle");
        let min = field_min + DVec2::splat(radius);
        let max = field_max - DVec2::splat(radius);
        assert!(
            min.cmple(max).all(),
            "paddle of radius {radius} does not fit between {field_min} and {field_max}"
        );
        Self {
            center: center.clamp(min, max),
            radius,
            vel: DVec2::ZERO,
            min,
            max,
        }
    }

    /// Clamp a target point to where the paddle centre may go
    pub fn clamp_target(&self, target: DVec2) -> DVec2 {
        target.clamp(self.min, self.max)
    }

    /// Set this tick's velocity so the paddle reaches `target` exactly at tick end.
    ///
    /// `None` holds the paddle still.
    pub fn prepare_move(&mut self, target: Option<DVec2>, tick: f64) {
        self.vel = match target {
            Some(target) => {
                assert_finite(target, "paddle target");
                (self.clamp_target(target) - self.center) / tick
            }
            None => DVec2::ZERO,
        };
    }

    pub fn collision_time(&self, ball: &Ball, eps: f64) -> CollisionTime {
        circle_contact_time(
            ball.pos - self.center,
            ball.vel - self.vel,
            ball.radius + self.radius,
            eps,
        )
    }

    /// Strike the ball.
    ///
    /// The paddle is externally driven, so its velocity is left alone; the
    /// ball's along-centre component becomes `2 * paddle_along - ball_along`,
    /// picking up the paddle's momentum.
    pub fn apply_response(&self, ball: &mut Ball) {
        let n = line_of_centres(ball, self.center);
        ball.vel = reflect_off_moving(ball.vel, self.vel, n);
    }

    pub fn advance(&mut self, dt: f64) {
        self.center += self.vel * dt;
    }
}
