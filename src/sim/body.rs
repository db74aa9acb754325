//! The ball - the only body that collides with anything

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{assert_finite, assert_radius};

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
}

impl Ball {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Self {
        assert_finite(pos, "ball position");
        assert_finite(vel, "ball velocity");
        assert_radius(radius, "ball");
        Self { pos, vel, radius }
    }

    /// Move along the current velocity for `dt` ticks
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }

    /// Where the ball would be after `dt` ticks, without moving it
    #[inline]
    pub fn position_at(&self, dt: f64) -> DVec2 {
        self.pos + self.vel * dt
    }

    /// Scale velocity by `1 - factor` (drag)
    pub fn dampen(&mut self, factor: f64) {
        self.vel *= 1.0 - factor;
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }
}
