//! Post Hockey - a single-ball air hockey table
//!
//! Core modules:
//! - `sim`: Deterministic simulation (continuous collision detection, rounds, scoring)
//! - `settings`: Data-driven table layout and tuning

pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::DVec2;

/// Simulation constants
pub mod consts {
    /// Length of one simulation tick, in tick units
    pub const TICK: f64 = 1.0;
    /// Margin subtracted from every collision time so the ball stops short of contact
    pub const TIME_EPSILON: f64 = 1e-5;
    /// Collisions resolved in a single tick before the rest of the tick is skipped through
    pub const MAX_SUB_STEPS: u32 = 64;
    /// Rejection sampling budget for ball and post placement
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;
    /// Gap kept between a freshly spawned ball and the walls
    pub const SPAWN_MARGIN: f64 = 5.0;

    /// Screen layout the table is derived from
    pub const SCREEN_WIDTH: f64 = 850.0;
    pub const SCREEN_LENGTH: f64 = 850.0;
    pub const FIELD_OFFSET: f64 = 25.0;

    /// Table dimensions (x runs along the length, y across the width)
    pub const FIELD_WIDTH: f64 = SCREEN_WIDTH * 6.0 / 8.0 - FIELD_OFFSET;
    pub const FIELD_LENGTH: f64 = SCREEN_LENGTH - 2.0 * FIELD_OFFSET;

    pub const WALL_SIZE: f64 = FIELD_WIDTH / 50.0;
    /// Width of the goal mouth cut into the near wall
    pub const GOAL_SIZE: f64 = FIELD_WIDTH / 3.0;

    pub const BALL_RADIUS: f64 = FIELD_WIDTH / 16.0;
    pub const PADDLE_RADIUS: f64 = FIELD_WIDTH / 12.0;
    pub const POST_RADIUS: f64 = WALL_SIZE;

    /// Per-axis bound of a freshly spawned ball's velocity (units per tick)
    pub const BALL_SPAWN_SPEED: f64 = 25.0;
    /// Fraction of ball velocity lost every tick
    pub const DRAG: f64 = 0.001;
}

/// Panic unless every component of `v` is finite
#[inline]
#[track_caller]
pub fn assert_finite(v: DVec2, what: &str) {
    assert!(v.is_finite(), "{what} must be finite, got {v}");
}

/// Panic unless `r` is a positive finite radius
#[inline]
#[track_caller]
pub fn assert_radius(r: f64, what: &str) {
    assert!(r.is_finite() && r > 0.0, "{what} radius must be positive, got {r}");
}
