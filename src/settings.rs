//! Table layout and tuning
//!
//! Loaded from an optional JSON file; anything missing falls back to the
//! defaults derived from the screen layout in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Table ===
    /// Extent along x (the goal is in the wall at x = 0)
    pub field_length: f64,
    /// Extent along y
    pub field_width: f64,
    /// Drawn wall thickness; walls collide as capsules of half this
    pub wall_size: f64,
    /// Width of the goal mouth
    pub goal_size: f64,

    // === Bodies ===
    pub ball_radius: f64,
    pub paddle_radius: f64,
    pub post_radius: f64,
    /// Number of static posts scattered over the table
    pub interior_posts: u32,

    // === Tuning ===
    /// Per-axis bound on a spawned ball's velocity
    pub spawn_speed: f64,
    /// Fraction of velocity lost each tick
    pub drag: f64,
    /// Collision time margin
    pub time_epsilon: f64,

    /// Run seed
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_length: FIELD_LENGTH,
            field_width: FIELD_WIDTH,
            wall_size: WALL_SIZE,
            goal_size: GOAL_SIZE,

            ball_radius: BALL_RADIUS,
            paddle_radius: PADDLE_RADIUS,
            post_radius: POST_RADIUS,
            interior_posts: 2,

            spawn_speed: BALL_SPAWN_SPEED,
            drag: DRAG,
            time_epsilon: TIME_EPSILON,

            seed: 12345,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing keys take their defaults)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {e}", path.display()),
            },
            Err(e) => log::warn!("Cannot read settings {}: {e}", path.display()),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Wall half thickness used for collisions
    pub fn half_wall(&self) -> f64 {
        self.wall_size / 2.0
    }

    /// Lower and upper y of the goal mouth
    pub fn goal_span(&self) -> (f64, f64) {
        let mid = self.field_width / 2.0;
        (mid - self.goal_size / 2.0, mid + self.goal_size / 2.0)
    }

    /// Panic on a layout the simulation cannot run with
    pub fn validate(&self) {
        for (name, value) in [
            ("field_length", self.field_length),
            ("field_width", self.field_width),
            ("wall_size", self.wall_size),
            ("goal_size", self.goal_size),
            ("ball_radius", self.ball_radius),
            ("paddle_radius", self.paddle_radius),
            ("post_radius", self.post_radius),
            ("time_epsilon", self.time_epsilon),
        ] {
            assert!(value.is_finite() && value > 0.0, "{name} must be positive, got {value}");
        }
        assert!(
            self.spawn_speed.is_finite() && self.spawn_speed >= 0.0,
            "spawn_speed must be non-negative, got {}",
            self.spawn_speed
        );
        assert!(
            (0.0..1.0).contains(&self.drag),
            "drag must be in [0, 1), got {}",
            self.drag
        );
        assert!(
            self.goal_size < self.field_width,
            "goal ({}) must be narrower than the field ({})",
            self.goal_size,
            self.field_width
        );
        assert!(
            self.goal_size > 2.0 * (self.ball_radius + self.post_radius),
            "ball of radius {} cannot pass a goal of {}",
            self.ball_radius,
            self.goal_size
        );
        let spawn_room = 2.0 * (SPAWN_MARGIN + self.half_wall() + self.ball_radius);
        assert!(
            spawn_room < self.field_length && spawn_room < self.field_width,
            "field too small to spawn a ball of radius {}",
            self.ball_radius
        );
        assert!(
            2.0 * self.paddle_radius < self.field_length.min(self.field_width),
            "paddle of radius {} does not fit on the field",
            self.paddle_radius
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        settings.validate();
        assert_eq!(settings.field_length, 800.0);
        assert_eq!(settings.field_width, 612.5);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            interior_posts: 5,
            drag: 0.01,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "interior_posts": 0, "seed": 7 }"#).unwrap();
        assert_eq!(settings.interior_posts, 0);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.ball_radius, BALL_RADIUS);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/post-hockey.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_malformed_file_falls_back() {
        let path = std::env::temp_dir().join(format!("post_hockey_bad_{}.json", std::process::id()));
        std::fs::write(&path, "{ \"drag\": 0.5, not json").unwrap();

        let settings = Settings::load(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_reads_valid_file() {
        let path = std::env::temp_dir().join(format!("post_hockey_ok_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "interior_posts": 4 }"#).unwrap();

        let settings = Settings::load(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings.interior_posts, 4);
        assert_eq!(settings.seed, Settings::default().seed);
    }

    #[test]
    fn test_goal_span_is_centred() {
        let settings = Settings::default();
        let (lo, hi) = settings.goal_span();
        assert!((hi - lo - settings.goal_size).abs() < 1e-9);
        assert!(((lo + hi) / 2.0 - settings.field_width / 2.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "drag")]
    fn test_validate_rejects_bad_drag() {
        Settings {
            drag: 1.5,
            ..Default::default()
        }
        .validate();
    }
}
