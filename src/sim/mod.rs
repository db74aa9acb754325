//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable obstacle order (walls, goal posts, interior posts, paddle)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod obstacle;
pub mod post;
pub mod state;
pub mod tick;
pub mod wall;

pub use body::Ball;
pub use collision::{CollisionTime, UniformSource, earliest_root, reflect_velocity};
pub use obstacle::{Obstacle, ObstacleKind};
pub use post::{Paddle, Post};
pub use state::{Field, GameState};
pub use tick::{Disc, GameEvent, MoveTrace, Snapshot, TickInput, do_move, tick};
pub use wall::Wall;
