//! Obstacle dispatch
//!
//! Walls, posts and the paddle expose the same three capabilities to the
//! scheduler: when will the ball hit me, what happens to the ball when it
//! does, and how do I move over a slice of time.

use serde::{Deserialize, Serialize};

use super::body::Ball;
use super::collision::CollisionTime;
use super::post::{Paddle, Post};
use super::wall::Wall;

/// Which kind of obstacle something is (for events and logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Wall,
    Post,
    Paddle,
}

/// Anything the ball can collide with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Obstacle {
    Wall(Wall),
    Post(Post),
    Paddle(Paddle),
}

impl Obstacle {
    pub fn kind(&self) -> ObstacleKind {
        match self {
            Obstacle::Wall(_) => ObstacleKind::Wall,
            Obstacle::Post(_) => ObstacleKind::Post,
            Obstacle::Paddle(_) => ObstacleKind::Paddle,
        }
    }

    /// Time until the ball touches this obstacle, if ever
    pub fn collision_time(&self, ball: &Ball, eps: f64) -> CollisionTime {
        match self {
            Obstacle::Wall(wall) => wall.collision_time(ball, eps),
            Obstacle::Post(post) => post.collision_time(ball, eps),
            Obstacle::Paddle(paddle) => paddle.collision_time(ball, eps),
        }
    }

    /// Change the ball's velocity for a contact happening now
    pub fn apply_response(&self, ball: &mut Ball) {
        match self {
            Obstacle::Wall(wall) => wall.apply_response(ball),
            Obstacle::Post(post) => post.apply_response(ball),
            Obstacle::Paddle(paddle) => paddle.apply_response(ball),
        }
    }

    /// True if `advance` can change this obstacle's position
    pub fn is_movable(&self) -> bool {
        match self {
            Obstacle::Wall(_) => false,
            Obstacle::Post(post) => post.is_moving(),
            Obstacle::Paddle(_) => true,
        }
    }

    /// Move along with the ball for `dt` ticks (walls never move)
    pub fn advance(&mut self, dt: f64) {
        match self {
            Obstacle::Wall(_) => {}
            Obstacle::Post(post) => post.advance(dt),
            Obstacle::Paddle(paddle) => paddle.advance(dt),
        }
    }

    pub fn as_paddle(&self) -> Option<&Paddle> {
        match self {
            Obstacle::Paddle(paddle) => Some(paddle),
            _ => None,
        }
    }

    pub fn as_paddle_mut(&mut self) -> Option<&mut Paddle> {
        match self {
            Obstacle::Paddle(paddle) => Some(paddle),
            _ => None,
        }
    }
}

impl From<Wall> for Obstacle {
    fn from(wall: Wall) -> Self {
        Obstacle::Wall(wall)
    }
}

impl From<Post> for Obstacle {
    fn from(post: Post) -> Self {
        Obstacle::Post(post)
    }
}

impl From<Paddle> for Obstacle {
    fn from(paddle: Paddle) -> Self {
        Obstacle::Paddle(paddle)
    }
}
