//! Fixed tick simulation
//!
//! Core game loop that advances the table deterministically: the paddle is
//! steered, the ball is swept through every collision in chronological order,
//! drag is applied, and a ball that left through the goal scores and respawns.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::Ball;
use super::obstacle::{Obstacle, ObstacleKind};
use super::state::GameState;
use super::wall::Wall;
use crate::consts::{MAX_SUB_STEPS, TICK};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Where the paddle should be at the end of the tick (field coordinates).
    /// `None` holds it still.
    pub target: Option<DVec2>,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WallHit,
    PostHit,
    PaddleHit,
    /// Ball went through the goal; carries the new score
    Goal { score: u64 },
}

impl From<ObstacleKind> for GameEvent {
    fn from(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Wall => GameEvent::WallHit,
            ObstacleKind::Post => GameEvent::PostHit,
            ObstacleKind::Paddle => GameEvent::PaddleHit,
        }
    }
}

/// What the scheduler did with one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveTrace {
    /// Sum of all time slices; equals one tick
    pub consumed: f64,
    /// Number of time slices
    pub sub_steps: u32,
    /// Indices of the obstacles hit, in the order they were hit
    pub hits: Vec<usize>,
}

/// Sweep the ball through one tick of motion.
///
/// Repeatedly finds the earliest contact among all obstacles, moves the ball
/// and every moving obstacle up to it, and applies that obstacle's response.
/// On equal times the obstacle earlier in `obstacles` wins. After
/// `MAX_SUB_STEPS` collisions the ball is held where it is for the rest of the
/// tick while moving obstacles finish their motion.
pub fn do_move(ball: &mut Ball, obstacles: &mut [Obstacle], eps: f64) -> MoveTrace {
    let mut trace = MoveTrace::default();
    let mut remaining = TICK;

    while remaining > 0.0 {
        let capped = trace.hits.len() as u32 >= MAX_SUB_STEPS;
        if capped {
            log::warn!(
                "{} collisions in one tick at ({:.2}, {:.2}); holding the ball for the last {remaining:.6}",
                trace.hits.len(),
                ball.pos.x,
                ball.pos.y
            );
        }

        let mut tmin = remaining;
        let mut winner = None;
        if !capped {
            for (i, obstacle) in obstacles.iter().enumerate() {
                match obstacle.collision_time(ball, eps) {
                    Some(t) if t < tmin => {
                        tmin = t;
                        winner = Some(i);
                    }
                    _ => {}
                }
            }
        }

        // Out of sub-steps: the ball stays at its last contact-free position
        if !capped {
            ball.advance(tmin);
        }
        for obstacle in obstacles.iter_mut().filter(|o| o.is_movable()) {
            obstacle.advance(tmin);
        }

        if let Some(i) = winner {
            obstacles[i].apply_response(ball);
            log::debug!(
                "Ball hit {:?} #{i} after {:.5}, new velocity ({:.3}, {:.3})",
                obstacles[i].kind(),
                TICK - remaining + tmin,
                ball.vel.x,
                ball.vel.y
            );
            trace.hits.push(i);
        }

        remaining -= tmin;
        trace.consumed += tmin;
        trace.sub_steps += 1;
    }

    trace
}

/// A circle as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    pub center: DVec2,
    pub radius: f64,
}

/// Read-only view of the table after a tick, for rendering and UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub score: u64,
    /// A goal was scored (and the ball respawned) this tick
    pub scored: bool,
    pub ball: Disc,
    pub paddle: Option<Disc>,
    pub posts: Vec<Disc>,
    pub walls: Vec<Wall>,
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn capture(state: &GameState, scored: bool, events: Vec<GameEvent>) -> Self {
        let mut posts = Vec::new();
        let mut walls = Vec::new();
        let mut paddle = None;
        for obstacle in &state.field.obstacles {
            match obstacle {
                Obstacle::Wall(wall) => walls.push(wall.clone()),
                Obstacle::Post(post) => posts.push(Disc {
                    center: post.center,
                    radius: post.radius,
                }),
                Obstacle::Paddle(p) => {
                    paddle = Some(Disc {
                        center: p.center,
                        radius: p.radius,
                    })
                }
            }
        }

        Self {
            tick: state.time_ticks,
            score: state.score,
            scored,
            ball: Disc {
                center: state.ball.pos,
                radius: state.ball.radius,
            },
            paddle,
            posts,
            walls,
            events,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Snapshot {
    if let Some(paddle) = state.field.paddle_mut() {
        paddle.prepare_move(input.target, TICK);
    }

    let trace = do_move(
        &mut state.ball,
        &mut state.field.obstacles,
        state.settings.time_epsilon,
    );
    let mut events: Vec<GameEvent> = trace
        .hits
        .iter()
        .map(|&i| state.field.obstacles[i].kind().into())
        .collect();

    state.ball.dampen(state.settings.drag);

    let scored = state.ball_left_field();
    if scored {
        state.score += 1;
        log::info!("Goal! Score is now {}", state.score);
        events.push(GameEvent::Goal { score: state.score });
        state.respawn_ball();
    }

    state.time_ticks += 1;
    Snapshot::capture(state, scored, events)
}
