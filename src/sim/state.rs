//! Game state and table layout
//!
//! Everything the tick driver owns lives here: the ball, the obstacle list,
//! the score and the seeded RNG.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::Ball;
use super::collision::UniformSource;
use super::obstacle::Obstacle;
use super::post::{Paddle, Post};
use super::wall::Wall;
use crate::Settings;
use crate::consts::{MAX_SPAWN_ATTEMPTS, SPAWN_MARGIN};

/// The table: walls, posts and the paddle, in scheduler order
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Walls first, then goal posts, then interior posts, then the paddle.
    /// On equal collision times the earlier obstacle wins.
    pub obstacles: Vec<Obstacle>,
    pub length: f64,
    pub width: f64,
}

impl Field {
    /// Lay out the table for `settings`; interior posts are placed at random
    pub fn build(settings: &Settings, rng: &mut impl UniformSource) -> Self {
        let l = settings.field_length;
        let w = settings.field_width;
        let half = settings.half_wall();
        let (goal_lo, goal_hi) = settings.goal_span();

        let corner = |x: f64, y: f64| DVec2::new(x, y);
        let mut obstacles: Vec<Obstacle> = vec![
            Wall::new(corner(0.0, 0.0), corner(l, 0.0), half).into(),
            Wall::new(corner(l, 0.0), corner(l, w), half).into(),
            Wall::new(corner(l, w), corner(0.0, w), half).into(),
            // Near wall, split around the goal mouth
            Wall::new(corner(0.0, w), corner(0.0, goal_hi), half).into(),
            Wall::new(corner(0.0, goal_lo), corner(0.0, 0.0), half).into(),
            // Goal posts cap the wall ends
            Post::fixed(corner(0.0, goal_lo), half).into(),
            Post::fixed(corner(0.0, goal_hi), half).into(),
        ];

        let paddle = Paddle::new(
            corner(l * 0.75, w / 2.0),
            settings.paddle_radius,
            DVec2::ZERO,
            corner(l, w),
        );

        // Keep a ball's width of room around every interior post
        let gap = 2.0 * settings.ball_radius;
        let r = settings.post_radius;
        let inset = r + half + gap;
        let mut placed: Vec<DVec2> = Vec::new();
        for _ in 0..settings.interior_posts {
            let center = sample_clear(rng, corner(inset, inset), corner(l - inset, w - inset), |p| {
                p.distance(paddle.center) >= r + paddle.radius + gap
                    && placed.iter().all(|q| p.distance(*q) >= 2.0 * r + gap)
            })
            .unwrap_or_else(|| {
                panic!("no room for {} interior posts", settings.interior_posts)
            });
            placed.push(center);
        }
        obstacles.extend(placed.into_iter().map(|c| Obstacle::from(Post::fixed(c, r))));
        obstacles.push(paddle.into());

        log::info!(
            "Built {l}x{w} table: {} obstacles, goal y in [{goal_lo:.1}, {goal_hi:.1}]",
            obstacles.len()
        );

        Self {
            obstacles,
            length: l,
            width: w,
        }
    }

    pub fn paddle(&self) -> Option<&Paddle> {
        self.obstacles.iter().find_map(Obstacle::as_paddle)
    }

    pub fn paddle_mut(&mut self) -> Option<&mut Paddle> {
        self.obstacles.iter_mut().find_map(Obstacle::as_paddle_mut)
    }

    /// True if a ball of `radius` at `pos` overlaps no post and not the paddle
    pub fn is_clear(&self, pos: DVec2, radius: f64) -> bool {
        self.obstacles.iter().all(|o| match o {
            Obstacle::Wall(_) => true,
            Obstacle::Post(post) => pos.distance(post.center) >= radius + post.radius,
            Obstacle::Paddle(paddle) => pos.distance(paddle.center) >= radius + paddle.radius,
        })
    }

    /// Spawn a fresh ball at a random clear spot with a random velocity
    pub fn spawn_ball(&self, settings: &Settings, rng: &mut impl UniformSource) -> Ball {
        let r = settings.ball_radius;
        let lo = DVec2::splat(SPAWN_MARGIN + settings.half_wall() + r);
        let hi = DVec2::new(self.length, self.width) - lo;
        let speed = settings.spawn_speed;

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            // Every attempt draws a whole new ball
            let pos = DVec2::new(rng.uniform(lo.x, hi.x), rng.uniform(lo.y, hi.y));
            let vel = DVec2::new(rng.uniform(-speed, speed), rng.uniform(-speed, speed));
            if self.is_clear(pos, r) {
                return Ball::new(pos, vel, r);
            }
        }

        panic!("could not place a ball of radius {r} clear of the paddle and posts");
    }
}

/// Rejection-sample a point in `[min, max]` accepted by `accept`
fn sample_clear(
    rng: &mut impl UniformSource,
    min: DVec2,
    max: DVec2,
    accept: impl Fn(DVec2) -> bool,
) -> Option<DVec2> {
    (0..MAX_SPAWN_ATTEMPTS)
        .map(|_| DVec2::new(rng.uniform(min.x, max.x), rng.uniform(min.y, max.y)))
        .find(|p| accept(*p))
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub field: Field,
    pub ball: Ball,
    /// Goals scored
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game from `settings` (seeded with `settings.seed`)
    pub fn new(settings: Settings) -> Self {
        settings.validate();
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let field = Field::build(&settings, &mut rng);
        let ball = field.spawn_ball(&settings, &mut rng);

        Self {
            settings,
            field,
            ball,
            score: 0,
            time_ticks: 0,
            rng,
        }
    }

    /// Start over: new table and ball, zero score. The RNG keeps running.
    pub fn reset(&mut self) {
        self.field = Field::build(&self.settings, &mut self.rng);
        self.ball = self.field.spawn_ball(&self.settings, &mut self.rng);
        self.score = 0;
        self.time_ticks = 0;
    }

    /// Replace the ball with a freshly spawned one
    pub fn respawn_ball(&mut self) {
        self.ball = self.field.spawn_ball(&self.settings, &mut self.rng);
        log::info!(
            "Ball respawned at ({:.1}, {:.1}) moving ({:.2}, {:.2})",
            self.ball.pos.x,
            self.ball.pos.y,
            self.ball.vel.x,
            self.ball.vel.y
        );
    }

    /// True once the ball is fully past the near edge (through the goal)
    pub fn ball_left_field(&self) -> bool {
        self.ball.pos.x < -self.ball.radius
    }
}
