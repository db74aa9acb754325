//! Post Hockey headless runner
//!
//! Plays the table with a scripted paddle and prints snapshots as JSON lines.
//! Usage: `post-hockey [settings.json] [ticks]`

use std::path::Path;

use glam::DVec2;

use post_hockey::Settings;
use post_hockey::sim::{GameState, Snapshot, TickInput, tick};

/// Ticks to run when none are given
const DEFAULT_TICKS: u64 = 3600;
/// Print every n-th snapshot
const PRINT_EVERY: u64 = 60;

/// Shadow the ball from the far side so hits send it toward the goal
fn scripted_target(state: &GameState) -> Option<DVec2> {
    let paddle = state.field.paddle()?;
    let ball = &state.ball;
    Some(ball.pos + DVec2::new(ball.radius + paddle.radius + 1.0, 0.0))
}

fn print_snapshot(snapshot: &Snapshot) {
    match serde_json::to_string(snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}

fn main() {
    env_logger::init();
    log::info!("Post Hockey (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let ticks = args
        .next()
        .and_then(|n| match n.parse::<u64>() {
            Ok(n) => Some(n),
            Err(e) => {
                log::warn!("Ignoring tick count {n:?}: {e}");
                None
            }
        })
        .unwrap_or(DEFAULT_TICKS);

    let mut state = GameState::new(settings);
    for _ in 0..ticks {
        let input = TickInput {
            target: scripted_target(&state),
        };
        let snapshot = tick(&mut state, &input);
        if snapshot.scored || snapshot.tick % PRINT_EVERY == 0 {
            print_snapshot(&snapshot);
        }
    }

    log::info!("Finished {ticks} ticks with {} goals", state.score);
}
