//! Simulation tick
//!
//! Advances the session by one frame: bird physics, spawning, scrolling,
//! scoring, cleanup and collisions, in that order.

use super::collision::bird_hits_pipe;
use super::spawner::advance_spawner;
use super::state::{GamePhase, GameState};
use crate::highscores::BestScore;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    /// Bird fell past the bottom edge
    Floor,
    /// Bird hit a pipe segment
    Pipe,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Pipes passed this tick
    pub scored: u32,
    /// A new pipe was spawned
    pub spawned: bool,
    /// Set when the run ended this tick
    pub crash: Option<CrashCause>,
}

/// Advance the game state by one tick
///
/// `dt` only feeds the spawn timer. Gravity and scrolling are per tick, so
/// game speed follows the host's frame rate.
pub fn tick(state: &mut GameState, best: &mut BestScore, dt: f32) -> TickReport {
    let mut report = TickReport::default();
    if state.phase != GamePhase::Playing {
        return report;
    }
    state.time_ticks += 1;

    state.bird.fall();
    if state.bird.rect().bottom() > state.tuning.canvas_height {
        end_run(state, best, CrashCause::Floor);
        report.crash = Some(CrashCause::Floor);
        return report;
    }

    report.spawned = advance_spawner(state, dt);

    let speed = state.tuning.pipe_speed;
    for pipe in &mut state.pipes {
        pipe.x -= speed;
    }

    // Each pipe scores once, when its trailing edge clears the bird
    let bird_x = state.bird.x;
    for pipe in state.pipes.iter_mut().filter(|p| !p.passed && p.right() < bird_x) {
        pipe.passed = true;
        state.score += 1;
        report.scored += 1;
    }
    if report.scored > 0 {
        log::debug!("Score: {}", state.score);
    }

    state.pipes.retain(|p| p.right() >= 0.0);

    if state.pipes.iter().any(|p| bird_hits_pipe(&state.bird, p)) {
        end_run(state, best, CrashCause::Pipe);
        report.crash = Some(CrashCause::Pipe);
    }

    report
}

fn end_run(state: &mut GameState, best: &mut BestScore, cause: CrashCause) {
    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over ({:?}) after {} ticks, score {}",
        cause,
        state.time_ticks,
        state.score
    );
    if best.record(state.score) {
        log::info!("New best score: {}", best.get());
    }
}
