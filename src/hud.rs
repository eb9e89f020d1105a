//! HUD overlay view model
//!
//! What the overlay shows for a given state. The browser entry point copies
//! this into the DOM; keeping it pure makes the screen logic testable.

use crate::highscores::BestScore;
use crate::sim::{GamePhase, GameState};

/// Final numbers for the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverView {
    pub final_score: u32,
    pub best_score: u32,
}

/// Overlay contents for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudView {
    /// Always visible
    pub score: u32,
    /// "Click or press space" prompt before the first run
    pub show_start_prompt: bool,
    /// Game over panel with a restart button
    pub game_over: Option<GameOverView>,
}

impl HudView {
    pub fn new(state: &GameState, best: &BestScore) -> Self {
        Self {
            score: state.score,
            show_start_prompt: state.phase == GamePhase::Ready,
            game_over: (state.phase == GamePhase::GameOver).then(|| GameOverView {
                final_score: state.score,
                best_score: best.get(),
            }),
        }
    }
}
