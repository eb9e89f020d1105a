//! Demo autopilot
//!
//! Plays the game for attract mode and the headless runner. Rides just above
//! the bottom edge of the next gap: a flap lifts the bird ~100 units, which
//! fits inside the gap with room to spare.

use super::state::GameState;

/// Distance above the gap bottom at which a falling bird flaps
const FLAP_SLACK: f32 = 20.0;

/// Bottom edge of the gap the bird should fly through next
///
/// Falls back to a centered gap when no pipe is ahead.
pub fn target_gap_bottom(state: &GameState) -> f32 {
    let bird = &state.bird;
    let tuning = &state.tuning;
    state
        .pipes
        .iter()
        .find(|p| p.right() >= bird.x)
        .map(|p| p.bottom_y)
        .unwrap_or((tuning.canvas_height + tuning.pipe_gap) / 2.0)
}

/// Whether the autopilot wants to flap this tick
pub fn wants_flap(state: &GameState) -> bool {
    if !state.is_playing() {
        return false;
    }
    let bird = &state.bird;
    bird.velocity >= 0.0 && bird.rect().bottom() > target_gap_bottom(state) - FLAP_SLACK
}
