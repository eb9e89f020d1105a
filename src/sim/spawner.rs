//! Timer-gated pipe spawning

use rand::Rng;

use super::state::{GameState, Pipe};

/// Accumulate `dt` and spawn a pipe at the right edge once the interval is
/// reached. Returns `true` if a pipe was added.
///
/// The timer resets to zero on spawn; overshoot past the interval is dropped.
pub fn advance_spawner(state: &mut GameState, dt: f32) -> bool {
    state.spawn_timer += dt;
    if state.spawn_timer < state.tuning.spawn_interval_ms {
        return false;
    }

    state.spawn_timer = 0.0;
    let pipe = spawn_pipe(state);
    log::debug!(
        "Pipe spawned at x={} gap={}..{}",
        pipe.x,
        pipe.top_height,
        pipe.bottom_y
    );
    state.pipes.push(pipe);
    true
}

/// Build a pipe at the right edge with a random gap position
///
/// `GameState::new` has validated the tuning, so the gap range is non-empty.
fn spawn_pipe(state: &mut GameState) -> Pipe {
    let tuning = state.tuning;
    let top_height = state.rng.random_range(tuning.gap_top_range());
    Pipe::new(
        tuning.canvas_width,
        tuning.pipe_width,
        top_height,
        tuning.pipe_gap,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(Tuning::default(), seed).unwrap();
        state.restart();
        state
    }

    #[test]
    fn test_spawns_on_interval() {
        let mut state = playing(3);
        assert!(!advance_spawner(&mut state, 1000.0));
        assert!(state.pipes.is_empty());
        assert!(advance_spawner(&mut state, 500.0));
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.spawn_timer, 0.0);

        let pipe = &state.pipes[0];
        assert_eq!(pipe.x, 400.0);
        assert_eq!(pipe.width, 60.0);
        assert!(!pipe.passed);
    }

    #[test]
    fn test_overshoot_is_discarded() {
        let mut state = playing(3);
        assert!(advance_spawner(&mut state, 2900.0));
        // Not carried forward: a full interval is needed again
        assert_eq!(state.spawn_timer, 0.0);
        assert!(!advance_spawner(&mut state, 1499.0));
        assert_eq!(state.pipes.len(), 1);
    }

    #[test]
    fn test_gap_stays_within_margins() {
        let mut state = playing(42);
        for _ in 0..500 {
            advance_spawner(&mut state, 1500.0);
        }
        assert_eq!(state.pipes.len(), 500);
        for pipe in &state.pipes {
            assert!(pipe.top_height >= 50.0);
            assert!(pipe.bottom_y <= 550.0);
            assert_eq!(pipe.bottom_y, pipe.top_height + 150.0);
        }
    }

    #[test]
    fn test_same_seed_same_pipes() {
        let mut a = playing(99);
        let mut b = playing(99);
        for _ in 0..10 {
            advance_spawner(&mut a, 1500.0);
            advance_spawner(&mut b, 1500.0);
        }
        assert_eq!(a.pipes, b.pipes);
    }
}
