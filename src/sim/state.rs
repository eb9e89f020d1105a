//! Game state and core simulation types
//!
//! Everything the step function reads or writes lives in [`GameState`].

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::Tuning;
use crate::error::TuningError;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Waiting for the first start command
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended (crashed into a pipe or the floor)
    GameOver,
}

/// The player's bird
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Left edge (never changes after creation)
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity, positive = falling
    pub velocity: f32,
    /// Velocity gained per tick
    pub gravity: f32,
    /// Velocity set by a flap
    pub flap_impulse: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.bird_x,
            y: tuning.bird_start_y(),
            width: tuning.bird_width,
            height: tuning.bird_height,
            velocity: 0.0,
            gravity: tuning.gravity,
            flap_impulse: tuning.flap_impulse,
        }
    }

    /// Overwrite the current velocity with the flap impulse
    pub fn flap(&mut self) {
        self.velocity = self.flap_impulse;
    }

    /// Integrate one tick and clamp at the ceiling
    pub fn fall(&mut self) {
        self.velocity += self.gravity;
        self.y += self.velocity;

        // Ceiling is solid but harmless
        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A pipe pair (top and bottom segment around a gap)
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge, decreases every tick
    pub x: f32,
    pub width: f32,
    /// Height of the top segment (= top of the gap)
    pub top_height: f32,
    /// Start of the bottom segment (= bottom of the gap)
    pub bottom_y: f32,
    /// Already counted toward the score
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f32, width: f32, top_height: f32, gap: f32) -> Self {
        Self {
            x,
            width,
            top_height,
            bottom_y: top_height + gap,
            passed: false,
        }
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap(&self) -> f32 {
        self.bottom_y - self.top_height
    }

    /// Top segment in canvas space
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top_height)
    }

    /// Bottom segment in canvas space
    pub fn bottom_rect(&self, canvas_height: f32) -> Rect {
        Rect::new(self.x, self.bottom_y, self.width, canvas_height - self.bottom_y)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Constants this session runs with
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Pipes passed this run
    pub score: u32,
    /// Player bird
    pub bird: Bird,
    /// Active pipes in spawn order (left to right on screen)
    pub pipes: Vec<Pipe>,
    /// Time accumulated toward the next spawn (ms)
    pub spawn_timer: f32,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Gap placement RNG
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh state in the `Ready` phase
    ///
    /// Fails if `tuning` does not pass [`Tuning::validate`].
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            seed,
            phase: GamePhase::Ready,
            score: 0,
            bird: Bird::new(&tuning),
            pipes: Vec::new(),
            spawn_timer: 0.0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Reset for a new run and enter `Playing`
    ///
    /// The RNG keeps its stream so consecutive runs get different pipes.
    pub fn restart(&mut self) {
        self.score = 0;
        self.bird = Bird::new(&self.tuning);
        self.pipes.clear();
        self.spawn_timer = 0.0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
    }

    /// Flap if a run is in progress
    pub fn flap(&mut self) {
        if self.phase == GamePhase::Playing {
            self.bird.flap();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_ready() {
        let state = GameState::new(Tuning::default(), 7).unwrap();
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.bird.x, 100.0);
        assert_eq!(state.bird.y, 300.0);
    }

    #[test]
    fn test_new_rejects_unusable_tuning() {
        // Gap taller than the canvas leaves no room to place it
        let tall_gap = Tuning {
            pipe_gap: 700.0,
            ..Tuning::default()
        };
        match GameState::new(tall_gap, 1) {
            Err(TuningError::Invalid { field, .. }) => assert_eq!(field, "pipe_gap"),
            other => panic!("expected invalid pipe_gap, got {other:?}"),
        }

        let lost_bird = Tuning {
            bird_x: f32::NAN,
            ..Tuning::default()
        };
        assert!(GameState::new(lost_bird, 1).is_err());
    }

    #[test]
    fn test_pipe_gap_invariant() {
        let pipe = Pipe::new(400.0, 60.0, 123.5, 150.0);
        assert_eq!(pipe.bottom_y, 273.5);
        assert_eq!(pipe.gap(), 150.0);
        assert_eq!(pipe.right(), 460.0);
        assert_eq!(pipe.bottom_rect(600.0).size.y, 326.5);
    }

    #[test]
    fn test_flap_overwrites_velocity() {
        let mut bird = Bird::new(&Tuning::default());
        bird.velocity = 7.5;
        bird.flap();
        assert_eq!(bird.velocity, -10.0);
        bird.flap();
        assert_eq!(bird.velocity, -10.0);
    }

    #[test]
    fn test_ceiling_clamp() {
        let mut bird = Bird::new(&Tuning::default());
        bird.y = 3.0;
        bird.velocity = -10.0;
        bird.fall();
        assert_eq!(bird.y, 0.0);
        assert_eq!(bird.velocity, 0.0);
    }

    #[test]
    fn test_flap_ignored_unless_playing() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.flap();
        assert_eq!(state.bird.velocity, 0.0);

        state.restart();
        state.flap();
        assert_eq!(state.bird.velocity, -10.0);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.restart();
        state.score = 12;
        state.spawn_timer = 900.0;
        state.bird.y = 470.0;
        state.bird.velocity = 8.0;
        state.pipes.push(Pipe::new(200.0, 60.0, 100.0, 150.0));
        state.phase = GamePhase::GameOver;

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.spawn_timer, 0.0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.bird, Bird::new(&Tuning::default()));
    }
}
