//! Frame loop driver
//!
//! Owns the session state and the single outstanding frame request. Every
//! frame: compute dt from the host timestamp, tick, draw, and request the
//! next frame while the run is still going.
//!
//! Starting (or restarting) always cancels the outstanding request first, so
//! two loops can never run at once. A callback the host already delivered
//! cannot be cancelled, so frames also carry the handle that fired and only
//! the live request is honoured.

use crate::highscores::BestScore;
use crate::platform::{Command, FrameScheduler, Signal, command_for};
use crate::renderer::{Canvas2d, draw};
use crate::sim::{GameState, TickReport, tick};

/// Result of delivering one frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not the pending request (cancelled or stale callback); nothing happened
    Ignored,
    /// Ticked and drew; the next frame is requested
    Continue(TickReport),
    /// Ticked and drew; the run is over and the loop has stopped
    Finished(TickReport),
}

/// Drives the simulation from host frame callbacks
pub struct LoopDriver<S: FrameScheduler> {
    state: GameState,
    scheduler: S,
    /// The one outstanding frame request, if running
    pending: Option<S::Handle>,
    /// Timestamp of the previous frame this run (ms)
    last_timestamp: Option<f64>,
}

impl<S: FrameScheduler> LoopDriver<S> {
    pub fn new(state: GameState, scheduler: S) -> Self {
        Self {
            state,
            scheduler,
            pending: None,
            last_timestamp: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Whether a frame is currently requested
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a new run (first run or restart)
    pub fn start(&mut self) {
        self.cancel();
        self.state.restart();
        self.last_timestamp = None;
        log::info!("Run started (seed {})", self.state.seed);
        self.schedule();
    }

    /// Flap, if a run is in progress
    pub fn flap(&mut self) {
        self.state.flap();
    }

    /// Handle a raw input signal. Returns the command it mapped to.
    pub fn activate(&mut self, signal: Signal<'_>) -> Option<Command> {
        let command = command_for(signal, self.state.phase)?;
        match command {
            Command::Flap => self.flap(),
            Command::Start => self.start(),
        }
        Some(command)
    }

    /// Stop scheduling (host teardown). State is left as is.
    pub fn stop(&mut self) {
        self.cancel();
    }

    /// Deliver the callback for request `handle` with the host timestamp (ms)
    pub fn frame<C: Canvas2d + ?Sized>(
        &mut self,
        handle: S::Handle,
        timestamp: f64,
        best: &mut BestScore,
        canvas: &mut C,
    ) -> FrameOutcome {
        if self.pending != Some(handle) {
            log::trace!(
                "Ignoring frame {handle:?} at {timestamp}: pending is {:?}",
                self.pending
            );
            return FrameOutcome::Ignored;
        }
        self.pending = None;

        // First frame of a run has no reference point
        let dt = match self.last_timestamp {
            Some(prev) => (timestamp - prev).max(0.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);

        let report = tick(&mut self.state, best, dt);
        draw(&self.state, canvas);

        if self.state.is_playing() {
            self.schedule();
            FrameOutcome::Continue(report)
        } else {
            FrameOutcome::Finished(report)
        }
    }

    /// Draw the current state without advancing it
    pub fn redraw<C: Canvas2d + ?Sized>(&self, canvas: &mut C) {
        draw(&self.state, canvas);
    }

    fn schedule(&mut self) {
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Host refused a frame request; loop stalled");
        }
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::platform::ManualScheduler;
    use crate::renderer::CommandList;
    use crate::sim::{GamePhase, Pipe};

    const FRAME_MS: f64 = 16.0;

    fn driver() -> LoopDriver<ManualScheduler> {
        LoopDriver::new(
            GameState::new(Tuning::default(), 77).unwrap(),
            ManualScheduler::new(),
        )
    }

    /// Fire the pending request like a host would
    fn pump(
        driver: &mut LoopDriver<ManualScheduler>,
        t: f64,
        best: &mut BestScore,
        canvas: &mut CommandList,
    ) -> FrameOutcome {
        let handle = driver.scheduler_mut().fire().expect("a frame was requested");
        driver.frame(handle, t, best, canvas)
    }

    #[test]
    fn test_idle_until_started() {
        let mut d = driver();
        let mut best = BestScore::new();
        let mut canvas = CommandList::new();
        assert!(!d.is_running());
        assert_eq!(d.scheduler().pending(), 0);
        assert_eq!(d.frame(1, 0.0, &mut best, &mut canvas), FrameOutcome::Ignored);
        assert_eq!(d.state().phase, GamePhase::Ready);
        assert_eq!(canvas.frames, 0);
    }

    #[test]
    fn test_start_requests_one_frame() {
        let mut d = driver();
        d.start();
        assert!(d.is_running());
        assert_eq!(d.state().phase, GamePhase::Playing);
        assert_eq!(d.scheduler().pending(), 1);
    }

    #[test]
    fn test_rapid_restarts_never_stack_loops() {
        let mut d = driver();
        for _ in 0..10 {
            d.start();
        }
        assert_eq!(d.scheduler().pending(), 1);
        assert_eq!(d.scheduler().requested(), 10);
        assert_eq!(d.scheduler().cancelled(), 9);
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut d = driver();
        let mut best = BestScore::new();
        let mut canvas = CommandList::new();
        d.start();

        // A huge first timestamp must not feed the spawn timer
        let outcome = pump(&mut d, 1_000_000.0, &mut best, &mut canvas);
        assert!(matches!(outcome, FrameOutcome::Continue(_)));
        assert_eq!(d.state().spawn_timer, 0.0);
        assert!(d.state().pipes.is_empty());

        pump(&mut d, 1_000_016.0, &mut best, &mut canvas);
        assert_eq!(d.state().spawn_timer, 16.0);
        assert_eq!(canvas.frames, 2);
    }

    #[test]
    fn test_each_frame_ticks_and_draws_once() {
        let mut d = driver();
        let mut best = BestScore::new();
        let mut canvas = CommandList::new();
        d.start();
        for i in 0..10 {
            pump(&mut d, i as f64 * FRAME_MS, &mut best, &mut canvas);
            assert_eq!(d.scheduler().pending(), 1);
        }
        assert_eq!(d.state().time_ticks, 10);
        assert_eq!(canvas.frames, 10);
    }

    #[test]
    fn test_free_fall_stops_the_loop() {
        let mut d = driver();
        let mut best = BestScore::new();
        best.record(2);
        let mut canvas = CommandList::new();
        d.start();

        let mut last_y = d.state().bird.y;
        let mut finished_at = None;
        for i in 0..100 {
            match pump(&mut d, i as f64 * FRAME_MS, &mut best, &mut canvas) {
                FrameOutcome::Continue(_) => {
                    assert!(d.state().bird.y > last_y);
                    last_y = d.state().bird.y;
                }
                FrameOutcome::Finished(report) => {
                    assert!(report.crash.is_some());
                    finished_at = Some(i);
                    break;
                }
                FrameOutcome::Ignored => panic!("frame {i} was pending"),
            }
        }

        assert_eq!(finished_at, Some(32));
        assert_eq!(d.state().phase, GamePhase::GameOver);
        assert!(!d.is_running());
        assert_eq!(d.scheduler().pending(), 0);
        assert_eq!(best.get(), 2);

        // Stale callbacks after the end change nothing
        let ticks = d.state().time_ticks;
        assert_eq!(
            d.frame(33, 9999.0, &mut best, &mut canvas),
            FrameOutcome::Ignored
        );
        assert_eq!(d.state().time_ticks, ticks);
    }

    #[test]
    fn test_cancelled_frame_is_ignored() {
        let mut d = driver();
        let mut best = BestScore::new();
        let mut canvas = CommandList::new();
        d.start();
        d.stop();
        assert!(!d.is_running());
        assert_eq!(d.scheduler().pending(), 0);
        assert_eq!(d.frame(1, 16.0, &mut best, &mut canvas), FrameOutcome::Ignored);
        assert_eq!(d.state().time_ticks, 0);
    }

    #[test]
    fn test_callback_delivered_across_restart_is_ignored() {
        let mut d = driver();
        let mut best = BestScore::new();
        let mut canvas = CommandList::new();
        d.start();
        // Host has already dispatched the first request...
        let fired = d.scheduler_mut().fire().unwrap();
        // ...when a restart lands; there is nothing left to cancel
        d.start();
        assert_eq!(d.scheduler().cancelled(), 0);
        assert_eq!(d.scheduler().pending(), 1);

        assert_eq!(
            d.frame(fired, 16.0, &mut best, &mut canvas),
            FrameOutcome::Ignored
        );
        assert_eq!(d.state().time_ticks, 0);
        assert_eq!(canvas.frames, 0);
        assert!(d.is_running());
        assert_eq!(d.scheduler().pending(), 1);

        // The live request still drives the new run
        let outcome = pump(&mut d, 32.0, &mut best, &mut canvas);
        assert!(matches!(outcome, FrameOutcome::Continue(_)));
        assert_eq!(d.state().time_ticks, 1);
        assert_eq!(d.scheduler().pending(), 1);
    }

    #[test]
    fn test_activate_maps_by_phase() {
        let mut d = driver();
        let mut best = BestScore::new();
        let mut canvas = CommandList::new();

        assert_eq!(d.activate(Signal::Key("KeyX")), None);
        assert_eq!(d.state().phase, GamePhase::Ready);

        assert_eq!(d.activate(Signal::Key("Space")), Some(Command::Start));
        assert_eq!(d.state().phase, GamePhase::Playing);

        pump(&mut d, 0.0, &mut best, &mut canvas);
        assert_eq!(d.activate(Signal::PointerDown), Some(Command::Flap));
        assert_eq!(d.state().bird.velocity, -10.0);
        assert_eq!(d.scheduler().pending(), 1);
    }

    #[test]
    fn test_restart_after_game_over_resets_everything() {
        let mut d = LoopDriver::new(
            GameState::new(
                Tuning {
                    gravity: 0.0,
                    ..Tuning::default()
                },
                1,
            )
            .unwrap(),
            ManualScheduler::new(),
        );
        let mut best = BestScore::new();
        let mut canvas = CommandList::new();
        d.start();
        d.state.score = 5;
        d.state.spawn_timer = 700.0;
        // Bottom segment right in front of the bird
        d.state.pipes.push(Pipe::new(120.0, 60.0, 50.0, 150.0));

        let outcome = pump(&mut d, 0.0, &mut best, &mut canvas);
        assert!(matches!(outcome, FrameOutcome::Finished(_)));
        assert_eq!(best.get(), 5);

        assert_eq!(d.activate(Signal::TouchStart), Some(Command::Start));
        let state = d.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.spawn_timer, 0.0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.bird.y, 300.0);
        assert_eq!(state.bird.velocity, 0.0);
        assert_eq!(d.scheduler().pending(), 1);
        // Best survives the restart
        assert_eq!(best.get(), 5);
    }

    #[test]
    fn test_redraw_does_not_tick() {
        let d = driver();
        let mut canvas = CommandList::new();
        d.redraw(&mut canvas);
        assert_eq!(canvas.frames, 1);
        assert_eq!(d.state().time_ticks, 0);
    }
}
