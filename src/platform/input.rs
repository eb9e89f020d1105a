//! Input mapping
//!
//! The game has a single "activate" signal (space bar, click, tap). What it
//! does depends on the phase: flap during a run, start/restart otherwise.

use crate::sim::GamePhase;

/// Raw input from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal<'a> {
    /// Key press, by `KeyboardEvent.code` (e.g. "Space")
    Key(&'a str),
    /// Mouse button press on the canvas
    PointerDown,
    /// Touch start on the canvas
    TouchStart,
}

/// Game command produced by an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Set the bird's velocity to the flap impulse
    Flap,
    /// Start a new run (first run or restart)
    Start,
}

impl Signal<'_> {
    /// Whether this is the activate signal
    pub fn is_activate(&self) -> bool {
        match self {
            Signal::Key(code) => *code == "Space",
            Signal::PointerDown | Signal::TouchStart => true,
        }
    }
}

/// Map a signal to a command for the current phase; `None` means ignore it
pub fn command_for(signal: Signal<'_>, phase: GamePhase) -> Option<Command> {
    if !signal.is_activate() {
        return None;
    }
    Some(match phase {
        GamePhase::Playing => Command::Flap,
        GamePhase::Ready | GamePhase::GameOver => Command::Start,
    })
}
