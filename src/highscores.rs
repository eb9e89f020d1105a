//! Session best score
//!
//! Lives for the process lifetime only. Owned by the top-level game and
//! handed to the loop by `&mut`.

/// Best score seen since the process started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    best: u32,
}

impl BestScore {
    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Current best
    pub fn get(&self) -> u32 {
        self.best
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Fold a finished run into the best (`best = max(best, score)`)
    ///
    /// Returns true if the score set a new best.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }
}
