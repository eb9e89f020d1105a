//! Manually pumped frame scheduler
//!
//! Used natively (headless runner) and in tests: requests are recorded and
//! the caller decides when to deliver them.

use super::FrameScheduler;

/// Scheduler whose frames are delivered by the caller
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<u64>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet delivered or cancelled
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Total requests made
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total requests withdrawn
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }

    /// Pop the oldest pending request, as if its callback fired now
    pub fn fire(&mut self) -> Option<u64> {
        if self.pending.is_empty() {
            return None;
        }
        Some(self.pending.remove(0))
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        self.next_id += 1;
        self.requested += 1;
        self.pending.push(self.next_id);
        Some(self.next_id)
    }

    fn cancel_frame(&mut self, handle: u64) {
        if let Some(i) = self.pending.iter().position(|&id| id == handle) {
            self.pending.remove(i);
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_fire_cancel() {
        let mut sched = ManualScheduler::new();
        let a = sched.request_frame().unwrap();
        let b = sched.request_frame().unwrap();
        assert_ne!(a, b);
        assert_eq!(sched.pending(), 2);

        sched.cancel_frame(a);
        assert_eq!(sched.pending(), 1);
        assert_eq!(sched.cancelled(), 1);

        // Cancelling twice is harmless
        sched.cancel_frame(a);
        assert_eq!(sched.cancelled(), 1);

        assert_eq!(sched.fire(), Some(b));
        assert_eq!(sched.fire(), None);
        assert_eq!(sched.requested(), 2);
    }
}
