//! Delays chunk-load passes until pointer motion settles.

use std::time::{Duration, Instant};

/// Single pending deadline. Rescheduling replaces it, so only the last
/// request fires.
#[derive(Debug, Clone)]
pub struct LoadDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl LoadDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// `true` once, when the pending deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
