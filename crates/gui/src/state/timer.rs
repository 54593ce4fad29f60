//! Single-outstanding timers driven by an injected clock.
//!
//! The UI loop calls `poll(now)` every frame; tests pass synthetic instants.

use std::time::{Duration, Instant};

/// How long the "added to cart" tip stays up
pub const ADDED_TO_CART_DURATION: Duration = Duration::from_secs(3);

/// One pending deadline at most. Scheduling again replaces the previous one.
#[derive(Debug, Clone)]
pub struct CancellableTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl CancellableTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending deadline and start a new one from `now`
    pub fn schedule(&mut self, now: Instant) {
        self.cancel();
        self.deadline = Some(now + self.delay);
    }

    /// Returns true if a deadline was pending
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline (zero once it has passed)
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Fires exactly once when `now` reaches the deadline
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// A boolean UI flag that clears itself after a fixed delay
#[derive(Debug, Clone)]
pub struct TransientFlag {
    visible: bool,
    timer: CancellableTimer,
}

impl TransientFlag {
    pub fn new(duration: Duration) -> Self {
        Self {
            visible: false,
            timer: CancellableTimer::new(duration),
        }
    }

    /// Show the flag and (re)start its auto-clear timer
    pub fn raise(&mut self, now: Instant) {
        self.visible = true;
        self.timer.schedule(now);
    }

    /// Hide immediately and drop the pending clear
    pub fn dismiss(&mut self) {
        self.visible = false;
        self.timer.cancel();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Returns true on the clear event
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.timer.poll(now) {
            self.visible = false;
            true
        } else {
            false
        }
    }
}

impl Default for TransientFlag {
    fn default() -> Self {
        Self::new(ADDED_TO_CART_DURATION)
    }
}
