//! Fire-once timer for the "recent key press" window

use std::time::{Duration, Instant};

/// Window during which a navigation key press counts as recent
pub const RECENT_KEY_WINDOW: Duration = Duration::from_millis(1000);

/// Arm/reset/fire-once timer driven by explicit timestamps
#[derive(Debug, Clone)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(RECENT_KEY_WINDOW)
    }
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Start or restart the window at `now`
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Cancel without firing
    pub fn reset(&mut self) {
        self.deadline = None;
    }

    /// Whether the window is still open at `now`
    pub fn is_pending(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    /// Returns true exactly once, at the first poll after the window closes
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
