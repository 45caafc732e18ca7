use std::time::{Duration, Instant};

/// Collapses a burst of resize events into one.
///
/// Every `push` restarts the quiet period; `poll` yields the most recent
/// width once the period has elapsed, and only once.
pub struct ResizeDebouncer {
    quiet: Duration,
    pending: Option<(u32, Instant)>,
}

impl ResizeDebouncer {
    pub fn new(quiet: Duration) -> Self {
        ResizeDebouncer {
            quiet,
            pending: None,
        }
    }

    pub fn push(&mut self, width: u32, now: Instant) {
        self.pending = Some((width, now));
    }

    pub fn poll(&mut self, now: Instant) -> Option<u32> {
        match self.pending {
            Some((width, at)) if now.saturating_duration_since(at) >= self.quiet => {
                self.pending = None;
                Some(width)
            }
            _ => None,
        }
    }
}
