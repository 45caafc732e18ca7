use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

/// Lock-free view of the engine thread, read by the UI thread between
/// events.
pub struct PlaybackMetrics {
    elapsed_ms: AtomicU64,
    // 0 while the duration is unknown
    duration_ms: AtomicU64,
    ready: AtomicBool,
}

impl PlaybackMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(PlaybackMetrics {
            elapsed_ms: AtomicU64::new(0),
            duration_ms: AtomicU64::new(0),
            ready: AtomicBool::new(false),
        })
    }

    pub fn get_elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms.load(Ordering::Relaxed))
    }

    pub fn get_duration(&self) -> Option<Duration> {
        match self.duration_ms.load(Ordering::Relaxed) {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn set_elapsed(&self, d: Duration) {
        self.elapsed_ms
            .store(d.as_millis() as u64, Ordering::Relaxed)
    }

    pub fn set_duration(&self, d: Option<Duration>) {
        let ms = d.map_or(0, |d| d.as_millis() as u64);
        self.duration_ms.store(ms, Ordering::Relaxed)
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Release)
    }

    /// Forget everything about the previous source.
    pub fn reset(&self) {
        self.set_ready(false);
        self.set_elapsed(Duration::ZERO);
        self.set_duration(None);
    }
}
