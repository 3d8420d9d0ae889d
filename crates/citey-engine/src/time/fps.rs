use std::time::{Duration, Instant};

/// Counts presented frames and reports the count once per window.
///
/// `record` returns `Some(frames)` on the first call at least one window after
/// the previous report, then starts a new window.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window_start: Instant,
    window: Duration,
    frames: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(1))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window_start: Instant::now(),
            window,
            frames: 0,
        }
    }

    /// Records one frame presented at `now`.
    pub fn record(&mut self, now: Instant) -> Option<u32> {
        if now.saturating_duration_since(self.window_start) >= self.window {
            let fps = self.frames;
            self.frames = 0;
            self.window_start = now;
            Some(fps)
        } else {
            self.frames += 1;
            None
        }
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
