use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds (clamped).
    pub dt: f32,

    /// Time elapsed since the clock was created or reset, in seconds.
    ///
    /// Unclamped; drives animations that must not drift after stalls.
    pub elapsed: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Produces `FrameTime` snapshots, one per presented frame.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// feed a huge step into per-frame updates.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets both the delta baseline and the elapsed origin.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last = now;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_counts_up_from_zero() {
        let mut clock = FrameClock::new();
        let base = clock.start;
        assert_eq!(clock.tick_at(base).frame_index, 0);
        assert_eq!(clock.tick_at(base).frame_index, 1);
        assert_eq!(clock.tick_at(base).frame_index, 2);
    }

    #[test]
    fn dt_is_clamped_low() {
        let mut clock = FrameClock::new();
        let base = clock.start;
        let ft = clock.tick_at(base);
        assert!((ft.dt - 0.0001).abs() < 1e-7);
    }

    #[test]
    fn dt_is_clamped_high_but_elapsed_is_not() {
        let mut clock = FrameClock::new();
        let base = clock.start;
        let ft = clock.tick_at(base + Duration::from_secs(5));
        assert!((ft.dt - 0.25).abs() < 1e-6);
        assert!((ft.elapsed - 5.0).abs() < 1e-6);
    }

    #[test]
    fn custom_clamps_apply() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(10), Duration::from_millis(20));
        let base = clock.start;
        let ft = clock.tick_at(base + Duration::from_millis(15));
        assert!((ft.dt - 0.015).abs() < 1e-6);
    }
}
