use std::time::{Duration, Instant};

/// Time left to sleep so a frame that took `elapsed` lasts `target`.
///
/// Zero once the frame already overran its budget.
#[inline]
pub fn pacing_delay(target: Duration, elapsed: Duration) -> Duration {
    target.saturating_sub(elapsed)
}

/// Caps the frame rate by sleeping out the rest of each frame's budget.
#[derive(Debug, Clone)]
pub struct FramePacer {
    target: Option<Duration>,
    frame_start: Instant,
}

impl FramePacer {
    /// `fps == 0` disables pacing.
    pub fn new(fps: u32) -> Self {
        Self {
            target: (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64)),
            frame_start: Instant::now(),
        }
    }

    pub fn target(&self) -> Option<Duration> {
        self.target
    }

    /// Marks the start of a frame.
    pub fn begin(&mut self, now: Instant) {
        self.frame_start = now;
    }

    /// Delay owed at `now` for the frame begun last.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.target {
            Some(target) => pacing_delay(target, now.saturating_duration_since(self.frame_start)),
            None => Duration::ZERO,
        }
    }

    /// Sleeps out the remainder of the current frame.
    pub fn wait(&self) {
        let delay = self.remaining(Instant::now());
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Counts frames and reports the total once per elapsed second.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    window_start: Instant,
}

impl FpsCounter {
    pub fn new(start: Instant) -> Self {
        Self {
            frames: 0,
            window_start: start,
        }
    }

    /// Counts one frame; returns the frame count when a second has passed
    /// since the window opened, then starts a new window.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        if now.saturating_duration_since(self.window_start) < Duration::from_secs(1) {
            return None;
        }
        let fps = self.frames;
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── pacing ────────────────────────────────────────────────────────────

    #[test]
    fn sleeps_remainder_when_frame_is_early() {
        let target = Duration::from_millis(16);
        assert_eq!(pacing_delay(target, Duration::from_millis(10)), Duration::from_millis(6));
    }

    #[test]
    fn overrun_frames_do_not_sleep() {
        let target = Duration::from_millis(16);
        assert_eq!(pacing_delay(target, Duration::from_millis(16)), Duration::ZERO);
        assert_eq!(pacing_delay(target, Duration::from_millis(40)), Duration::ZERO);
    }

    #[test]
    fn pacer_measures_from_frame_begin() {
        let mut pacer = FramePacer::new(50);
        let start = Instant::now();
        pacer.begin(start);

        assert_eq!(pacer.target(), Some(Duration::from_millis(20)));
        assert_eq!(pacer.remaining(start + Duration::from_millis(5)), Duration::from_millis(15));
        assert_eq!(pacer.remaining(start + Duration::from_millis(25)), Duration::ZERO);
    }

    #[test]
    fn zero_fps_is_uncapped() {
        let pacer = FramePacer::new(0);
        assert_eq!(pacer.target(), None);
        assert_eq!(pacer.remaining(Instant::now()), Duration::ZERO);
    }

    // ── fps ───────────────────────────────────────────────────────────────

    #[test]
    fn fps_reported_once_per_second() {
        let start = Instant::now();
        let mut fps = FpsCounter::new(start);

        for i in 1..60 {
            assert_eq!(fps.tick(start + Duration::from_millis(i * 16)), None);
        }
        assert_eq!(fps.tick(start + Duration::from_millis(1000)), Some(60));
        assert_eq!(fps.tick(start + Duration::from_millis(1016)), None);
    }
}
