//! Frame pacing
//!
//! Keeps the loop at a fixed frame rate by handing out deadlines for
//! `ControlFlow::WaitUntil`.

use std::time::{Duration, Instant};

/// Fixed-rate frame scheduler
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame_duration: Duration,
    next_deadline: Instant,
}

impl FramePacer {
    /// Pacer whose first frame is due now
    pub fn new(fps: u32) -> Self {
        Self::starting_at(fps, Instant::now())
    }

    /// Pacer whose first frame is due at `start`
    pub fn starting_at(fps: u32, start: Instant) -> Self {
        Self {
            frame_duration: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            next_deadline: start,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// When the next frame should start
    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_deadline
    }

    /// Record that a frame started at `now` and schedule the next one.
    ///
    /// Deadlines advance in fixed steps; after a stall the schedule restarts
    /// from `now` instead of bursting to catch up.
    pub fn frame_started(&mut self, now: Instant) {
        let next = self.next_deadline + self.frame_duration;
        self.next_deadline = if next <= now { now + self.frame_duration } else { next };
    }
}

/// Measures the achieved frame rate over one-second windows
#[derive(Debug, Clone)]
pub struct FrameCounter {
    window_start: Instant,
    frames: u32,
}

impl FrameCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
        }
    }

    /// Count a frame; returns the frame rate when a window closes
    pub fn record(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        if elapsed < Duration::from_secs(1) {
            return None;
        }
        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.window_start = now;
        self.frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_due_immediately() {
        let start = Instant::now();
        let pacer = FramePacer::starting_at(60, start);
        assert!(pacer.is_due(start));
        assert_eq!(pacer.next_deadline(), start);
    }

    #[test]
    fn test_frame_duration() {
        let pacer = FramePacer::new(60);
        let micros = pacer.frame_duration().as_micros();
        assert!((16_666..=16_667).contains(&micros));
        assert_eq!(FramePacer::new(0).frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_deadlines_advance_in_fixed_steps() {
        let start = Instant::now();
        let mut pacer = FramePacer::starting_at(50, start);
        let step = Duration::from_millis(20);

        pacer.frame_started(start);
        assert_eq!(pacer.next_deadline(), start + step);
        assert!(!pacer.is_due(start + Duration::from_millis(10)));

        // A slightly late frame does not shift the schedule
        pacer.frame_started(start + step + Duration::from_millis(3));
        assert_eq!(pacer.next_deadline(), start + step * 2);
    }

    #[test]
    fn test_stall_restarts_schedule() {
        let start = Instant::now();
        let mut pacer = FramePacer::starting_at(50, start);
        let late = start + Duration::from_millis(500);
        pacer.frame_started(late);
        assert_eq!(pacer.next_deadline(), late + Duration::from_millis(20));
    }

    #[test]
    fn test_frame_counter_reports_once_per_second() {
        let start = Instant::now();
        let mut counter = FrameCounter::new(start);
        for i in 1..60 {
            assert_eq!(counter.record(start + Duration::from_millis(i * 16)), None);
        }
        let fps = counter.record(start + Duration::from_millis(1000)).unwrap();
        assert!((fps - 60.0).abs() < 0.01);
        assert_eq!(counter.record(start + Duration::from_millis(1016)), None);
    }
}
