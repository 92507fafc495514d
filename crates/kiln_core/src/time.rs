//! Per-frame timing fed by backend timestamps.
//!
//! Backends read their own clock (`Instant`, SDL ticks, `performance.now()`)
//! and pass seconds to [`FrameClock::tick`], which keeps this type usable on
//! targets without `std::time::Instant`.

const FPS_SAMPLE_COUNT: usize = 60;

pub struct FrameClock {
    /// Upper bound for `real_dt`, so a stall does not produce one huge step.
    pub max_dt: f64,
    pub real_dt: f64,
    pub total_time: f64,
    pub frame_count: u64,
    last_timestamp: Option<f64>,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            max_dt: 0.25,
            real_dt: 0.0,
            total_time: 0.0,
            frame_count: 0,
            last_timestamp: None,
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    /// Starts a frame at `now` seconds. The first frame has a zero delta.
    pub fn tick(&mut self, now: f64) {
        self.real_dt = match self.last_timestamp {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now);

        if self.real_dt > self.max_dt {
            log::warn!(
                "Frame took {:.1}ms, clamping delta to {}ms",
                self.real_dt * 1000.0,
                self.max_dt * 1000.0
            );
            self.real_dt = self.max_dt;
        }

        self.total_time += self.real_dt;
        self.frame_count += 1;

        if self.frame_count > 1 {
            self.fps_samples[self.fps_sample_index] = self.real_dt;
            self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        }
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
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
    fn test_first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        assert_eq!(clock.real_dt, 0.0);
        assert_eq!(clock.frame_count, 1);
        assert!((clock.smoothed_fps - 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_delta_between_ticks() {
        let mut clock = FrameClock::new();
        clock.tick(1.0);
        clock.tick(1.02);
        assert!((clock.real_dt - 0.02).abs() < 1e-9);
        assert!((clock.total_time - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(5.0);
        assert_eq!(clock.real_dt, clock.max_dt);
    }

    #[test]
    fn test_backwards_timestamp_is_zero_delta() {
        let mut clock = FrameClock::new();
        clock.tick(2.0);
        clock.tick(1.5);
        assert_eq!(clock.real_dt, 0.0);
    }

    #[test]
    fn test_smoothed_fps_converges() {
        let mut clock = FrameClock::new();
        let mut now = 0.0;
        for _ in 0..=FPS_SAMPLE_COUNT {
            clock.tick(now);
            now += 1.0 / 30.0;
        }
        assert!((clock.smoothed_fps - 30.0).abs() < 0.01);
        assert!((clock.smoothed_frame_time_ms - 33.333).abs() < 0.01);
    }
}
