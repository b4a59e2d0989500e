use std::f64::consts::PI;

use crate::api::types::FrameTick;

/// Common period of every time-driven oscillation in the scene
/// (`sin(2e)`, `sin(e)`, `sin/cos(0.5e)`, `sin(0.4e)`).
/// Ticks carry elapsed time modulo this so the f32 phase never loses precision.
pub const PHASE_PERIOD: f64 = 20.0 * PI;

/// Frame clock.
/// Turns raw host frame deltas into the `FrameTick` every controller reads.
pub struct FrameClock {
    /// Seconds since the first frame.
    elapsed: f64,
    /// Largest delta passed on to controllers.
    max_delta: f32,
    /// Number of frames accumulated so far.
    frames: u64,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            elapsed: 0.0,
            max_delta: if max_delta > 0.0 { max_delta } else { f32::MAX },
            frames: 0,
        }
    }

    /// Add frame time and return this frame's tick.
    /// Negative or non-finite deltas count as 0 so elapsed never runs backwards.
    pub fn accumulate(&mut self, frame_dt: f32) -> FrameTick {
        let delta = if frame_dt.is_finite() && frame_dt > 0.0 {
            frame_dt.min(self.max_delta)
        } else {
            0.0
        };
        self.elapsed += f64::from(delta);
        self.frames += 1;
        FrameTick::new(self.phase(), delta)
    }

    /// Elapsed time wrapped into `[0, PHASE_PERIOD)`.
    pub fn phase(&self) -> f32 {
        (self.elapsed % PHASE_PERIOD) as f32
    }

    /// Total seconds since the first frame.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_elapsed() {
        let mut clock = FrameClock::new(0.25);
        clock.accumulate(0.016);
        let tick = clock.accumulate(0.016);
        assert!((tick.elapsed - 0.032).abs() < 1e-6);
        assert_eq!(tick.delta, 0.016);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn first_frame_may_be_zero() {
        let mut clock = FrameClock::new(0.25);
        let tick = clock.accumulate(0.0);
        assert_eq!(tick, FrameTick::new(0.0, 0.0));
    }

    #[test]
    fn caps_stalled_frames() {
        let mut clock = FrameClock::new(0.25);
        let tick = clock.accumulate(5.0); // tab was in the background
        assert_eq!(tick.delta, 0.25);
        assert_eq!(clock.elapsed(), 0.25);
    }

    #[test]
    fn rejects_bad_deltas() {
        let mut clock = FrameClock::new(0.25);
        clock.accumulate(0.1);
        for bad in [-1.0, f32::NAN, f32::INFINITY] {
            let tick = clock.accumulate(bad);
            assert_eq!(tick.delta, 0.0);
            assert!((tick.elapsed - 0.1).abs() < 1e-6);
        }
    }

    #[test]
    fn non_positive_cap_disables_capping() {
        let mut clock = FrameClock::new(0.0);
        assert_eq!(clock.accumulate(3.0).delta, 3.0);
    }

    #[test]
    fn keeps_ticking_after_a_week() {
        let mut clock = FrameClock::new(0.25);
        clock.elapsed = 7.0 * 86_400.0;
        let dt = 1.0 / 60.0;
        let a = clock.accumulate(dt);
        let b = clock.accumulate(dt);
        assert!((clock.elapsed() - (7.0 * 86_400.0 + 2.0 * f64::from(dt))).abs() < 1e-6);
        assert!((b.elapsed - a.elapsed - dt).abs() < 1e-4);
        assert!((0.0..PHASE_PERIOD as f32).contains(&b.elapsed));
    }

    #[test]
    fn phase_wraps_at_period() {
        let mut clock = FrameClock::new(0.0);
        clock.elapsed = PHASE_PERIOD - 0.5;
        let tick = clock.accumulate(1.0);
        assert!((tick.elapsed - 0.5).abs() < 1e-4);
        assert!(clock.elapsed() > PHASE_PERIOD);
    }
}
