use std::time::{Duration, Instant};

use tachyonfx::Interpolation;

/// Default length of the chart entrance animation.
pub const ENTRANCE_DURATION: Duration = Duration::from_millis(2000);

const EASING: Interpolation = Interpolation::CubicInOut;

/// A timed interpolation between two values.
///
/// Until `start` is called the tween sits at `from`. Time is passed in by the
/// caller, so the same tween can be driven by the render loop or by tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    started: Option<Instant>,
}

impl Tween {
    pub const fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            started: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Jump back to `from` without animating.
    pub fn reset(&mut self) {
        self.started = None;
    }

    pub const fn is_started(&self) -> bool {
        self.started.is_some()
    }

    /// Eased completion in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }

        let linear = now.saturating_duration_since(started).as_secs_f64()
            / self.duration.as_secs_f64();
        if linear >= 1.0 {
            return 1.0;
        }
        #[allow(clippy::cast_possible_truncation)]
        let eased = EASING.alpha(linear as f32);
        f64::from(eased).clamp(0.0, 1.0)
    }

    pub fn value(&self, now: Instant) -> f64 {
        self.from + (self.to - self.from) * self.progress(now)
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.is_started() && self.progress(now) < 1.0
    }
}
