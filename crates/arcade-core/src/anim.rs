use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Fast start, gentle landing.
    OutCubic,
    /// Gentle start, fast finish.
    InQuad,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::InQuad => t * t,
        }
    }
}

/// A single timed transition from 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(start: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            duration,
            easing,
        }
    }

    /// Linear time fraction in `[0, 1]`.
    pub fn elapsed_fraction(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        self.easing.apply(self.elapsed_fraction(now))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    pub fn end(&self) -> Instant {
        self.start + self.duration
    }
}

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Same centre, both sides multiplied by `factor`. Sizes are truncated to
    /// whole pixels.
    pub fn scaled_about_center(&self, factor: f32) -> Self {
        let (cx, cy) = self.center();
        let w = (self.w * factor).trunc();
        let h = (self.h * factor).trunc();
        Self::new(cx - w * 0.5, cy - h * 0.5, w, h)
    }

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self::new(
            mix(self.x, other.x),
            mix(self.y, other.y),
            mix(self.w, other.w),
            mix(self.h, other.h),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints_are_fixed() {
        for easing in [Easing::Linear, Easing::OutCubic, Easing::InQuad] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-3.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn out_cubic_leads_and_in_quad_lags() {
        assert!(Easing::OutCubic.apply(0.5) > 0.5);
        assert!(Easing::InQuad.apply(0.5) < 0.5);
        assert_eq!(Easing::InQuad.apply(0.5), 0.25);
        assert_eq!(Easing::OutCubic.apply(0.5), 0.875);
    }

    #[test]
    fn tween_clamps_after_duration() {
        let t0 = Instant::now();
        let tween = Tween::new(t0, Duration::from_millis(100), Easing::Linear);
        assert_eq!(tween.progress(t0), 0.0);
        assert!(!tween.is_finished(t0 + Duration::from_millis(99)));
        assert!(tween.is_finished(t0 + Duration::from_millis(100)));
        assert_eq!(tween.progress(t0 + Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn scaled_rect_keeps_its_center() {
        let rect = Rect::new(40.0, 60.0, 200.0, 262.0);
        let grown = rect.scaled_about_center(1.30);
        assert_eq!(grown.w, 260.0);
        assert_eq!(grown.h, 340.0);
        assert_eq!(grown.center(), rect.center());
    }
}
