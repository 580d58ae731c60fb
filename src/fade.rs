// Opacity transition run by a revealed card (1 -> 0 over half a second).

use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicBezier {
    a1: f64,
    b1: f64,
    c1: f64,
    a2: f64,
    b2: f64,
    c2: f64,
}

const EPSILON: f64 = 1.0e-6;

impl CubicBezier {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            a1: 3.0 * x1 - 3.0 * x2 + 1.0,
            b1: -6.0 * x1 + 3.0 * x2,
            c1: 3.0 * x1,
            a2: 3.0 * y1 - 3.0 * y2 + 1.0,
            b2: -6.0 * y1 + 3.0 * y2,
            c2: 3.0 * y1,
        }
    }

    fn x_t(&self, t: f64) -> f64 {
        ((self.a1 * t + self.b1) * t + self.c1) * t
    }

    fn y_t(&self, t: f64) -> f64 {
        ((self.a2 * t + self.b2) * t + self.c2) * t
    }

    fn dx_t(&self, t: f64) -> f64 {
        (3.0 * self.a1 * t + 2.0 * self.b1) * t + self.c1
    }

    pub fn apply(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        } else if x >= 1.0 {
            return 1.0;
        }

        // Newton first, bisection if the slope flattens out
        let mut t = x;
        for _ in 0..8 {
            let d = self.x_t(t) - x;
            if d.abs() < EPSILON {
                return self.y_t(t);
            }
            let dx = self.dx_t(t);
            if dx.abs() < EPSILON {
                break;
            }
            t -= d / dx;
        }

        let (mut t0, mut t1) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let x2 = self.x_t(t);
            if (x2 - x).abs() < EPSILON {
                break;
            }
            if x > x2 {
                t0 = t;
            } else {
                t1 = t;
            }
            t = (t0 + t1) * 0.5;
        }
        self.y_t(t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    CubicBezier(CubicBezier),
}

impl Easing {
    /// CSS `ease`.
    pub fn ease() -> Self {
        Self::CubicBezier(CubicBezier::new(0.25, 0.1, 0.25, 1.0))
    }

    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::EaseIn => x * x,
            Self::EaseOut => x * (2.0 - x),
            Self::CubicBezier(b) => b.apply(x),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Fade {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Fade {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self { from, to, duration, elapsed: Duration::ZERO, easing }
    }

    /// The reveal fade: fully visible to invisible.
    pub fn out(duration: Duration) -> Self {
        Self::new(1.0, 0.0, duration, Easing::ease())
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn value(&self) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let x = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let k = self.easing.apply(x.clamp(0.0, 1.0)) as f32;
        self.from + (self.to - self.from) * k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints_and_midpoint() {
        let e = Easing::ease();
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
        // CSS `ease` is well past halfway at x = 0.5
        let mid = e.apply(0.5);
        assert!((mid - 0.8024).abs() < 0.01, "got {mid}");
    }

    #[test]
    fn test_fade_out_is_monotonic() {
        let mut fade = Fade::out(Duration::from_millis(500));
        assert_eq!(fade.value(), 1.0);
        let mut last = fade.value();
        for _ in 0..10 {
            fade.advance(Duration::from_millis(50));
            let v = fade.value();
            assert!(v <= last + 1e-6);
            last = v;
        }
        assert!(fade.is_done());
        assert_eq!(fade.value(), 0.0);
    }

    #[test]
    fn test_zero_duration_jumps_to_end() {
        let fade = Fade::out(Duration::ZERO);
        assert!(fade.is_done());
        assert_eq!(fade.value(), 0.0);
    }
}
