//! Timing curves
//!
//! Maps linear animation progress `t` in `[0, 1]` to eased progress.

use serde::{Deserialize, Serialize};

/// Easing function
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed
    Linear,
    /// CSS-style cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1)
    CubicBezier(f64, f64, f64, f64),
}

impl Default for Easing {
    fn default() -> Self {
        Self::inertia()
    }
}

impl Easing {
    /// Fast start, long gentle tail. Used for momentum glides.
    pub const fn inertia() -> Self {
        Easing::CubicBezier(0.0, 0.0, 0.3, 1.0)
    }

    /// CSS `ease`
    pub const fn ease() -> Self {
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0)
    }

    /// Evaluate the curve at progress `t` (clamped to `[0, 1]`)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::CubicBezier(x1, y1, x2, y2) => UnitBezier::new(x1, y1, x2, y2).solve(t),
        }
    }
}

/// Polynomial form of a unit cubic bezier
struct UnitBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl UnitBezier {
    const EPSILON: f64 = 1e-6;
    const MAX_BISECTIONS: usize = 64;

    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Find the curve parameter whose x equals `x`
    fn solve_x(&self, x: f64) -> f64 {
        // Newton's method first, it converges in a few steps for sane curves
        let mut t = x;
        for _ in 0..8 {
            let x2 = self.sample_x(t) - x;
            if x2.abs() < Self::EPSILON {
                return t;
            }
            let d = self.sample_dx(t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= x2 / d;
        }

        // Fall back to bisection
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..Self::MAX_BISECTIONS {
            let x2 = self.sample_x(t);
            if (x2 - x).abs() < Self::EPSILON {
                break;
            }
            if x > x2 {
                lo = t;
            } else {
                hi = t;
            }
            t = (hi - lo) * 0.5 + lo;
        }
        t
    }

    fn solve(&self, x: f64) -> f64 {
        self.sample_y(self.solve_x(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [Easing::Linear, Easing::inertia(), Easing::ease()] {
            assert!(easing.apply(0.0).abs() < 1e-6);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_inertia_curve_front_loaded() {
        let easing = Easing::inertia();
        // Most of the distance is covered early
        assert!(easing.apply(0.25) > 0.5);
        assert!(easing.apply(0.5) > easing.apply(0.25));
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        let easing = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for t in [0.1, 0.33, 0.5, 0.9] {
            assert!((easing.apply(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_input_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }
}
