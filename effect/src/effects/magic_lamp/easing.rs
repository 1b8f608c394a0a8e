//! Easing curves shaping the lamp deformation.
//!
//! All curves are pure functions of progress: they map [0, 1] to [0, 1] with
//! `f(0) = 0` and `f(1) = 1`. The polynomial, sine, circular, and bounce
//! variants are the canonical in-out easing definitions. The bezier variant
//! is a fixed cubic bezier solved numerically; when it shapes the lamp neck,
//! an input of 0 corresponds to the window edge farthest from the icon and 1
//! to the closest edge.

use crate::config::ShapeCurve;

// ============================================================================
// Constants
// ============================================================================

/// First bezier control point.
const BEZIER_X1: f64 = 0.3;
const BEZIER_Y1: f64 = 0.0;

/// Second bezier control point.
const BEZIER_X2: f64 = 0.7;
const BEZIER_Y2: f64 = 1.0;

/// Convergence threshold for the bezier parameter search.
const BEZIER_EPSILON: f64 = 1e-7;

/// Newton-Raphson iterations before falling back to bisection.
const NEWTON_ITERATIONS: u32 = 8;

/// Bisection iterations. Halving 20 times brings the bracket below 1e-6.
const BISECTION_ITERATIONS: u32 = 20;

// ============================================================================
// Easing Functions
// ============================================================================

/// Linear interpolation between two values.
#[inline]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 { (end - start).mul_add(t, start) }

/// Quadratic ease in and out.
#[inline]
pub fn in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
    }
}

/// Cubic ease in and out.
#[inline]
pub fn in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
    }
}

/// Quartic ease in and out.
#[inline]
pub fn in_out_quart(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t.powi(4)
    } else {
        1.0 - (-2.0f64).mul_add(t, 2.0).powi(4) / 2.0
    }
}

/// Quintic ease in and out.
#[inline]
pub fn in_out_quint(t: f64) -> f64 {
    if t < 0.5 {
        16.0 * t.powi(5)
    } else {
        1.0 - (-2.0f64).mul_add(t, 2.0).powi(5) / 2.0
    }
}

/// Sinusoidal ease in and out.
#[inline]
pub fn in_out_sine(t: f64) -> f64 { (std::f64::consts::PI * t).cos().mul_add(-0.5, 0.5) }

/// Circular ease in and out.
#[inline]
pub fn in_out_circ(t: f64) -> f64 {
    if t < 0.5 {
        let inner = 2.0 * t;
        (1.0 - inner.mul_add(-inner, 1.0).max(0.0).sqrt()) / 2.0
    } else {
        let inner = (-2.0f64).mul_add(t, 2.0);
        (inner.mul_add(-inner, 1.0).max(0.0).sqrt() + 1.0) / 2.0
    }
}

/// Bouncing ease out, the canonical four-segment parabola chain.
#[inline]
pub fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        (N1 * t).mul_add(t, 0.75)
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        (N1 * t).mul_add(t, 0.9375)
    } else {
        let t = t - 2.625 / D1;
        (N1 * t).mul_add(t, 0.984_375)
    }
}

/// Bouncing ease in and out.
#[inline]
pub fn in_out_bounce(t: f64) -> f64 {
    if t < 0.5 {
        (1.0 - bounce_out(2.0f64.mul_add(-t, 1.0))) / 2.0
    } else {
        (1.0 + bounce_out(2.0f64.mul_add(t, -1.0))) / 2.0
    }
}

/// The fixed deformation bezier, `cubic-bezier(0.3, 0.0, 0.7, 1.0)`.
///
/// Solves `x(p) = t` for the curve parameter `p` with Newton-Raphson and a
/// bisection fallback, then evaluates `y(p)`. Endpoints are exact.
pub fn bezier_shape(t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let mut p = t;
    for _ in 0..NEWTON_ITERATIONS {
        let err = bezier_sample(p, BEZIER_X1, BEZIER_X2) - t;
        if err.abs() < BEZIER_EPSILON {
            return bezier_sample(p, BEZIER_Y1, BEZIER_Y2);
        }
        let slope = bezier_slope(p, BEZIER_X1, BEZIER_X2);
        if slope.abs() < BEZIER_EPSILON {
            break;
        }
        p -= err / slope;
    }

    // Bisection always converges; x(p) is monotonic on [0, 1]
    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    p = t;
    for _ in 0..BISECTION_ITERATIONS {
        let x = bezier_sample(p, BEZIER_X1, BEZIER_X2);
        if (x - t).abs() < BEZIER_EPSILON {
            break;
        }
        if x < t {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, BEZIER_Y1, BEZIER_Y2)
}

/// Evaluates one bezier axis at parameter `t` in Horner form.
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 3.0f64.mul_add(p1, 1.0) - 3.0 * p2;
    let b = 3.0f64.mul_add(p2, -6.0 * p1);
    let c = 3.0 * p1;
    a.mul_add(t, b).mul_add(t, c) * t
}

/// Derivative of one bezier axis at parameter `t`.
#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 3.0f64.mul_add(p1, 1.0) - 3.0 * p2;
    let b = 3.0f64.mul_add(p2, -6.0 * p1);
    let c = 3.0 * p1;
    (3.0 * a).mul_add(t, 2.0 * b).mul_add(t, c)
}

/// Evaluates the configured curve at `progress`, clamped to [0, 1].
#[inline]
pub fn evaluate(curve: ShapeCurve, progress: f64) -> f64 {
    let t = progress.clamp(0.0, 1.0);
    match curve {
        ShapeCurve::Linear => t,
        ShapeCurve::Quad => in_out_quad(t),
        ShapeCurve::Cubic => in_out_cubic(t),
        ShapeCurve::Quart => in_out_quart(t),
        ShapeCurve::Quint => in_out_quint(t),
        ShapeCurve::Sine => in_out_sine(t),
        ShapeCurve::Circ => in_out_circ(t),
        ShapeCurve::Bounce => in_out_bounce(t),
        ShapeCurve::Bezier => bezier_shape(t),
    }
}

// ============================================================================
// Tests
// ============================================================================
