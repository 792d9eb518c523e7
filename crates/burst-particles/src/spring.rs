//! Damped spring integrator
//!
//! Closed-form step of the unit-mass spring `x'' = -k·x - 2ζω·x'` with
//! `ω = √k`, where `x` is the displacement from the target. Stepping is exact
//! for any `dt`, so low frame rates neither overshoot nor oscillate beyond
//! what the continuous system does.

use serde::{Deserialize, Serialize};

/// Zeta values this close to 1 use the critically-damped solution
const CRITICAL_EPSILON: f64 = 1e-4;

/// Spring configuration, shared read-only by every particle of an engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Damping ratio: < 1 under-damped, 1 critical, > 1 over-damped
    pub zeta: f32,
    /// Stiffness; `<= 0` snaps straight to the target
    pub stiffness: f32,
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            zeta: 1.0,
            stiffness: 30.0,
        }
    }
}

impl Spring {
    pub fn new(zeta: f32, stiffness: f32) -> Self {
        Self { zeta, stiffness }
    }

    /// Advance `(current, velocity)` toward `target` by `dt` seconds
    pub fn advance(&self, current: f32, target: f32, velocity: f32, dt: f32) -> (f32, f32) {
        advance(current, target, velocity, dt, self.zeta, self.stiffness)
    }
}

/// Advance a damped spring by `dt` seconds.
///
/// Returns `(target, 0)` for a degenerate spring (`stiffness <= 0` or not
/// finite) and the input unchanged for `dt <= 0`.
pub fn advance(
    current: f32,
    target: f32,
    velocity: f32,
    dt: f32,
    zeta: f32,
    stiffness: f32,
) -> (f32, f32) {
    if !(stiffness > 0.0) || !stiffness.is_finite() {
        return (target, 0.0);
    }
    if !(dt > 0.0) {
        return (current, velocity);
    }

    let omega = (stiffness as f64).sqrt();
    let zeta = if zeta.is_finite() { (zeta as f64).max(0.0) } else { 1.0 };
    let t = dt as f64;
    let x0 = (current - target) as f64;
    let v0 = velocity as f64;

    let (x, v) = if (zeta - 1.0).abs() < CRITICAL_EPSILON {
        let c = v0 + omega * x0;
        let decay = (-omega * t).exp();
        ((x0 + c * t) * decay, (v0 - omega * c * t) * decay)
    } else if zeta < 1.0 {
        let wd = omega * (1.0 - zeta * zeta).sqrt();
        let b = (v0 + zeta * omega * x0) / wd;
        let decay = (-zeta * omega * t).exp();
        let (sin, cos) = (wd * t).sin_cos();
        let x = decay * (x0 * cos + b * sin);
        let v = decay * ((b * wd - zeta * omega * x0) * cos - (x0 * wd + zeta * omega * b) * sin);
        (x, v)
    } else {
        let root = omega * (zeta * zeta - 1.0).sqrt();
        let r1 = -zeta * omega + root;
        let r2 = -zeta * omega - root;
        let a = (v0 - r2 * x0) / (r1 - r2);
        let b = x0 - a;
        let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
        (a * e1 + b * e2, r1 * a * e1 + r2 * b * e2)
    };

    (target + x as f32, v as f32)
}

/// Retirement test: close to the target and no longer moving fast.
///
/// Velocity is compared by magnitude, so a particle swinging back after an
/// overshoot is kept until it actually slows down.
pub fn is_settled(progress: f32, velocity: f32, target: f32, threshold: f32) -> bool {
    (progress - target).abs() < threshold && velocity.abs() < threshold
}
