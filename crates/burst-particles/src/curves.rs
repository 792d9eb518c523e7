//! Value-over-progress curves shared by the trajectories

use std::f32::consts::PI;

/// Visibility: fast fade-in, flat top, fade-out near the end.
///
/// `1 - (1 - 2p)^4`, clamped to [0, 1].
pub fn opacity(progress: f32) -> f32 {
    (1.0 - (1.0 - 2.0 * progress).powi(4)).clamp(0.0, 1.0)
}

/// Side-to-side drift shape, growing with progress
pub fn wave(progress: f32) -> f32 {
    progress * (progress * 1.4 * PI).sin()
}

/// Parabolic pop: 0 at both ends, 1 at the midpoint
pub fn pulse(progress: f32) -> f32 {
    4.0 * progress * (1.0 - progress)
}
