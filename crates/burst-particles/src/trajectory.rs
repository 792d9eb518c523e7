//! Per-particle visual trajectories
//!
//! A trajectory maps `(id, progress)` to a [`Transform2D`] with no hidden
//! state: the random jitter is drawn from a generator re-seeded from the id
//! on every call, always in the same order (lateral, vertical, tilt).

use crate::curves::{opacity, pulse, wave};
use crate::rand::SeededRng;
use burst_core::{ParticleId, Transform2D, Vec2};
use serde::{Deserialize, Serialize};

/// Path shape and visual curves for one effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trajectory {
    /// Float upward from the anchor, drifting side to side and growing
    Rise {
        /// Height travelled at progress 1
        rise: f32,
        /// Max lateral drift magnitude
        lateral_range: f32,
        /// Max extra per-particle vertical offset
        rise_jitter: f32,
        /// Extra height per unit of launch velocity
        velocity_lift: f32,
        /// Max tilt in degrees, either direction
        max_tilt_degrees: f32,
        /// Scale gained at progress 1 (`scale = 1 + growth * p`)
        growth: f32,
    },
    /// Fly from `origin` to `destination`, popping in size near the midpoint
    React {
        origin: Vec2,
        destination: Vec2,
        lateral_range: f32,
        rise_jitter: f32,
        max_tilt_degrees: f32,
        /// Peak scale, reached at progress 0.5
        pulse_gain: f32,
    },
}

impl Trajectory {
    /// Default rising burst of the given height
    pub fn rise(height: f32) -> Self {
        Self::Rise {
            rise: height,
            lateral_range: 10.0,
            rise_jitter: 10.0,
            velocity_lift: 10.0,
            max_tilt_degrees: 20.0,
            growth: 0.3,
        }
    }

    /// Default point-to-point flight
    pub fn react(origin: Vec2, destination: Vec2) -> Self {
        Self::React {
            origin,
            destination,
            lateral_range: 20.0,
            rise_jitter: 10.0,
            max_tilt_degrees: 20.0,
            pulse_gain: 1.5,
        }
    }

    /// Visual transform of particle `id` at `progress`.
    ///
    /// `launch_velocity` is the particle's immutable spawn velocity.
    pub fn transform(&self, id: ParticleId, progress: f32, launch_velocity: f32) -> Transform2D {
        let mut rng = SeededRng::for_particle(id);

        match *self {
            Self::Rise {
                rise,
                lateral_range,
                rise_jitter,
                velocity_lift,
                max_tilt_degrees,
                growth,
            } => {
                let lateral = wave(progress) * rng.uniform(-lateral_range, lateral_range);
                let vertical = progress * -rise
                    - velocity_lift * launch_velocity * progress
                    - rng.uniform(0.0, rise_jitter);
                let tilt = rng.uniform(-max_tilt_degrees, max_tilt_degrees);

                Transform2D {
                    position: Vec2::new(lateral, vertical),
                    rotation_degrees: tilt_at(tilt, progress),
                    scale: 1.0 + growth * progress,
                    opacity: opacity(progress),
                }
            }
            Self::React {
                origin,
                destination,
                lateral_range,
                rise_jitter,
                max_tilt_degrees,
                pulse_gain,
            } => {
                let lateral = wave(progress) * rng.uniform(-lateral_range, lateral_range);
                let vertical = -rng.uniform(0.0, rise_jitter);
                let tilt = rng.uniform(-max_tilt_degrees, max_tilt_degrees);
                let base = origin.lerp(destination, progress);

                Transform2D {
                    position: base + Vec2::new(lateral, vertical),
                    rotation_degrees: tilt_at(tilt, progress),
                    scale: pulse_gain * pulse(progress),
                    opacity: opacity(progress),
                }
            }
        }
    }
}

/// Net rotation of a particle pre-rotated by `-tilt * (1 - p)` and then
/// rotated by `+tilt`: it eases into its tilt as it travels.
fn tilt_at(tilt: f32, progress: f32) -> f32 {
    tilt - tilt * (1.0 - progress)
}
