//! Stable particle identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A 128-bit particle identity, stable for the particle's lifetime.
///
/// The identity doubles as the particle's random seed: every visual jitter
/// term is drawn from a generator re-seeded from `seed()`, so the same id
/// always yields the same trajectory.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleId(pub u128);

impl ParticleId {
    /// Create a new random identity (UUID v4 bits)
    pub fn random() -> Self {
        Self(Uuid::new_v4().as_u128())
    }

    /// Create a ParticleId from a raw value (for replay/testing)
    pub fn from_raw(id: u128) -> Self {
        Self(id)
    }

    /// Get the raw u128 value
    pub fn raw(&self) -> u128 {
        self.0
    }

    /// Fold the identity down to the 64-bit seed used by the random source
    pub fn seed(&self) -> u64 {
        (self.0 as u64) ^ ((self.0 >> 64) as u64)
    }
}

impl fmt::Debug for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParticleId({:032x})", self.0)
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Uuid::from_u128(self.0))
    }
}
