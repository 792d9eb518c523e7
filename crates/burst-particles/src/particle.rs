//! Particle types: identity, payload and spring state

use burst_core::{ParticleId, Transform2D};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a particle renders, as the host knows it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayloadKey {
    /// Index into the engine's symbol palette
    Symbol { index: usize },
    /// A reaction on some entity, from the reaction-map diff
    Reaction { entity: String, reaction: String },
}

impl PayloadKey {
    pub fn symbol(index: usize) -> Self {
        Self::Symbol { index }
    }

    pub fn reaction(entity: impl Into<String>, reaction: impl Into<String>) -> Self {
        Self::Reaction {
            entity: entity.into(),
            reaction: reaction.into(),
        }
    }

    /// Palette index, if this key refers to one
    pub fn symbol_index(&self) -> Option<usize> {
        match self {
            Self::Symbol { index } => Some(*index),
            Self::Reaction { .. } => None,
        }
    }
}

impl fmt::Display for PayloadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol { index } => write!(f, "symbol#{index}"),
            Self::Reaction { entity, reaction } => write!(f, "{entity}/{reaction}"),
        }
    }
}

/// Immutable per-particle content descriptor, attached at spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub key: PayloadKey,
    /// Change token of the impulse that spawned the particle
    pub token: i64,
}

impl Payload {
    pub fn new(key: PayloadKey, token: i64) -> Self {
        Self { key, token }
    }
}

/// One live particle.
///
/// `id`, `payload` and `launch_velocity` are fixed at spawn; only the
/// engine's integrator writes `progress`/`velocity`, and `transform` is the
/// cached visual state as of the last tick.
#[derive(Debug, Clone)]
pub struct Particle {
    id: ParticleId,
    payload: Payload,
    launch_velocity: f32,
    pub(crate) progress: f32,
    pub(crate) velocity: f32,
    pub(crate) transform: Transform2D,
}

impl Particle {
    pub(crate) fn new(id: ParticleId, payload: Payload, launch_velocity: f32) -> Self {
        Self {
            id,
            payload,
            launch_velocity,
            progress: 0.0,
            velocity: launch_velocity,
            transform: Transform2D::IDENTITY.with_opacity(0.0),
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn key(&self) -> &PayloadKey {
        &self.payload.key
    }

    /// Velocity the particle was spawned with
    pub fn launch_velocity(&self) -> f32 {
        self.launch_velocity
    }

    /// Normalized advancement, 0 at spawn and 1 when converged
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }
}
