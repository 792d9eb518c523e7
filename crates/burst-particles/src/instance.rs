//! Packed per-particle instance data for hosts that draw with instancing

use crate::engine::Engine;
use crate::particle::Particle;
use bytemuck::{Pod, Zeroable};

/// One particle as a flat GPU instance record.
/// 32 bytes (2 rows of vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// xy = position, z = rotation (degrees), w = scale
    pub pos_rot_scale: [f32; 4],
    /// x = opacity, y = symbol index (-1 for non-palette payloads), zw = unused
    pub opacity_symbol: [f32; 4],
}

impl ParticleInstance {
    pub fn from_particle(p: &Particle) -> Self {
        let t = p.transform();
        let symbol = p.key().symbol_index().map_or(-1.0, |i| i as f32);
        Self {
            pos_rot_scale: [t.position.x, t.position.y, t.rotation_degrees, t.scale],
            opacity_symbol: [t.opacity, symbol, 0.0, 0.0],
        }
    }
}

/// Reusable buffer of packed instances
#[derive(Debug, Default)]
pub struct InstanceBuffer {
    instances: Vec<ParticleInstance>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repack from the engine's current state. Call after `tick()`.
    pub fn pack(&mut self, engine: &Engine) {
        self.instances.clear();
        self.instances
            .extend(engine.particles().iter().map(ParticleInstance::from_particle));
    }

    pub fn instances(&self) -> &[ParticleInstance] {
        &self.instances
    }

    /// Raw bytes ready for a vertex/instance buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
