//! Lightweight splitmix64 PRNG, keyed per particle

use burst_core::ParticleId;

/// Deterministic random stream.
///
/// Re-created from the particle identity on every evaluation and never kept
/// across ticks, so a particle's jitter depends only on its id.
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Fresh stream for one particle
    pub fn for_particle(id: ParticleId) -> Self {
        Self::new(id.seed())
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max). An empty or inverted range yields `min`.
    pub fn uniform(&mut self, min: f32, max: f32) -> f32 {
        let t = self.next_f32();
        if max <= min {
            return min;
        }
        min + t * (max - min)
    }
}
