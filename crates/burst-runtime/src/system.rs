//! Frame system trait

/// A system that can be ticked by the frame scheduler
///
/// Ticks are serialized with impulse delivery on the host's event loop, so
/// implementations never see concurrent mutation. Both `tick` and any spawn
/// path must be fast and non-blocking.
pub trait FrameSystem {
    /// Advance the simulation by `dt` seconds. Must be a no-op for `dt <= 0`.
    fn tick(&mut self, dt: f64);

    /// True when there is nothing left to animate
    fn is_idle(&self) -> bool;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
