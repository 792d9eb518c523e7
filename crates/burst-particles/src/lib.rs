//! Burst Particles - spring-driven burst effects
//!
//! Provides the simulation core behind small reaction/counter bursts:
//! - Seeded per-particle randomness, re-derived from the particle id each frame
//! - Closed-form damped-spring integration of each particle's progress
//! - Pure `(id, progress) -> transform` trajectories (rise, point-to-point)
//! - Spawn policies: per impulse, on increase, or per reaction-map increase
//! - Retirement once a particle settles, with the empty pool as the idle signal

pub mod curves;
pub mod diff;
pub mod engine;
pub mod host;
pub mod instance;
pub mod palette;
pub mod particle;
pub mod preset;
pub mod rand;
pub mod spring;
pub mod trajectory;

pub use diff::{increases, reaction_map_from_json, reaction_map_from_toml, ReactionMap};
pub use engine::{Engine, Impulse};
pub use host::{DrawItem, RenderSymbol, SymbolCache, SymbolResolver};
pub use instance::{InstanceBuffer, ParticleInstance};
pub use palette::{Palette, SymbolDescriptor};
pub use particle::{Particle, Payload, PayloadKey};
pub use preset::{load_effects, parse_effects, EffectConfig, Trigger, PRESET_NAMES};
pub use spring::Spring;
pub use trajectory::Trajectory;
