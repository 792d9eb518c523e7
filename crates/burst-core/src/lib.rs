//! Burst Core - Foundational types for the Burst particle engine
//!
//! This crate provides the core types that all other Burst crates depend on:
//! - `ParticleId` - Stable 128-bit particle identities (also the random seed)
//! - `Vec2`, `Transform2D` - Screen-space types
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{BurstError, Result};
pub use id::ParticleId;
pub use types::{Transform2D, Vec2};
