//! CLI command implementations

pub mod diff;
pub mod presets;
pub mod simulate;

use anyhow::{Context, Result};
use burst_particles::{load_effects, EffectConfig};

/// Resolve an effect either from a config file or from the built-in presets
pub fn resolve_effect(name: &str, config_path: Option<&str>) -> Result<EffectConfig> {
    match config_path {
        Some(path) => {
            let mut effects = load_effects(path)
                .with_context(|| format!("Failed to load effects from {}", path))?;
            effects
                .remove(name)
                .with_context(|| format!("No effect named '{}' in {}", name, path))
        }
        None => EffectConfig::preset(name).context("Failed to resolve preset"),
    }
}
