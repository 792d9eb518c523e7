//! Presets command — list available effects

use anyhow::{Context, Result};
use burst_particles::{load_effects, EffectConfig, Trajectory, PRESET_NAMES};

pub fn run(config_path: Option<&str>) -> Result<()> {
    let effects: Vec<EffectConfig> = match config_path {
        Some(path) => load_effects(path)
            .with_context(|| format!("Failed to load effects from {}", path))?
            .into_values()
            .collect(),
        None => PRESET_NAMES
            .iter()
            .map(|name| EffectConfig::preset(name))
            .collect::<burst_core::Result<_>>()?,
    };

    println!(
        "{:<14} {:<12} {:>6} {:>9}  {}",
        "NAME", "TRIGGER", "ZETA", "STIFFNESS", "TRAJECTORY"
    );
    for effect in &effects {
        println!(
            "{:<14} {:<12} {:>6.2} {:>9.2}  {}",
            effect.name,
            effect.trigger.as_str(),
            effect.spring.zeta,
            effect.spring.stiffness,
            describe(&effect.trajectory)
        );
    }
    Ok(())
}

fn describe(trajectory: &Trajectory) -> String {
    match trajectory {
        Trajectory::Rise { rise, growth, .. } => format!("rise {:.0} (grow +{:.0}%)", rise, growth * 100.0),
        Trajectory::React {
            origin,
            destination,
            pulse_gain,
            ..
        } => format!(
            "react ({:.0},{:.0}) -> ({:.0},{:.0}) (pulse x{:.1})",
            origin.x, origin.y, destination.x, destination.y, pulse_gain
        ),
    }
}
