//! Diff command — show which particles a reaction-map change spawns

use anyhow::{bail, Context, Result};
use burst_particles::{
    reaction_map_from_json, reaction_map_from_toml, Engine, PayloadKey, ReactionMap,
};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct Spawn {
    key: PayloadKey,
    count: i64,
}

pub fn run(
    old_path: &str,
    new_path: &str,
    preset: &str,
    config_path: Option<&str>,
    format: &str,
) -> Result<()> {
    let old = read_map(old_path)?;
    let new = read_map(new_path)?;
    let config = super::resolve_effect(preset, config_path)?;

    let mut engine = Engine::new(config);
    engine.on_mapping_changed(&old, &new);
    let spawns: Vec<Spawn> = engine
        .particles()
        .iter()
        .map(|p| Spawn {
            key: p.key().clone(),
            count: p.payload().token,
        })
        .collect();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&spawns)?),
        "text" => {
            if spawns.is_empty() {
                println!("No increases; nothing spawns");
            }
            for spawn in &spawns {
                println!("spawn {} (now {})", spawn.key, spawn.count);
            }
        }
        _ => bail!("Unknown format: {}", format),
    }
    Ok(())
}

/// Read a reaction map, choosing the parser by extension (`.json`, else TOML)
fn read_map(path: &str) -> Result<ReactionMap> {
    let path = Path::new(path);
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        reaction_map_from_json(&source)
    } else {
        reaction_map_from_toml(&source)
    };
    parsed.with_context(|| format!("Failed to parse {}", path.display()))
}
