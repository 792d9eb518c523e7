//! Reaction-map diffing: which (entity, reaction) counts went up

use burst_core::{BurstError, Result};
use std::collections::BTreeMap;

/// entity → reaction → count. Ordered so spawn order is deterministic.
pub type ReactionMap = BTreeMap<String, BTreeMap<String, u32>>;

/// Every `(entity, reaction)` whose count in `new` is strictly greater than in
/// `old` (absent counts are 0). Decreases, ties and removals are ignored.
pub fn increases(old: &ReactionMap, new: &ReactionMap) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (entity, reactions) in new {
        let previous = old.get(entity);
        for (reaction, &count) in reactions {
            let before = previous
                .and_then(|r| r.get(reaction))
                .copied()
                .unwrap_or(0);
            if count > before {
                out.push((entity.clone(), reaction.clone()));
            }
        }
    }
    out
}

/// Parse a reaction map from a TOML document of `[entity] reaction = count` tables
pub fn reaction_map_from_toml(source: &str) -> Result<ReactionMap> {
    let table: toml::value::Table = toml::from_str(source)?;
    let mut map = ReactionMap::new();

    for (entity, value) in table {
        let reactions = value.as_table().ok_or_else(|| {
            BurstError::InvalidMapping(format!("'{entity}' must be a table of counts"))
        })?;
        let mut counts = BTreeMap::new();
        for (reaction, count) in reactions {
            let n = count
                .as_integer()
                .filter(|n| *n >= 0 && *n <= u32::MAX as i64)
                .ok_or_else(|| {
                    BurstError::InvalidMapping(format!(
                        "'{entity}.{reaction}' must be a non-negative integer count"
                    ))
                })?;
            counts.insert(reaction.clone(), n as u32);
        }
        map.insert(entity, counts);
    }
    Ok(map)
}

/// Parse a reaction map from a JSON object of `{"entity": {"reaction": count}}`
pub fn reaction_map_from_json(source: &str) -> Result<ReactionMap> {
    let root: serde_json::Value = serde_json::from_str(source)
        .map_err(|e| BurstError::InvalidMapping(format!("JSON parse error: {e}")))?;
    let entities = root
        .as_object()
        .ok_or_else(|| BurstError::InvalidMapping("top level must be an object".into()))?;
    let mut map = ReactionMap::new();

    for (entity, value) in entities {
        let reactions = value.as_object().ok_or_else(|| {
            BurstError::InvalidMapping(format!("'{entity}' must be an object of counts"))
        })?;
        let mut counts = BTreeMap::new();
        for (reaction, count) in reactions {
            let n = count
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| {
                    BurstError::InvalidMapping(format!(
                        "'{entity}.{reaction}' must be a non-negative integer count"
                    ))
                })?;
            counts.insert(reaction.clone(), n);
        }
        map.insert(entity.clone(), counts);
    }
    Ok(map)
}
