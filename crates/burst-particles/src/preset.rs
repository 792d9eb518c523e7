//! Effect configuration (parsed from TOML) and the named preset table

use crate::palette::Palette;
use crate::spring::Spring;
use crate::trajectory::Trajectory;
use burst_core::{BurstError, Result, Vec2};
use std::collections::BTreeMap;
use std::path::Path;

/// Height every rising preset is tuned around
pub const BASE_HEIGHT: f32 = 50.0;

/// Default stiffness of the documented `zeta = 1` spring
pub const BASE_STIFFNESS: f32 = 30.0;

/// Names accepted by [`EffectConfig::preset`]
pub const PRESET_NAMES: [&str; 5] = ["rise", "rise_still", "counter", "react", "reactions"];

/// When an impulse produces a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// One particle per impulse
    Always,
    /// One particle per impulse whose token exceeds the last token seen
    OnIncrease,
    /// Particles come from reaction-map diffs; plain impulses still spawn
    MapDiff,
}

impl Trigger {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "always" => Some(Self::Always),
            "on_increase" => Some(Self::OnIncrease),
            "map_diff" => Some(Self::MapDiff),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::OnIncrease => "on_increase",
            Self::MapDiff => "map_diff",
        }
    }
}

/// Full configuration of one engine instance
#[derive(Debug, Clone, PartialEq)]
pub struct EffectConfig {
    pub name: String,
    pub spring: Spring,
    pub trajectory: Trajectory,
    pub trigger: Trigger,
    pub palette: Palette,
    /// Spawn velocity when the impulse does not carry one
    pub initial_velocity: f32,
    /// Ignore per-impulse velocities and always launch at `initial_velocity`
    pub force_initial_velocity: bool,
    /// Progress value particles converge toward
    pub target: f32,
    /// Retirement tolerance for both distance and speed
    pub settle_threshold: f32,
    /// Largest single tick, in seconds
    pub max_delta: f32,
    /// Live particle cap, 0 for unbounded
    pub max_particles: usize,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            name: "rise".to_string(),
            spring: Spring::new(1.0, BASE_STIFFNESS),
            trajectory: Trajectory::rise(BASE_HEIGHT),
            trigger: Trigger::Always,
            palette: Palette::default(),
            initial_velocity: 0.0,
            force_initial_velocity: false,
            target: 1.0,
            settle_threshold: 0.04,
            max_delta: 1.0 / 30.0,
            max_particles: 0,
        }
    }
}

impl EffectConfig {
    /// Look up a named preset
    pub fn preset(name: &str) -> Result<Self> {
        let config = match name {
            "rise" => Self::default(),
            "rise_still" => Self::rise_still(1.0),
            "counter" => Self {
                name: "counter".to_string(),
                trigger: Trigger::OnIncrease,
                force_initial_velocity: true,
                ..Self::default()
            },
            "react" => Self {
                name: "react".to_string(),
                trajectory: Trajectory::react(Vec2::ZERO, Vec2::new(0.0, -120.0)),
                force_initial_velocity: true,
                ..Self::default()
            },
            "reactions" => Self {
                name: "reactions".to_string(),
                trajectory: Trajectory::react(Vec2::ZERO, Vec2::new(0.0, -120.0)),
                trigger: Trigger::MapDiff,
                force_initial_velocity: true,
                ..Self::default()
            },
            other => return Err(BurstError::UnknownPreset(other.to_string())),
        };
        Ok(config)
    }

    /// Rising burst with zero launch velocity; a taller rise gets a softer
    /// spring so it takes longer (`stiffness = 30 / height`).
    pub fn rise_still(height: f32) -> Self {
        let height = if height > 0.0 { height } else { 1.0 };
        let mut trajectory = Trajectory::rise(BASE_HEIGHT * height);
        if let Trajectory::Rise { growth, .. } = &mut trajectory {
            *growth = 0.2;
        }
        Self {
            name: "rise_still".to_string(),
            spring: Spring::new(1.0, BASE_STIFFNESS / height),
            trajectory,
            force_initial_velocity: true,
            ..Self::default()
        }
    }

    /// Parse an EffectConfig from a TOML table.
    ///
    /// `preset = "<name>"` picks the base (default `rise`); every other key
    /// overrides one field of it.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let base = match table.get("preset") {
            Some(v) => v
                .as_str()
                .ok_or_else(|| BurstError::InvalidConfig("preset must be a string".into()))?,
            None => "rise",
        };
        let mut config = if let Some(height) = table.get("height") {
            if base != "rise_still" {
                return Err(BurstError::InvalidConfig(
                    "height only applies to the rise_still preset".into(),
                ));
            }
            Self::rise_still(toml_f32(height, 1.0))
        } else {
            Self::preset(base)?
        };

        if let Some(v) = table.get("name").and_then(|v| v.as_str()) {
            config.name = v.to_string();
        }
        if let Some(v) = table.get("zeta") {
            config.spring.zeta = toml_f32(v, config.spring.zeta);
        }
        if let Some(v) = table.get("stiffness") {
            config.spring.stiffness = toml_f32(v, config.spring.stiffness);
        }
        if let Some(v) = table.get("trigger") {
            let s = v.as_str().unwrap_or_default();
            config.trigger = Trigger::parse(s)
                .ok_or_else(|| BurstError::InvalidConfig(format!("unknown trigger '{s}'")))?;
        }
        if let Some(v) = table.get("symbols").and_then(|v| v.as_array()) {
            config.palette = Palette::from_names(v.iter().filter_map(|s| s.as_str()));
        }
        if let Some(v) = table.get("initial_velocity") {
            config.initial_velocity = toml_f32(v, config.initial_velocity);
        }
        if let Some(v) = table.get("force_initial_velocity") {
            config.force_initial_velocity = v.as_bool().unwrap_or(config.force_initial_velocity);
        }
        if let Some(v) = table.get("target") {
            config.target = toml_f32(v, config.target);
        }
        if let Some(v) = table.get("settle_threshold") {
            config.settle_threshold = toml_f32(v, config.settle_threshold);
        }
        if let Some(v) = table.get("max_delta") {
            config.max_delta = toml_f32(v, config.max_delta).max(0.0);
        }
        if let Some(v) = table.get("max_particles") {
            config.max_particles = v.as_integer().unwrap_or(0).clamp(0, 10_000) as usize;
        }

        apply_trajectory_overrides(&mut config.trajectory, table);
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run meaningfully
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=10.0).contains(&self.spring.zeta) {
            return Err(BurstError::ValueOutOfRange {
                field: "zeta".into(),
                min: 0.0,
                max: 10.0,
                value: self.spring.zeta as f64,
            });
        }
        if !(self.settle_threshold > 0.0) {
            return Err(BurstError::InvalidConfig(
                "settle_threshold must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Load every `[effects.<name>]` table from a TOML file
pub fn load_effects(path: impl AsRef<Path>) -> Result<BTreeMap<String, EffectConfig>> {
    let source = std::fs::read_to_string(path)?;
    parse_effects(&source)
}

/// Parse every `[effects.<name>]` table of a TOML document
pub fn parse_effects(source: &str) -> Result<BTreeMap<String, EffectConfig>> {
    let doc: toml::value::Table = toml::from_str(source)?;
    let Some(effects) = doc.get("effects").and_then(|v| v.as_table()) else {
        return Ok(BTreeMap::new());
    };

    let mut out = BTreeMap::new();
    for (name, value) in effects {
        let table = value
            .as_table()
            .ok_or_else(|| BurstError::InvalidConfig(format!("effects.{name} must be a table")))?;
        let mut config = EffectConfig::from_toml(table)?;
        if !table.contains_key("name") {
            config.name = name.clone();
        }
        out.insert(name.clone(), config);
    }
    Ok(out)
}

fn apply_trajectory_overrides(trajectory: &mut Trajectory, table: &toml::value::Table) {
    match trajectory {
        Trajectory::Rise {
            rise,
            lateral_range,
            rise_jitter,
            velocity_lift,
            max_tilt_degrees,
            growth,
        } => {
            set_f32(table, "rise", rise);
            set_f32(table, "lateral_range", lateral_range);
            set_f32(table, "rise_jitter", rise_jitter);
            set_f32(table, "velocity_lift", velocity_lift);
            set_f32(table, "max_tilt_degrees", max_tilt_degrees);
            set_f32(table, "growth", growth);
        }
        Trajectory::React {
            origin,
            destination,
            lateral_range,
            rise_jitter,
            max_tilt_degrees,
            pulse_gain,
        } => {
            if let Some(v) = table.get("origin") {
                *origin = Vec2::from_array(toml_vec2(v, origin.to_array()));
            }
            if let Some(v) = table.get("destination") {
                *destination = Vec2::from_array(toml_vec2(v, destination.to_array()));
            }
            set_f32(table, "lateral_range", lateral_range);
            set_f32(table, "rise_jitter", rise_jitter);
            set_f32(table, "max_tilt_degrees", max_tilt_degrees);
            set_f32(table, "pulse_gain", pulse_gain);
        }
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn set_f32(table: &toml::value::Table, key: &str, field: &mut f32) {
    if let Some(v) = table.get(key) {
        *field = toml_f32(v, *field);
    }
}

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_vec2(v: &toml::Value, default: [f32; 2]) -> [f32; 2] {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 2 {
            return [toml_f32(&arr[0], default[0]), toml_f32(&arr[1], default[1])];
        }
    }
    default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_named_preset_resolves() {
        for name in PRESET_NAMES {
            let config = EffectConfig::preset(name).unwrap();
            assert_eq!(config.name, name);
            config.validate().unwrap();
        }
    }

    #[test]
    fn unknown_preset_is_an_error() {
        assert!(matches!(
            EffectConfig::preset("sparkle"),
            Err(BurstError::UnknownPreset(_))
        ));
    }

    #[test]
    fn rise_still_scales_with_height() {
        let config = EffectConfig::rise_still(2.0);
        assert!((config.spring.stiffness - 15.0).abs() < 1e-6);
        match config.trajectory {
            Trajectory::Rise { rise, growth, .. } => {
                assert!((rise - 100.0).abs() < 1e-6);
                assert!((growth - 0.2).abs() < 1e-6);
            }
            _ => panic!("Expected Rise trajectory"),
        }
        assert!(config.force_initial_velocity);
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r#"
preset = "react"
zeta = 0.8
stiffness = 40
symbols = ["heart", "star", "fire"]
destination = [10, -200.5]
pulse_gain = 2
max_particles = 64
"#;
        let table: toml::value::Table = toml::from_str(toml_str).unwrap();
        let config = EffectConfig::from_toml(&table).unwrap();
        assert_eq!(config.name, "react");
        assert!((config.spring.zeta - 0.8).abs() < 1e-6);
        assert!((config.spring.stiffness - 40.0).abs() < 1e-6);
        assert_eq!(config.palette.len(), 3);
        assert_eq!(config.max_particles, 64);
        if let Trajectory::React {
            destination,
            pulse_gain,
            ..
        } = config.trajectory
        {
            assert_eq!(destination, Vec2::new(10.0, -200.5));
            assert!((pulse_gain - 2.0).abs() < 1e-6);
        } else {
            panic!("Expected React trajectory");
        }
    }

    #[test]
    fn parse_height_for_rise_still() {
        let table: toml::value::Table =
            toml::from_str("preset = \"rise_still\"\nheight = 3").unwrap();
        let config = EffectConfig::from_toml(&table).unwrap();
        assert!((config.spring.stiffness - 10.0).abs() < 1e-5);

        let table: toml::value::Table = toml::from_str("height = 3").unwrap();
        assert!(EffectConfig::from_toml(&table).is_err());
    }

    #[test]
    fn parse_rejects_bad_values() {
        let table: toml::value::Table = toml::from_str("trigger = \"sometimes\"").unwrap();
        assert!(matches!(
            EffectConfig::from_toml(&table),
            Err(BurstError::InvalidConfig(_))
        ));

        let table: toml::value::Table = toml::from_str("zeta = -1").unwrap();
        assert!(matches!(
            EffectConfig::from_toml(&table),
            Err(BurstError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn parse_effects_document() {
        let source = r#"
[effects.likes]
preset = "counter"
symbols = ["thumbs_up"]

[effects.confetti]
rise = 80
growth = 0.25
"#;
        let effects = parse_effects(source).unwrap();
        assert_eq!(effects.len(), 2);
        assert_eq!(effects["likes"].trigger, Trigger::OnIncrease);
        assert_eq!(effects["likes"].name, "likes");
        match &effects["confetti"].trajectory {
            Trajectory::Rise { rise, .. } => assert!((rise - 80.0).abs() < 1e-6),
            _ => panic!("Expected Rise trajectory"),
        }
    }

    #[test]
    fn demo_effects_file_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/effects.toml");
        let effects = load_effects(path).unwrap();
        assert_eq!(effects.len(), 4);
        assert_eq!(effects["likes"].palette.len(), 4);
        assert!((effects["tall_still"].spring.stiffness - 15.0).abs() < 1e-5);
        assert_eq!(effects["post_reactions"].trigger, Trigger::MapDiff);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_effects("/nonexistent/effects.toml"),
            Err(BurstError::IoError(_))
        ));
    }

    #[test]
    fn missing_effects_table_is_empty() {
        assert!(parse_effects("title = \"x\"").unwrap().is_empty());
    }
}
