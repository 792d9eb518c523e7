//! Error types for Burst
//!
//! Only configuration loading and host-supplied data can fail. The simulation
//! itself absorbs every anomaly as a no-op.

use thiserror::Error;

/// The main error type for Burst operations
#[derive(Debug, Error)]
pub enum BurstError {
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Burst operations
pub type Result<T> = std::result::Result<T, BurstError>;

impl From<toml::de::Error> for BurstError {
    fn from(err: toml::de::Error) -> Self {
        BurstError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_errors_convert() {
        let err: BurstError = toml::from_str::<toml::Value>("a = ").unwrap_err().into();
        assert!(matches!(err, BurstError::TomlParseError(_)));
        assert!(err.to_string().starts_with("TOML parse error"));
    }

    #[test]
    fn range_error_message() {
        let err = BurstError::ValueOutOfRange {
            field: "zeta".into(),
            min: 0.0,
            max: 10.0,
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "Value out of range: zeta must be between 0 and 10, got -1"
        );
    }
}
