//! Renderer configuration
//!
//! Capacity limits for the 2D batch renderer. The values are fixed for the
//! lifetime of a `Renderer2D` instance: the vertex pool and the static index
//! buffer are sized from them exactly once, at construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// A capacity value that the renderer cannot operate with
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Capacity configuration for [`crate::render::renderer_2d::Renderer2D`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renderer2DConfig {
    /// Maximum number of quads a single batch can hold before an automatic
    /// flush is triggered
    pub max_quad_count: u32,

    /// Number of texture slots per batch, including the reserved white
    /// texture in slot 0
    pub max_texture_slots: u32,
}

impl Default for Renderer2DConfig {
    fn default() -> Self {
        Self {
            max_quad_count: 10_000,
            max_texture_slots: 32,
        }
    }
}

impl Renderer2DConfig {
    /// Create a configuration with explicit capacities
    pub fn new(max_quad_count: u32, max_texture_slots: u32) -> Self {
        Self {
            max_quad_count,
            max_texture_slots,
        }
    }

    /// Number of vertex records in the CPU-side pool (4 per quad)
    pub fn max_quad_vertices(&self) -> u32 {
        4 * self.max_quad_count
    }

    /// Number of entries in the static index buffer (6 per quad)
    pub fn max_quad_indices(&self) -> u32 {
        6 * self.max_quad_count
    }

    /// Check that the capacities are usable.
    ///
    /// The slot table must hold the white texture plus at least one user
    /// texture, otherwise the overflow-flush policy could loop forever.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_quad_count == 0 {
            return Err(ConfigError::Invalid(
                "max_quad_count must be at least 1".to_string(),
            ));
        }
        if self.max_texture_slots < 2 {
            return Err(ConfigError::Invalid(
                "max_texture_slots must be at least 2 (white texture + one user slot)".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Renderer2DConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_quad_vertices(), 40_000);
        assert_eq!(config.max_quad_indices(), 60_000);
    }

    #[test]
    fn rejects_degenerate_capacities() {
        assert!(Renderer2DConfig::new(0, 32).validate().is_err());
        assert!(Renderer2DConfig::new(100, 1).validate().is_err());
        assert!(Renderer2DConfig::new(1, 2).validate().is_ok());
    }

    #[test]
    fn toml_round_trip() {
        let config = Renderer2DConfig::new(256, 8);
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Renderer2DConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
