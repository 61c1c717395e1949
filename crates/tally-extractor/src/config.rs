//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Window size (characters)
    pub chunk_size: usize,

    /// Characters shared between consecutive windows
    pub chunk_overlap: usize,

    /// Drop transactions repeated verbatim by the following window
    ///
    /// Off by default: a statement can legitimately list the same movement
    /// twice, and an overlap duplicate is indistinguishable from that.
    pub dedup_overlaps: bool,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.chunk_size == 0 || self.chunk_overlap >= self.chunk_size {
            return Err(ExtractorError::InvalidChunkParameters {
                size: self.chunk_size,
                overlap: self.chunk_overlap,
            });
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 100,
            dedup_overlaps: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.chunk_overlap, 100);
        assert!(!config.dedup_overlaps);
    }

    #[test]
    fn test_overlap_equal_to_size_rejected() {
        let config = ExtractorConfig {
            chunk_size: 100,
            chunk_overlap: 100,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ExtractorError::InvalidChunkParameters {
                size: 100,
                overlap: 100
            })
        );
    }

    #[test]
    fn test_zero_size_rejected() {
        let config = ExtractorConfig {
            chunk_size: 0,
            chunk_overlap: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml("chunk_size = 400").unwrap();
        assert_eq!(config.chunk_size, 400);
        assert_eq!(config.chunk_overlap, 100);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig {
            chunk_size: 500,
            chunk_overlap: 50,
            dedup_overlaps: true,
        };
        let toml_str = config.to_toml().unwrap();
        assert_eq!(ExtractorConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_bad_toml() {
        let result = ExtractorConfig::from_toml("chunk_size = \"big\"");
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }
}
