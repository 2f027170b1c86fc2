//! Configuration management and validation.
//!
//! Controls how parsed distances are displayed and how the key/value
//! projection renders numbers. Loaded in layers: defaults, then an optional
//! JSON file, then environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::models::DistanceUnit;
use crate::error::{MetarError, Result};

/// Environment variable overriding [`Config::visibility_unit`]
pub const ENV_VISIBILITY_UNIT: &str = "METAR_VISIBILITY_UNIT";
/// Environment variable overriding [`Config::cloud_height_unit`]
pub const ENV_CLOUD_HEIGHT_UNIT: &str = "METAR_CLOUD_HEIGHT_UNIT";
/// Environment variable overriding [`Config::projection_precision`]
pub const ENV_PROJECTION_PRECISION: &str = "METAR_PROJECTION_PRECISION";

/// Largest number of decimals the projection will render
pub const MAX_PROJECTION_PRECISION: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display unit for prevailing visibility; `None` keeps the reported unit
    pub visibility_unit: Option<DistanceUnit>,

    /// Display unit for cloud bases and vertical visibility
    pub cloud_height_unit: DistanceUnit,

    /// Decimal places for numbers in the key/value projection
    pub projection_precision: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            visibility_unit: None,
            cloud_height_unit: DistanceUnit::Meters,
            projection_precision: 2,
        }
    }
}

impl Config {
    pub fn with_visibility_unit(mut self, unit: DistanceUnit) -> Self {
        self.visibility_unit = Some(unit);
        self
    }

    pub fn with_cloud_height_unit(mut self, unit: DistanceUnit) -> Self {
        self.cloud_height_unit = unit;
        self
    }

    pub fn with_projection_precision(mut self, precision: usize) -> Self {
        self.projection_precision = precision;
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.projection_precision > MAX_PROJECTION_PRECISION {
            return Err(MetarError::configuration(format!(
                "projection_precision {} exceeds maximum of {}",
                self.projection_precision, MAX_PROJECTION_PRECISION
            )));
        }
        Ok(())
    }

    /// Default location of the configuration file
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("metar-processor").join("config.json"))
            .ok_or_else(|| MetarError::configuration("Could not determine user config directory"))
    }

    /// Read a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MetarError::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        serde_json::from_str(&content).map_err(|e| {
            MetarError::configuration(format!(
                "Invalid config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Build configuration from defaults, an optional file and the process
    /// environment, then validate it
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides(std::env::vars())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `METAR_*` overrides from a set of environment variables
    pub fn apply_env_overrides<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                ENV_VISIBILITY_UNIT => {
                    self.visibility_unit = Some(value.parse()?);
                }
                ENV_CLOUD_HEIGHT_UNIT => {
                    self.cloud_height_unit = value.parse()?;
                }
                ENV_PROJECTION_PRECISION => {
                    self.projection_precision = value.trim().parse().map_err(|_| {
                        MetarError::configuration(format!(
                            "{} must be a non-negative integer, got '{}'",
                            ENV_PROJECTION_PRECISION, value
                        ))
                    })?;
                }
                _ => continue,
            }
            debug!("Applied environment override {}={}", key.as_ref(), value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.visibility_unit, None);
        assert_eq!(config.cloud_height_unit, DistanceUnit::Meters);
        assert_eq!(config.projection_precision, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = Config::default()
            .with_visibility_unit(DistanceUnit::Kilometers)
            .with_cloud_height_unit(DistanceUnit::Feet)
            .with_projection_precision(0);
        assert_eq!(config.visibility_unit, Some(DistanceUnit::Kilometers));
        assert_eq!(config.cloud_height_unit, DistanceUnit::Feet);
        assert_eq!(config.projection_precision, 0);
    }

    #[test]
    fn test_validate_rejects_excessive_precision() {
        let config = Config::default().with_projection_precision(12);
        assert!(matches!(
            config.validate(),
            Err(MetarError::Configuration { .. })
        ));
    }

    #[test]
    fn test_from_file_with_partial_settings() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"cloud_height_unit": "feet"}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.cloud_height_unit, DistanceUnit::Feet);
        assert_eq!(config.projection_precision, 2);
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();

        let result = Config::from_file(file.path());
        assert!(matches!(result, Err(MetarError::Configuration { .. })));
    }

    #[test]
    fn test_from_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/metar/config.json"));
        assert!(matches!(result, Err(MetarError::Io { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_overrides([
                (ENV_VISIBILITY_UNIT, "miles"),
                (ENV_CLOUD_HEIGHT_UNIT, "ft"),
                (ENV_PROJECTION_PRECISION, "3"),
                ("PATH", "/usr/bin"),
            ])
            .unwrap();

        assert_eq!(config.visibility_unit, Some(DistanceUnit::Miles));
        assert_eq!(config.cloud_height_unit, DistanceUnit::Feet);
        assert_eq!(config.projection_precision, 3);
    }

    #[test]
    fn test_env_override_invalid_value() {
        let mut config = Config::default();
        let result = config.apply_env_overrides([(ENV_PROJECTION_PRECISION, "lots")]);
        assert!(result.is_err());
    }
}
