//! Dashboard configuration.
//!
//! Loaded with figment from, in order of precedence (highest first):
//! 1. Environment variables prefixed with `LAUNCH_DASH_` (`__` separates
//!    nested keys, e.g. `LAUNCH_DASH_DATA__PATH`)
//! 2. `launch-dash.toml` in the working directory
//! 3. Default values
//!
//! The defaults reproduce the stock dashboard, so no file is needed.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "launch-dash.toml";

const ENV_PREFIX: &str = "LAUNCH_DASH_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub window: WindowConfig,
    pub controls: ControlsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Launch records file; format is picked by extension.
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Sites offered by the dropdown after "All Sites".
    pub sites: Vec<String>,
    pub payload_slider: SliderConfig,
}

/// Bounds and step of the payload range control, in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("spacex_launch_dash.csv"),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "SpaceX Launch Records Dashboard".to_string(),
            width: 1200.0,
            height: 900.0,
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            sites: ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            payload_slider: SliderConfig::default(),
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

impl Config {
    /// Load from the default file in the working directory plus environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE_NAME))
    }

    /// Load from a specific TOML file plus environment. A missing file is not
    /// an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.controls.payload_slider;
        if !(s.min.is_finite() && s.max.is_finite()) || s.min >= s.max {
            return Err(ConfigError::Invalid(format!(
                "payload_slider.min ({}) must be below payload_slider.max ({})",
                s.min, s.max
            )));
        }
        if s.step.is_nan() || s.step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "payload_slider.step must be positive, got {}",
                s.step
            )));
        }
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return Err(ConfigError::Invalid("window size must be positive".into()));
        }
        if self.data.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data.path must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_dashboard() {
        let config = Config::default();
        assert_eq!(config.data.path, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(config.controls.sites.len(), 4);
        assert_eq!(config.controls.payload_slider.max, 10_000.0);
        assert_eq!(config.controls.payload_slider.step, 1_000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.controls, ControlsConfig::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[data]\npath = \"launches.parquet\"\n\n[controls.payload_slider]\nmax = 16000.0\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data.path, PathBuf::from("launches.parquet"));
        assert_eq!(config.controls.payload_slider.max, 16_000.0);
        assert_eq!(config.controls.payload_slider.step, 1_000.0);
    }

    #[test]
    fn invalid_slider_is_rejected() {
        let mut config = Config::default();
        config.controls.payload_slider.min = 5.0;
        config.controls.payload_slider.max = 5.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.controls.payload_slider.step = 0.0;
        assert!(config.validate().is_err());

        config.controls.payload_slider.step = f64::NAN;
        assert!(config.validate().is_err());

        config.controls.payload_slider.step = -1000.0;
        assert!(config.validate().is_err());
    }
}
