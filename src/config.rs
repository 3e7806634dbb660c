//! Face configuration.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration. With the `config` feature the configuration can be loaded
//! from YAML.
//!
//! # Example (YAML)
//!
//! ```yaml
//! timezone: "Europe/Paris"
//! locale: "fr_FR"
//! shape: round            # rect | round
//! # compact_date: false   # default: true on round displays
//! # clock_24h: true       # default: follow the device preference
//! default_vibrate: true   # used until the companion app sends a setting
//! battery_refresh_minutes: 30
//! store_path: "yaswf-settings.json"
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use yaswf::FaceConfig;
//!
//! let config = FaceConfig::load_or_default("config/face.yaml");
//! let face = DisplayController::with_config(host, store, &config);
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::controller::BATTERY_REFRESH_MINUTES;
use crate::layout::Shape;
use crate::settings::DEFAULT_VIBRATE;

/// Configuration for a watchface instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    /// IANA timezone used by the system clock (e.g., "Europe/Paris")
    pub timezone: String,
    /// POSIX locale for weekday and month names (e.g., "de_DE")
    pub locale: String,
    /// Display shape
    pub shape: Shape,
    /// Omit the year from the date; `None` picks per shape
    pub compact_date: Option<bool>,
    /// Force 12h/24h; `None` follows the device preference
    pub clock_24h: Option<bool>,
    /// Vibrate-on-disconnect value before anything is persisted
    pub default_vibrate: bool,
    /// Battery is re-read on ticks whose minute is a multiple of this
    pub battery_refresh_minutes: u32,
    /// File backing the settings store
    pub store_path: PathBuf,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            locale: "POSIX".to_string(),
            shape: Shape::Rect,
            compact_date: None,
            clock_24h: None,
            default_vibrate: DEFAULT_VIBRATE,
            battery_refresh_minutes: BATTERY_REFRESH_MINUTES,
            store_path: PathBuf::from("yaswf-settings.json"),
        }
    }
}

#[cfg(feature = "config")]
mod yaml {
    use std::path::Path;

    use super::FaceConfig;
    use crate::Error;

    impl FaceConfig {
        /// Load configuration from a YAML file.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
            let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
                Error::Config(format!(
                    "Failed to read face config '{}': {}",
                    path.as_ref().display(),
                    e
                ))
            })?;
            Self::from_yaml(&content)
        }

        /// Parse configuration from a YAML string.
        pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
            if yaml.trim().is_empty() {
                return Ok(Self::default());
            }
            let config: Self = serde_yaml::from_str(yaml)?;
            if config.battery_refresh_minutes == 0 || config.battery_refresh_minutes > 60 {
                return Err(Error::Config(format!(
                    "battery_refresh_minutes must be 1-60, got {}",
                    config.battery_refresh_minutes
                )));
            }
            Ok(config)
        }

        /// Load configuration, logging a warning and using defaults on failure.
        pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
            match Self::load(path) {
                Ok(config) => {
                    tracing::info!(
                        "Loaded face config: {:?} display, locale {}, timezone {}",
                        config.shape,
                        config.locale,
                        config.timezone
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load face config: {}", e);
                    Self::default()
                }
            }
        }

        /// Parsed timezone. Unknown names fall back to UTC.
        pub fn tz(&self) -> chrono_tz::Tz {
            self.timezone.parse().unwrap_or_else(|_| {
                tracing::warn!("Unknown timezone '{}', using UTC", self.timezone);
                chrono_tz::UTC
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FaceConfig::default();
        assert_eq!(config.shape, Shape::Rect);
        assert_eq!(config.battery_refresh_minutes, 30);
        assert_eq!(config.compact_date, None);
        assert!(config.default_vibrate);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_yaml() {
        let yaml = r#"
timezone: "Europe/Paris"
locale: "fr_FR"
shape: round
clock_24h: false
default_vibrate: false
"#;
        let config = FaceConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.timezone, "Europe/Paris");
        assert_eq!(config.locale, "fr_FR");
        assert_eq!(config.shape, Shape::Round);
        assert_eq!(config.clock_24h, Some(false));
        assert!(!config.default_vibrate);
        // Unset fields keep their defaults
        assert_eq!(config.battery_refresh_minutes, 30);
        assert_eq!(config.compact_date, None);
        assert_eq!(config.tz(), chrono_tz::Europe::Paris);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(FaceConfig::from_yaml("").unwrap(), FaceConfig::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_invalid_yaml() {
        let err = FaceConfig::from_yaml("shape: hexagon").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));

        let err = FaceConfig::from_yaml("battery_refresh_minutes: 0").unwrap_err();
        assert!(err.to_string().contains("battery_refresh_minutes"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_unknown_timezone_falls_back() {
        let config = FaceConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..FaceConfig::default()
        };
        assert_eq!(config.tz(), chrono_tz::UTC);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_load_or_default_missing_file() {
        let config = FaceConfig::load_or_default("/nonexistent/face.yaml");
        assert_eq!(config, FaceConfig::default());
    }
}
