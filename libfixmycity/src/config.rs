//! Configuration management for FixMyCity
//!
//! Everything has a default, so a missing config file is not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::types::Location;

/// Fallback map center when no report has a location
pub const DEFAULT_LATITUDE: f64 = 28.6139;
pub const DEFAULT_LONGITUDE: f64 = 77.209;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub admin: AdminConfig,
    pub map: MapConfig,
    pub capabilities: CapabilitiesConfig,
}

/// Placeholder admin credentials
///
/// Plaintext and client-side; they gate a UI control, not access to data.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub default_latitude: f64,
    pub default_longitude: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilitiesConfig {
    /// Directory scanned by the local camera adapter for the newest photo
    pub photos_dir: Option<String>,
    /// Coordinate reported by the local location adapter
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "superuser".to_string(),
            password: "bigfella".to_string(),
        }
    }
}

// Keep the password out of debug output and logs.
impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_latitude: DEFAULT_LATITUDE,
            default_longitude: DEFAULT_LONGITUDE,
        }
    }
}

impl MapConfig {
    /// Configured default center, falling back to the built-in one when the
    /// configured coordinates are out of range
    pub fn default_center(&self) -> Location {
        Location::new(self.default_latitude, self.default_longitude).unwrap_or(Location {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        })
    }
}

impl CapabilitiesConfig {
    /// Resolved photos directory (tilde-expanded)
    pub fn photos_dir(&self) -> Option<PathBuf> {
        self.photos_dir
            .as_deref()
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).to_string()))
    }

    /// Configured fixed location, if both coordinates are set and valid
    pub fn fixed_location(&self) -> Option<Location> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Location::new(lat, lng),
            _ => None,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// Returns the default configuration when no file exists there.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("FIXMYCITY_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("fixmycity").join("config.toml"))
}

/// Resolve the data directory path following XDG Base Directory spec
///
/// Only log files live here; reports are never written to disk.
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("fixmycity"))
}
