//! Application configuration.
//!
//! Settings come from an optional `swiss-rents.toml` file and are then
//! overridden by environment variables.
//!
//! # Environment Variables
//! - `SWISS_RENTS_CONFIG`: explicit path of the TOML file
//! - `SWISS_RENTS_LISTINGS`: listing CSV path
//! - `SWISS_RENTS_BOUNDARIES`: canton boundary GeoJSON path
//! - `SWISS_RENTS_BUCKETING`: `absolute` | `rate`
//! - `HOST`: server host (default: 0.0.0.0)
//! - `PORT`: server port (default: 8080)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::BucketingPolicy;
use crate::store::{DataSources, StoreError, StoreResult, DEFAULT_CODE_PROPERTY};

pub const CONFIG_FILE_NAME: &str = "swiss-rents.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Data source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_listings_path")]
    pub listings_path: PathBuf,
    #[serde(default = "default_boundaries_path")]
    pub boundaries_path: PathBuf,
    #[serde(default)]
    pub bucketing: BucketingPolicy,
    #[serde(default = "default_code_property")]
    pub boundary_code_property: String,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_listings_path() -> PathBuf {
    PathBuf::from("data/processed/rents_with_coords_clean.csv")
}

fn default_boundaries_path() -> PathBuf {
    PathBuf::from("data/raw/georef-switzerland-kanton.geojson")
}

fn default_code_property() -> String {
    DEFAULT_CODE_PROPERTY.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            listings_path: default_listings_path(),
            boundaries_path: default_boundaries_path(),
            bucketing: BucketingPolicy::default(),
            boundary_code_property: default_code_property(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// [`StoreError::Configuration`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StoreError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content)
            .map_err(|e| StoreError::configuration(format!("Failed to parse config file: {}", e)))
    }

    /// Look for `swiss-rents.toml` in the current directory, `backend/`, and
    /// the parent directory. `Ok(None)` when none exists.
    pub fn from_default_location() -> StoreResult<Option<Self>> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Resolve the effective configuration: file (explicit or default
    /// location), then environment overrides.
    pub fn load() -> StoreResult<Self> {
        let mut config = match env::var("SWISS_RENTS_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location()?.unwrap_or_default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Override settings from environment variables.
    pub fn apply_env_overrides(&mut self) -> StoreResult<()> {
        if let Ok(path) = env::var("SWISS_RENTS_LISTINGS") {
            self.data.listings_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("SWISS_RENTS_BOUNDARIES") {
            self.data.boundaries_path = PathBuf::from(path);
        }
        if let Ok(policy) = env::var("SWISS_RENTS_BUCKETING") {
            self.data.bucketing = policy.parse().map_err(StoreError::configuration)?;
        }
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| StoreError::configuration("PORT must be a valid port number"))?;
        }
        Ok(())
    }

    /// Identity of the dataset this configuration points at.
    pub fn data_sources(&self) -> DataSources {
        DataSources::new(
            self.data.listings_path.clone(),
            self.data.boundaries_path.clone(),
            self.data.bucketing,
        )
        .with_code_property(self.data.boundary_code_property.clone())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
