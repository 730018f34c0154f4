//! Configuration management for app-icon.
//!
//! Loads and saves the TOML configuration with cross-platform paths and
//! atomic writes, and builds the simulated icon host it describes.

use crate::{
    AppError, AppResult,
    config::{MANIFEST_FILE_NAME, SimulatorConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use app_icon_core::{IconError, IconManifest, SimulatedPlatform};
use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Packaged icon manifest (None = `icons.toml` next to the config file).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_path: Option<PathBuf>,

    /// Simulated host behaviour.
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

impl Config {
    /// Load configuration from the user config directory, creating a
    /// default file if none exists.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config found, creating default");
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit file.
    #[track_caller]
    #[instrument(skip(path), fields(path = ?path.as_ref()))]
    pub fn load_from<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?path, "Configuration loaded");

        Ok(config)
    }

    /// Save configuration using the atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self, path), fields(path = ?path.as_ref()))]
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        let config_path = path.as_ref();

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Path of the packaged icon manifest.
    #[track_caller]
    pub fn resolved_manifest_path(&self) -> AppResult<PathBuf> {
        match &self.manifest_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join(MANIFEST_FILE_NAME)),
        }
    }

    /// Build the simulated host this configuration describes.
    ///
    /// A missing manifest means no alternate icons. A manifest that exists
    /// but cannot be read leaves the host with an unreadable configuration,
    /// so listing degrades to `DEFAULT` rather than aborting.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn build_platform(&self) -> AppResult<SimulatedPlatform> {
        let manifest_path = self.resolved_manifest_path()?;

        let (manifest, unreadable) = if manifest_path.exists() {
            match IconManifest::load(&manifest_path) {
                Ok(manifest) => (manifest, None),
                Err(e) => {
                    warn!(error = %e, "Icon manifest unreadable");
                    (IconManifest::default(), Some(unreadable_reason(e)))
                }
            }
        } else {
            warn!(
                manifest_path = ?manifest_path,
                "Icon manifest not found, no alternate icons available"
            );
            (IconManifest::default(), None)
        };

        let mut platform = SimulatedPlatform::new(manifest)
            .with_support(self.simulator.supported)
            .with_mechanism(self.simulator.mechanism_available)
            .with_delivery(self.simulator.delivery());

        if let Some(reason) = unreadable {
            platform = platform.with_unreadable_configuration(reason);
        }

        debug!(simulator = ?self.simulator, "Simulated icon host built");

        Ok(platform)
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn config_dir() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "app-icon", "App-Icon").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(proj_dirs.config_dir().to_path_buf())
    }
}

fn unreadable_reason(error: IconError) -> String {
    match error {
        IconError::ConfigurationUnreadable { reason, .. } => reason,
        other => other.to_string(),
    }
}
