use crate::models::settings::Settings;
use anyhow::{anyhow, Context, Result};
#[cfg(not(debug_assertions))]
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configuration file location
pub const CONFIG_ENV_VAR: &str = "APERTURE_TIME_CONFIG";

const CONFIG_FILE_NAME: &str = "aperture-time.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to the default configuration location
    pub fn from_default_location() -> Self {
        Self::new(default_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields the defaults
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            log::info!(
                "No configuration at {}, using defaults",
                self.path.display()
            );
            return Ok(Settings::default());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let settings: Settings = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        Ok(settings)
    }

    /// Save settings
    pub fn save(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory {}", parent.display())
                })?;
            }
        }

        let raw = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    #[cfg(debug_assertions)]
    {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    #[cfg(not(debug_assertions))]
    {
        if let Some(proj_dirs) = ProjectDirs::from("com", "VerticalGarden", "ApertureTime") {
            proj_dirs.config_dir().join(CONFIG_FILE_NAME)
        } else {
            PathBuf::from(CONFIG_FILE_NAME)
        }
    }
}

/// Write `settings` as a starting point when no configuration file exists yet
pub fn write_default_if_missing(settings_service: &SettingsService, settings: &Settings) {
    if settings_service.path().exists() {
        return;
    }

    match settings_service.save(settings) {
        Ok(()) => log::info!(
            "Wrote default configuration to {}",
            settings_service.path().display()
        ),
        Err(e) => log::warn!("Failed to write default configuration: {:#}", e),
    }
}

pub fn load_settings_or_default(settings_service: &SettingsService) -> Settings {
    match settings_service.load() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {:#}, using defaults", e);
            Settings::default()
        }
    }
}
