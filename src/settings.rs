//! User settings persistence.
//!
//! This module handles loading and saving user preferences across sessions.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::DEFAULT_THRESHOLD;
use crate::render::{RenderConfig, DEFAULT_CACHE_CAPACITY};

/// User settings that persist across sessions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Relative neighbour threshold for peak/trough detection
    #[serde(default = "default_threshold")]
    pub extrema_threshold: f64,
    /// Maximum number of cached selections (0 disables the cache)
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Whether peaks and troughs are annotated
    #[serde(default = "default_true")]
    pub show_extrema: bool,
    /// Use the colorblind-friendly palette
    #[serde(default)]
    pub color_blind_mode: bool,
    /// Dataset reopened on startup
    #[serde(default)]
    pub last_dataset: Option<PathBuf>,
}

fn default_version() -> u32 {
    1
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_true() -> bool {
    true
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            version: 1,
            extrema_threshold: DEFAULT_THRESHOLD,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            show_extrema: true,
            color_blind_mode: false,
            last_dataset: None,
        }
    }
}

impl UserSettings {
    /// Get the config directory path for EstateView
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("EstateView"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("EstateView"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir().map(|p| p.join("estateview"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`, falling back to defaults if missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable settings file {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = Self::get_settings_path()
            .ok_or_else(|| "Could not determine config directory".to_string())?;
        self.save_to(&path)
    }

    /// Save settings to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }

    /// Renderer configuration derived from these settings
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            threshold: self.extrema_threshold,
            cache_capacity: self.cache_capacity,
        }
    }
}
