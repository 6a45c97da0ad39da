//! User configuration for jokebox
//!
//! This module handles user-configurable settings stored in settings.json.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Paths;
use crate::models::ImageRef;

/// User configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Background images, rotated in order
    #[serde(default = "default_background_images")]
    pub background_images: Vec<ImageRef>,

    /// Background rotation interval in milliseconds
    #[serde(default = "default_background_interval_ms")]
    pub background_interval_ms: u64,

    /// Base url of the joke api
    #[serde(default = "default_joke_api_url")]
    pub joke_api_url: String,

    /// Category requested when none is selected
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Content flags the joke api should exclude
    #[serde(default = "default_blacklist_flags")]
    pub blacklist_flags: Vec<String>,

    /// Command that receives text to copy on stdin (e.g. ["wl-copy"])
    #[serde(default)]
    pub clipboard_command: Vec<String>,

    /// Command that speaks its last argument aloud (e.g. ["espeak"])
    #[serde(default)]
    pub speech_command: Vec<String>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            background_images: default_background_images(),
            background_interval_ms: default_background_interval_ms(),
            joke_api_url: default_joke_api_url(),
            default_category: default_category(),
            blacklist_flags: default_blacklist_flags(),
            clipboard_command: Vec::new(),
            speech_command: Vec::new(),
        }
    }
}

impl UserConfig {
    /// Load configuration from the settings file of the initialized paths
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        Self::load_from(&paths.settings_path())
    }

    /// Load configuration from a file, writing defaults when it is missing
    pub fn load_from(settings_path: &Path) -> Result<Self> {
        if settings_path.exists() {
            let content =
                std::fs::read_to_string(settings_path).context("Failed to read settings file")?;
            let config: UserConfig =
                serde_json::from_str(&content).context("Failed to parse settings file")?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(settings_path)?;
            Ok(config)
        }
    }

    /// Save configuration to a file
    pub fn save_to(&self, settings_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(settings_path, content).context("Failed to write settings file")?;

        Ok(())
    }
}

// Default value functions for serde

fn default_background_images() -> Vec<ImageRef> {
    [
        "https://images.unsplash.com/photo-1503264116251-35a269479413?auto=format&fit=crop&w=1600&q=60",
        "https://images.unsplash.com/photo-1504384308090-c894fdcc538d?auto=format&fit=crop&w=1600&q=60",
        "https://images.unsplash.com/photo-1492684223066-81342ee5ff30?auto=format&fit=crop&w=1600&q=60",
        "https://images.unsplash.com/photo-1508921912186-1d1a45ebb3c1?auto=format&fit=crop&w=1600&q=60",
        "https://images.unsplash.com/photo-1522202195461-2638a59e3483?auto=format&fit=crop&w=1600&q=60",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_background_interval_ms() -> u64 {
    30_000
}

fn default_joke_api_url() -> String {
    "https://v2.jokeapi.dev".to_string()
}

fn default_category() -> String {
    "Any".to_string()
}

fn default_blacklist_flags() -> Vec<String> {
    ["nsfw", "religious", "political", "explicit"]
        .into_iter()
        .map(String::from)
        .collect()
}
