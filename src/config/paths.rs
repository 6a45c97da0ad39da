//! Path management for jokebox
//!
//! Only the config directory and the settings file live on disk; jokes and
//! favorites never do.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static PATHS: OnceCell<Arc<Paths>> = OnceCell::new();

const SETTINGS_FILE: &str = "settings.json";

/// Manages all filesystem paths for the application
#[derive(Debug, Clone)]
pub struct Paths {
    /// Config directory path
    config_dir: PathBuf,
}

impl Paths {
    /// Initialize the paths singleton
    pub fn init(config: Option<PathBuf>) -> Result<Arc<Paths>> {
        let paths = PATHS.get_or_try_init(|| {
            let paths = Self::new(config)?;
            Ok::<_, anyhow::Error>(Arc::new(paths))
        })?;
        Ok(Arc::clone(paths))
    }

    /// Get the global paths instance
    pub fn get() -> Result<Arc<Paths>> {
        PATHS.get().map(Arc::clone).context("Paths not initialized")
    }

    fn new(config_override: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_override {
            Some(path) => path,
            None => directories::ProjectDirs::from("", "", "jokebox")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".jokebox")),
        };

        std::fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory {}", config_dir.display())
        })?;

        Ok(Self { config_dir })
    }

    /// Get the config directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the settings file path
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }
}
