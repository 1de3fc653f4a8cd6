//! Config manager for loading, saving, and atomic updates.
//!
//! Key behaviors:
//! - Atomic writes (write to temp file, then rename)
//! - Section-level updates (only the modified table is rewritten)
//! - Missing sections are filled with defaults on load

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::{DocumentMut, Item};

use super::settings::{ConfigSection, Settings};

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to parse config for editing: {0}")]
    EditParse(#[from] toml_edit::TomlError),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages a pipeline configuration's settings file.
pub struct ConfigManager {
    /// Path to the settings file.
    config_path: PathBuf,
    /// Current settings loaded in memory.
    settings: Settings,
}

impl ConfigManager {
    /// Create a manager for the given settings file path.
    ///
    /// Does not load anything - call `load()` or `load_or_create()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Create a manager rooted at a pipeline configuration directory.
    ///
    /// The settings file lives at `<config root>/settings.toml`.
    pub fn for_config_root(config_root: &Path) -> Self {
        Self::new(config_root.join("settings.toml"))
    }

    /// Get the settings file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a mutable reference to the current settings.
    ///
    /// Changes are only in memory until `save()` or `update_section()`
    /// is called.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Load settings from file.
    ///
    /// Returns an error if the file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;
        tracing::debug!(path = %self.config_path.display(), "loaded settings");
        Ok(())
    }

    /// Load settings, creating the file with defaults if it doesn't exist.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            self.load()?;
        } else {
            self.settings = Settings::default();
            self.save()?;
        }
        Ok(())
    }

    /// Ensure all configured folders exist.
    ///
    /// Should be called after `load_or_create()`.
    pub fn ensure_dirs_exist(&self) -> ConfigResult<()> {
        for dir in [
            &self.settings.paths.logs_folder,
            &self.settings.paths.cache_folder,
        ] {
            let path = PathBuf::from(dir);
            if !path.exists() {
                fs::create_dir_all(&path)?;
            }
        }
        Ok(())
    }

    /// Get the logs folder path.
    pub fn logs_folder(&self) -> PathBuf {
        PathBuf::from(&self.settings.paths.logs_folder)
    }

    /// Save the entire settings file atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let mut output = String::new();
        output.push_str("# PTK pipeline configuration settings\n");
        output.push_str("# Auto-generated; hand edits to known keys are preserved.\n\n");
        output.push_str(&toml::to_string_pretty(&self.settings)?);

        self.atomic_write(&output)?;
        tracing::debug!(path = %self.config_path.display(), "saved settings");
        Ok(())
    }

    /// Update a single section atomically.
    ///
    /// Re-reads the file from disk, replaces only the requested table,
    /// and writes back. In-memory drift in other sections never reaches
    /// the file.
    pub fn update_section(&mut self, section: ConfigSection) -> ConfigResult<()> {
        let current_content = if self.config_path.exists() {
            fs::read_to_string(&self.config_path)?
        } else {
            String::new()
        };

        let mut doc: DocumentMut = if current_content.is_empty() {
            DocumentMut::new()
        } else {
            current_content.parse()?
        };

        let section_toml = match section {
            ConfigSection::Paths => toml::to_string_pretty(&self.settings.paths)?,
            ConfigSection::Logging => toml::to_string_pretty(&self.settings.logging)?,
            ConfigSection::Python => toml::to_string_pretty(&self.settings.python)?,
            ConfigSection::Tracking => toml::to_string_pretty(&self.settings.tracking)?,
        };

        let section_doc: DocumentMut = section_toml.parse()?;
        doc[section.table_name()] = Item::Table(section_doc.as_table().clone());

        self.atomic_write(&doc.to_string())?;
        Ok(())
    }

    /// Write content to the settings file atomically.
    ///
    /// Writes to a temp file in the same directory first, then renames.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.config_path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}
