//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level
//! updates.

use serde::{Deserialize, Serialize};

use crate::util::url::sanitize_url;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Studio Python interpreter settings.
    #[serde(default)]
    pub python: PythonSettings,

    /// Production-tracking server settings.
    #[serde(default)]
    pub tracking: TrackingSettings,
}

/// Identifies a single settings section for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Paths,
    Logging,
    Python,
    Tracking,
}

impl ConfigSection {
    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Logging => "logging",
            ConfigSection::Python => "python",
            ConfigSection::Tracking => "tracking",
        }
    }

    /// All sections, in file order.
    pub fn all() -> &'static [ConfigSection] {
        &[
            ConfigSection::Paths,
            ConfigSection::Logging,
            ConfigSection::Python,
            ConfigSection::Tracking,
        ]
    }
}

/// Folder locations used by the toolkit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder for per-session log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Folder for downloaded/cached pipeline data.
    #[serde(default = "default_cache_folder")]
    pub cache_folder: String,
}

fn default_logs_folder() -> String {
    ".ptk/logs".to_string()
}

fn default_cache_folder() -> String {
    ".ptk/cache".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            logs_folder: default_logs_folder(),
            cache_folder: default_cache_folder(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Enable debug-level output. The `PTK_DEBUG` environment variable
    /// overrides this at startup.
    #[serde(default)]
    pub debug: bool,

    /// Show module targets in log lines.
    #[serde(default = "default_true")]
    pub show_targets: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            debug: false,
            show_targets: true,
        }
    }
}

/// Studio Python interpreter settings.
///
/// The Qt binding resolver and any pipeline hooks written in Python run
/// through this interpreter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PythonSettings {
    /// Interpreter executable. A bare name is looked up on PATH.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
}

fn default_interpreter() -> String {
    "python3".to_string()
}

impl Default for PythonSettings {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
        }
    }
}

/// Production-tracking server settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackingSettings {
    /// Server URL. Stored sanitized: scheme + host + optional port only.
    #[serde(default)]
    pub server_url: String,
}

impl TrackingSettings {
    /// Set the server URL, sanitizing it first.
    ///
    /// Site addresses are compared against each other elsewhere in the
    /// pipeline, so they must be stored in canonical form.
    pub fn set_server_url(&mut self, raw: &str) {
        self.server_url = sanitize_url(raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed.python.interpreter, "python3");
        assert_eq!(parsed.paths.logs_folder, ".ptk/logs");
    }

    #[test]
    fn missing_sections_get_defaults() {
        let parsed: Settings = toml::from_str("[tracking]\nserver_url = \"\"\n").unwrap();
        assert!(parsed.logging.show_targets);
        assert_eq!(parsed.python.interpreter, "python3");
    }

    #[test]
    fn server_url_is_stored_sanitized() {
        let mut tracking = TrackingSettings::default();
        tracking.set_server_url("Studio.example.com/projects?id=3");
        assert_eq!(tracking.server_url, "https://studio.example.com");
    }

    #[test]
    fn section_table_names_match_serde() {
        let text = toml::to_string_pretty(&Settings::default()).unwrap();
        for section in ConfigSection::all() {
            assert!(text.contains(&format!("[{}]", section.table_name())));
        }
    }
}
