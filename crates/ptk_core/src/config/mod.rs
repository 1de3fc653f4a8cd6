//! Pipeline configuration: active-config resolution and settings persistence.
//!
//! Two concerns live here:
//! - Resolving which pipeline configuration the process is running
//!   against (driven by the `PTK_CURRENT_CONFIG` environment variable).
//! - Loading and saving the TOML settings file that belongs to a
//!   configuration, with atomic writes and section-level updates.

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, LoggingSettings, PathSettings, PythonSettings, Settings, TrackingSettings,
};

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::constants::CURRENT_CONFIG_ENV_VAR;

/// Resolve the path of the active pipeline configuration.
///
/// Reads `PTK_CURRENT_CONFIG`. Returns `None` when the variable is unset
/// or blank - callers fall back to their own defaults in that case.
pub fn current_config_path() -> Option<PathBuf> {
    config_path_from(env::var_os(CURRENT_CONFIG_ENV_VAR))
}

/// Pure half of [`current_config_path`], split out so it can be tested
/// without touching the process environment.
fn config_path_from(value: Option<OsString>) -> Option<PathBuf> {
    let value = value?;
    let trimmed = value.to_string_lossy().trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_var_resolves_to_none() {
        assert_eq!(config_path_from(None), None);
    }

    #[test]
    fn blank_var_resolves_to_none() {
        assert_eq!(config_path_from(Some(OsString::from(""))), None);
        assert_eq!(config_path_from(Some(OsString::from("   "))), None);
    }

    #[test]
    fn set_var_resolves_to_path() {
        let resolved = config_path_from(Some(OsString::from("/studio/configs/show_a")));
        assert_eq!(resolved, Some(PathBuf::from("/studio/configs/show_a")));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let resolved = config_path_from(Some(OsString::from("  /studio/configs/show_a\n")));
        assert_eq!(resolved, Some(PathBuf::from("/studio/configs/show_a")));
    }
}
