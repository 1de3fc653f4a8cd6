//! Toolkit-wide constants.

/// Environment variable that, when set, forces debug-level logging.
pub const DEBUG_LOGGING_ENV_VAR: &str = "PTK_DEBUG";

/// Environment variable pointing at the active pipeline configuration.
///
/// Set by the launcher (or by a localized configuration's own bootstrap)
/// so that the right configuration is associated with the running
/// project.
pub const CURRENT_CONFIG_ENV_VAR: &str = "PTK_CURRENT_CONFIG";

/// URL for contacting support.
pub const SUPPORT_URL: &str = "https://support.ptk.studio/contact";
