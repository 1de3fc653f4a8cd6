//! Logging bootstrap built on the `tracing` ecosystem.
//!
//! Precedence for the effective filter, highest first:
//! - `RUST_LOG` environment variable
//! - `PTK_DEBUG` set to anything non-empty forces debug level
//! - the default level passed by the caller

use std::env;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::DEBUG_LOGGING_ENV_VAR;

/// Log level for filtering messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Filter directive string understood by `EnvFilter`.
    pub fn filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Initialize the global tracing subscriber for application-wide logging.
///
/// Should be called once at process startup, before any other toolkit
/// call. Panics if a global subscriber is already installed.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(effective_level(default_level).filter_str()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

/// Apply the `PTK_DEBUG` override to the caller's default level.
fn effective_level(default_level: LogLevel) -> LogLevel {
    if debug_env_set(env::var_os(DEBUG_LOGGING_ENV_VAR).as_deref()) {
        LogLevel::Debug
    } else {
        default_level
    }
}

fn debug_env_set(value: Option<&std::ffi::OsStr>) -> bool {
    value.map(|v| !v.is_empty()).unwrap_or(false)
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn filter_str_matches_level() {
        assert_eq!(LogLevel::Debug.filter_str(), "debug");
        assert_eq!(LogLevel::Info.filter_str(), "info");
    }

    #[test]
    fn debug_flag_requires_non_empty_value() {
        assert!(!debug_env_set(None));
        assert!(!debug_env_set(Some(OsStr::new(""))));
        assert!(debug_env_set(Some(OsStr::new("1"))));
    }

    #[test]
    fn test_tracing_initializes() {
        init_test_tracing();
    }
}
