//! PTK Core - Backend library for the PTK pipeline toolkit
//!
//! This crate contains the environment plumbing shared by every PTK host:
//! pipeline configuration resolution, settings persistence, logging
//! bootstrap, and small studio utilities (login name lookup, server URL
//! sanitizing). It has zero UI dependencies and can be used from a DCC
//! integration, a CLI tool, or a GUI application.

pub mod config;
pub mod constants;
pub mod logging;
pub mod util;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
