//! Studio Python interpreter handle and version gate.
//!
//! The toolkit shells out to one configured interpreter for binding
//! probes and pipeline hooks. Interpreters older than the supported
//! floor are rejected at startup with a comprehensive error instead of
//! letting callers hit a confusing failure deep inside a probe.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::types::parse_version_tuple;

/// Environment variable overriding the interpreter executable.
pub const PYTHON_EXE_ENV_VAR: &str = "PTK_PYTHON";

/// Environment variable that downgrades the unsupported-version error
/// to a warning. Set to `1` to opt in.
pub const ALLOW_OLD_PYTHON_ENV_VAR: &str = "PTK_ALLOW_OLD_PYTHON";

/// Executable used when nothing else is configured.
const DEFAULT_EXE: &str = "python3";

/// Oldest interpreter the toolkit supports.
const MINIMUM_VERSION: [u32; 2] = [3, 7];

/// Interpreters below this still work but are scheduled for removal.
const DEPRECATED_BELOW: [u32; 2] = [3, 9];

/// Errors raised by the interpreter version gate.
#[derive(Error, Debug)]
pub enum InterpreterError {
    #[error("Could not query Python interpreter '{0}'")]
    Unavailable(PathBuf),

    #[error(
        "Python {found} is not supported; {minimum} or higher is required. \
         Set {ALLOW_OLD_PYTHON_ENV_VAR}=1 to run anyway, at your own risk."
    )]
    UnsupportedVersion { found: String, minimum: String },
}

/// Support status of an interpreter version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VersionSupport {
    TooOld,
    Deprecated,
    Supported,
}

/// Handle to the Python interpreter the toolkit runs probes through.
#[derive(Debug, Clone)]
pub struct PythonInterpreter {
    exe: PathBuf,
}

impl PythonInterpreter {
    /// Use the given executable. A bare name is looked up on PATH.
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }

    /// Use the executable named by `PTK_PYTHON`, falling back to
    /// `python3`.
    pub fn from_env() -> Self {
        let exe = env::var_os(PYTHON_EXE_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXE));
        Self { exe }
    }

    /// The interpreter executable.
    pub fn exe(&self) -> &Path {
        &self.exe
    }

    /// Query the interpreter's version.
    ///
    /// Returns `None` when the interpreter cannot be run or reports
    /// something that is not a dotted integer version.
    pub fn version(&self) -> Option<Vec<u32>> {
        let output = Command::new(&self.exe)
            .arg("-c")
            .arg("import platform; print(platform.python_version())")
            .output();

        let output = match output {
            Ok(output) => output,
            Err(error) => {
                tracing::debug!(exe = %self.exe.display(), %error, "interpreter did not run");
                return None;
            }
        };

        if !output.status.success() {
            tracing::debug!(exe = %self.exe.display(), "interpreter version query failed");
            return None;
        }

        parse_version_tuple(String::from_utf8_lossy(&output.stdout).trim())
    }

    /// Gate the interpreter version.
    ///
    /// Fails loud below the supported floor unless `PTK_ALLOW_OLD_PYTHON`
    /// is set to `1`, in which case a warning is emitted instead. A
    /// deprecated-but-working interpreter only warns.
    pub fn check_supported(&self) -> Result<(), InterpreterError> {
        let version = self
            .version()
            .ok_or_else(|| InterpreterError::Unavailable(self.exe.clone()))?;

        let allow_old = env::var(ALLOW_OLD_PYTHON_ENV_VAR).as_deref() == Ok("1");

        match classify_version(&version) {
            VersionSupport::TooOld if allow_old => {
                tracing::warn!(
                    found = %format_version(&version),
                    "running on an unsupported Python because {} is set; \
                     expect breakage",
                    ALLOW_OLD_PYTHON_ENV_VAR
                );
                Ok(())
            }
            VersionSupport::TooOld => Err(InterpreterError::UnsupportedVersion {
                found: format_version(&version),
                minimum: format_version(&MINIMUM_VERSION),
            }),
            VersionSupport::Deprecated => {
                tracing::warn!(
                    found = %format_version(&version),
                    "Python versions below {} are deprecated and support \
                     will be discontinued; please update the studio interpreter",
                    format_version(&DEPRECATED_BELOW)
                );
                Ok(())
            }
            VersionSupport::Supported => Ok(()),
        }
    }
}

impl Default for PythonInterpreter {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Classify a version against the support floor.
fn classify_version(version: &[u32]) -> VersionSupport {
    if version < &MINIMUM_VERSION[..] {
        VersionSupport::TooOld
    } else if version < &DEPRECATED_BELOW[..] {
        VersionSupport::Deprecated
    } else {
        VersionSupport::Supported
    }
}

/// Join a version tuple back into dotted form for messages.
fn format_version(version: &[u32]) -> String {
    version
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_below_floor_are_too_old() {
        assert_eq!(classify_version(&[2, 7, 18]), VersionSupport::TooOld);
        assert_eq!(classify_version(&[3, 6, 9]), VersionSupport::TooOld);
    }

    #[test]
    fn floor_versions_are_deprecated() {
        assert_eq!(classify_version(&[3, 7]), VersionSupport::Deprecated);
        assert_eq!(classify_version(&[3, 8, 12]), VersionSupport::Deprecated);
    }

    #[test]
    fn modern_versions_are_supported() {
        assert_eq!(classify_version(&[3, 9]), VersionSupport::Supported);
        assert_eq!(classify_version(&[3, 11, 2]), VersionSupport::Supported);
        assert_eq!(classify_version(&[4, 0]), VersionSupport::Supported);
    }

    #[test]
    fn format_version_joins_with_dots() {
        assert_eq!(format_version(&[3, 11, 2]), "3.11.2");
        assert_eq!(format_version(&MINIMUM_VERSION), "3.7");
    }

    #[test]
    fn missing_interpreter_reports_unavailable() {
        let interpreter = PythonInterpreter::new("/nonexistent/ptk-test-python");
        assert!(interpreter.version().is_none());
        assert!(matches!(
            interpreter.check_supported(),
            Err(InterpreterError::Unavailable(_))
        ));
    }
}
