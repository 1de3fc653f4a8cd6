//! Types describing a resolved Qt binding.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Requested Qt interface version.
///
/// A closed set of tags. `Qt5` resolves against PySide2 and `Qt6`
/// against PySide6. `Qt4` is the historical default interface and is no
/// longer backed by any binding family; requesting it yields the empty
/// result rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QtInterface {
    /// Legacy interface, no longer backed by a binding.
    #[default]
    Qt4,
    /// PySide2-backed interface.
    Qt5,
    /// PySide6-backed interface.
    Qt6,
}

impl std::fmt::Display for QtInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QtInterface::Qt4 => write!(f, "Qt4"),
            QtInterface::Qt5 => write!(f, "Qt5"),
            QtInterface::Qt6 => write!(f, "Qt6"),
        }
    }
}

/// Opaque reference to a Python module loaded in the studio interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleHandle {
    /// Dotted module name, e.g. `PySide2.QtGui`.
    pub name: String,
    /// Filesystem location the interpreter reported for the module.
    pub path: PathBuf,
}

/// A successfully resolved Qt binding.
///
/// Either every field is populated or no value exists at all: the
/// resolver returns `Option<ResolvedBinding>` and a partially loaded
/// binding is not representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBinding {
    /// Binding display name (`PySide2`, `PySide6`).
    pub name: String,
    /// Binding version as an ordered integer sequence.
    pub version: Vec<u32>,
    /// Handle to the binding's root package.
    pub root: ModuleHandle,
    /// Sub-module name to handle. Includes the shiboken companion under
    /// the fixed key [`crate::probe::SHIBOKEN_KEY`].
    pub modules: BTreeMap<String, ModuleHandle>,
    /// Version of the underlying Qt toolkit.
    pub qt_version: Vec<u32>,
}

/// Converts a dot-separated version string into an integer sequence.
///
/// Tolerates any number of components: `"6.5.2"` yields `[6, 5, 2]`,
/// `"6.5"` yields `[6, 5]`. Returns `None` when any component is not a
/// plain integer.
pub fn parse_version_tuple(version_str: &str) -> Option<Vec<u32>> {
    version_str
        .trim()
        .split('.')
        .map(|component| component.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_component_version_parses() {
        assert_eq!(parse_version_tuple("6.5.2"), Some(vec![6, 5, 2]));
    }

    #[test]
    fn two_component_version_parses() {
        assert_eq!(parse_version_tuple("6.5"), Some(vec![6, 5]));
    }

    #[test]
    fn long_version_parses() {
        assert_eq!(parse_version_tuple("5.15.2.1"), Some(vec![5, 15, 2, 1]));
    }

    #[test]
    fn non_numeric_components_are_rejected() {
        assert_eq!(parse_version_tuple(""), None);
        assert_eq!(parse_version_tuple("6.5.x"), None);
        assert_eq!(parse_version_tuple("6.5.0rc1"), None);
    }

    #[test]
    fn interface_displays_as_qt_name() {
        assert_eq!(QtInterface::Qt5.to_string(), "Qt5");
        assert_eq!(QtInterface::Qt6.to_string(), "Qt6");
    }

    #[test]
    fn default_interface_is_legacy_qt4() {
        assert_eq!(QtInterface::default(), QtInterface::Qt4);
    }
}
