//! PTK Qt - Qt binding resolution for the PTK pipeline toolkit
//!
//! Studio hosts ship wildly different Python/Qt stacks: some bundle
//! PySide2, newer ones PySide6, batch farms often neither. This crate
//! resolves whichever binding backs a requested Qt interface version by
//! probing the studio Python interpreter over a subprocess, and hands
//! back a uniform, fully-populated-or-empty description of what it
//! found. Binding resolution is best effort by design: an absent
//! binding is an empty result, never an error.
//!
//! # Example
//!
//! ```no_run
//! use ptk_qt::{QtImporter, QtInterface};
//!
//! let importer = QtImporter::new(QtInterface::Qt5);
//! if let Some(name) = importer.binding_name() {
//!     println!("resolved {} (Qt {:?})", name, importer.qt_version_tuple());
//! } else {
//!     println!("no Qt binding available");
//! }
//! ```

pub mod importer;
pub mod interpreter;
pub mod probe;
pub mod types;

pub use importer::{resolve, QtImporter};
pub use interpreter::{InterpreterError, PythonInterpreter};
pub use probe::{SHIBOKEN_KEY, SKIP_WEBENGINE_ENV_VAR};
pub use types::{parse_version_tuple, ModuleHandle, QtInterface, ResolvedBinding};
