//! Qt importer: the caller-facing surface over binding resolution.

use std::collections::BTreeMap;

use crate::interpreter::PythonInterpreter;
use crate::probe;
use crate::types::{ModuleHandle, QtInterface, ResolvedBinding};

/// Resolve the binding backing the requested Qt interface.
///
/// Best effort by policy: an unsupported tag or an absent binding is
/// `None`, never an error. The result is fully populated or absent,
/// nothing in between.
pub fn resolve(
    interface: QtInterface,
    interpreter: &PythonInterpreter,
) -> Option<ResolvedBinding> {
    tracing::debug!(%interface, "requesting Qt interface");

    let binding = match interface {
        // Qt4-era bindings are gone; the tag survives only as the
        // historical default.
        QtInterface::Qt4 => None,
        QtInterface::Qt5 => probe::probe_pyside2(interpreter),
        QtInterface::Qt6 => probe::probe_pyside6(interpreter),
    };

    match &binding {
        Some(resolved) => tracing::debug!(name = %resolved.name, "resolved Qt binding"),
        None => tracing::debug!(%interface, "no Qt binding matching that interface was found"),
    }

    binding
}

/// Resolved Qt binding with uniform accessors.
///
/// Wraps the outcome of [`resolve`]. Every accessor returns `None` when
/// nothing was resolved, so call sites read the same whether or not the
/// environment carries a Qt stack.
#[derive(Debug, Clone)]
pub struct QtImporter {
    binding: Option<ResolvedBinding>,
}

impl QtImporter {
    /// Resolve using the interpreter configured in the environment.
    pub fn new(interface: QtInterface) -> Self {
        Self::with_interpreter(interface, &PythonInterpreter::from_env())
    }

    /// Resolve using a specific interpreter.
    pub fn with_interpreter(interface: QtInterface, interpreter: &PythonInterpreter) -> Self {
        Self {
            binding: resolve(interface, interpreter),
        }
    }

    /// Whether a binding was resolved at all.
    pub fn is_available(&self) -> bool {
        self.binding.is_some()
    }

    /// The resolved binding, if any.
    pub fn binding(&self) -> Option<&ResolvedBinding> {
        self.binding.as_ref()
    }

    /// Name of the resolved binding (`PySide2`, `PySide6`).
    pub fn binding_name(&self) -> Option<&str> {
        self.binding.as_ref().map(|b| b.name.as_str())
    }

    /// Version of the resolved binding.
    pub fn binding_version(&self) -> Option<&[u32]> {
        self.binding.as_ref().map(|b| b.version.as_slice())
    }

    /// Version of the underlying Qt toolkit.
    pub fn qt_version_tuple(&self) -> Option<&[u32]> {
        self.binding.as_ref().map(|b| b.qt_version.as_slice())
    }

    /// Handle to the binding's root package.
    pub fn root(&self) -> Option<&ModuleHandle> {
        self.binding.as_ref().map(|b| &b.root)
    }

    /// All sub-modules available for this binding.
    pub fn modules(&self) -> Option<&BTreeMap<String, ModuleHandle>> {
        self.binding.as_ref().map(|b| &b.modules)
    }

    /// Look up a sub-module by name.
    pub fn module(&self, name: &str) -> Option<&ModuleHandle> {
        self.binding.as_ref().and_then(|b| b.modules.get(name))
    }

    /// QtCore, if available.
    pub fn qt_core(&self) -> Option<&ModuleHandle> {
        self.module("QtCore")
    }

    /// QtGui, if available.
    pub fn qt_gui(&self) -> Option<&ModuleHandle> {
        self.module("QtGui")
    }

    /// QtNetwork, if available.
    pub fn qt_network(&self) -> Option<&ModuleHandle> {
        self.module("QtNetwork")
    }

    /// QtWidgets, if available.
    pub fn qt_widgets(&self) -> Option<&ModuleHandle> {
        self.module("QtWidgets")
    }

    /// The shiboken companion module for the resolved binding.
    pub fn shiboken(&self) -> Option<&ModuleHandle> {
        self.module(probe::SHIBOKEN_KEY)
    }
}
