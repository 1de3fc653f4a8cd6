//! Binding probes run through the studio Python interpreter.
//!
//! Each probe is a short Python program executed with `python -c`. The
//! program imports the binding family's root package, then tries every
//! optional sub-module individually - availability varies by build, and
//! one broken sub-module must not hide the rest - and prints a JSON
//! report on stdout. `null` means the family is not installed at all.
//!
//! Every failure mode on this path (missing interpreter, missing
//! binding, garbled report, unparseable version) collapses to `None`
//! with a debug breadcrumb. Binding availability is a convenience, not
//! a correctness guarantee.

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;

use crate::interpreter::PythonInterpreter;
use crate::types::{parse_version_tuple, ModuleHandle, ResolvedBinding};

/// Environment flag that excludes `QtWebEngineWidgets` from the PySide2
/// probe. Importing it deadlocks some hosts (Maya 2018 on Windows); the
/// host integration sets this flag when it detects that situation.
pub const SKIP_WEBENGINE_ENV_VAR: &str = "PTK_SKIP_QTWEBENGINEWIDGETS";

/// Fixed key under which the family's shiboken companion module is
/// stored, so callers reach it the same way for either family.
pub const SHIBOKEN_KEY: &str = "shiboken";

/// Optional PySide2 sub-modules, tried one at a time.
///
/// QtCore is not listed: it is the canary import that decides whether
/// the family exists at all.
const PYSIDE2_SUB_MODULES: &[&str] = &[
    "QtGui",
    "QtHelp",
    "QtNetwork",
    "QtPrintSupport",
    "QtQml",
    "QtQuick",
    "QtQuickWidgets",
    "QtScript",
    "QtSvg",
    "QtTest",
    "QtUiTools",
    "QtWebChannel",
    "QtWebKit",
    "QtWebKitWidgets",
    "QtWidgets",
    "QtWebSockets",
    "QtXml",
    "QtXmlPatterns",
    "QtScriptSql",
    "QtScriptTools",
    "QtOpenGL",
    "QtMultimedia",
];

/// Probe program for PySide2. Candidate sub-module names arrive in argv.
const PYSIDE2_PROBE: &str = r"
import json
import sys

try:
    from PySide2 import QtCore
    import PySide2
    import shiboken2
except Exception:
    print('null')
    sys.exit(0)

modules = {
    'QtCore': getattr(QtCore, '__file__', '') or '',
    'shiboken': getattr(shiboken2, '__file__', '') or '',
}
for name in sys.argv[1:]:
    try:
        wrapper = __import__('PySide2', globals(), locals(), [name])
        if hasattr(wrapper, name):
            modules[name] = getattr(getattr(wrapper, name), '__file__', '') or ''
    except Exception:
        pass

print(json.dumps({
    'name': PySide2.__name__,
    'version': PySide2.__version__,
    'path': getattr(PySide2, '__file__', '') or '',
    'qt_version': QtCore.qVersion(),
    'modules': modules,
}))
";

/// Probe program for PySide6. Sub-modules are discovered rather than
/// listed: the set varies too much across PySide6 builds to enumerate.
const PYSIDE6_PROBE: &str = r"
import json
import pkgutil
import sys

try:
    import PySide6
    import shiboken6
except Exception:
    print('null')
    sys.exit(0)

modules = {'shiboken': getattr(shiboken6, '__file__', '') or ''}
for info in pkgutil.iter_modules(PySide6.__path__):
    name = info.name
    try:
        wrapper = __import__('PySide6', globals(), locals(), [name])
        if hasattr(wrapper, name):
            modules[name] = getattr(getattr(wrapper, name), '__file__', '') or ''
    except Exception:
        pass

print(json.dumps({
    'name': PySide6.__name__,
    'version': PySide6.__version__,
    'path': getattr(PySide6, '__file__', '') or '',
    'qt_version': PySide6.__version__,
    'modules': modules,
}))
";

/// Report printed by a probe program.
#[derive(Debug, Deserialize)]
struct ProbeReport {
    name: String,
    version: String,
    path: String,
    qt_version: String,
    modules: BTreeMap<String, String>,
}

/// Resolve PySide2 for the Qt5 interface.
pub(crate) fn probe_pyside2(interpreter: &PythonInterpreter) -> Option<ResolvedBinding> {
    let skip_webengine = env::var_os(SKIP_WEBENGINE_ENV_VAR).is_some();
    let candidates = pyside2_candidate_modules(skip_webengine);
    let report = run_probe(interpreter, PYSIDE2_PROBE, &candidates)?;
    binding_from_report(report, "shiboken2")
}

/// Resolve PySide6 for the Qt6 interface.
pub(crate) fn probe_pyside6(interpreter: &PythonInterpreter) -> Option<ResolvedBinding> {
    let report = run_probe(interpreter, PYSIDE6_PROBE, &[])?;
    binding_from_report(report, "shiboken6")
}

/// Candidate sub-module list for the PySide2 probe.
fn pyside2_candidate_modules(skip_webengine: bool) -> Vec<&'static str> {
    let mut candidates = PYSIDE2_SUB_MODULES.to_vec();
    if !skip_webengine {
        candidates.push("QtWebEngineWidgets");
    }
    candidates
}

/// Run a probe program and parse its report.
fn run_probe(
    interpreter: &PythonInterpreter,
    program: &str,
    args: &[&str],
) -> Option<ProbeReport> {
    let output = Command::new(interpreter.exe())
        .arg("-c")
        .arg(program)
        .args(args)
        .output();

    let output = match output {
        Ok(output) => output,
        Err(error) => {
            tracing::debug!(
                exe = %interpreter.exe().display(),
                %error,
                "binding probe did not run"
            );
            return None;
        }
    };

    if !output.status.success() {
        tracing::debug!(
            exe = %interpreter.exe().display(),
            code = output.status.code().unwrap_or(-1),
            "binding probe exited with failure"
        );
        return None;
    }

    match serde_json::from_slice::<Option<ProbeReport>>(&output.stdout) {
        Ok(report) => report,
        Err(error) => {
            tracing::debug!(%error, "binding probe report was not parseable");
            None
        }
    }
}

/// Turn a probe report into a resolved binding.
///
/// Version strings that are not dotted integers make the whole binding
/// count as unavailable; a half-described binding is worse than none.
fn binding_from_report(report: ProbeReport, shiboken_module: &str) -> Option<ResolvedBinding> {
    let version = match parse_version_tuple(&report.version) {
        Some(version) => version,
        None => {
            tracing::debug!(version = %report.version, "binding version was not parseable");
            return None;
        }
    };
    let qt_version = match parse_version_tuple(&report.qt_version) {
        Some(version) => version,
        None => {
            tracing::debug!(version = %report.qt_version, "Qt version was not parseable");
            return None;
        }
    };

    let modules = report
        .modules
        .into_iter()
        .map(|(key, path)| {
            let name = if key == SHIBOKEN_KEY {
                shiboken_module.to_string()
            } else {
                format!("{}.{}", report.name, key)
            };
            (
                key,
                ModuleHandle {
                    name,
                    path: PathBuf::from(path),
                },
            )
        })
        .collect();

    Some(ResolvedBinding {
        root: ModuleHandle {
            name: report.name.clone(),
            path: PathBuf::from(report.path),
        },
        name: report.name,
        version,
        modules,
        qt_version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(version: &str, qt_version: &str) -> ProbeReport {
        ProbeReport {
            name: "PySide2".to_string(),
            version: version.to_string(),
            path: "/opt/pyside/PySide2/__init__.py".to_string(),
            qt_version: qt_version.to_string(),
            modules: BTreeMap::from([
                ("QtCore".to_string(), "/opt/pyside/PySide2/QtCore.so".to_string()),
                ("shiboken".to_string(), "/opt/pyside/shiboken2/__init__.py".to_string()),
            ]),
        }
    }

    #[test]
    fn candidate_list_includes_webengine_by_default() {
        let candidates = pyside2_candidate_modules(false);
        assert!(candidates.contains(&"QtWebEngineWidgets"));
        assert!(candidates.contains(&"QtGui"));
    }

    #[test]
    fn skip_flag_excludes_webengine() {
        let candidates = pyside2_candidate_modules(true);
        assert!(!candidates.contains(&"QtWebEngineWidgets"));
        assert_eq!(candidates.len(), PYSIDE2_SUB_MODULES.len());
    }

    #[test]
    fn report_builds_fully_populated_binding() {
        let binding = binding_from_report(report("5.15.2.1", "5.15.2"), "shiboken2").unwrap();
        assert_eq!(binding.name, "PySide2");
        assert_eq!(binding.version, vec![5, 15, 2, 1]);
        assert_eq!(binding.qt_version, vec![5, 15, 2]);
        assert_eq!(binding.root.name, "PySide2");

        let shiboken = &binding.modules[SHIBOKEN_KEY];
        assert_eq!(shiboken.name, "shiboken2");

        let qt_core = &binding.modules["QtCore"];
        assert_eq!(qt_core.name, "PySide2.QtCore");
    }

    #[test]
    fn junk_versions_make_the_binding_unavailable() {
        assert!(binding_from_report(report("5.15.x", "5.15.2"), "shiboken2").is_none());
        assert!(binding_from_report(report("5.15.2", "unknown"), "shiboken2").is_none());
    }

    #[test]
    fn probe_with_missing_interpreter_is_empty() {
        let interpreter = PythonInterpreter::new("/nonexistent/ptk-test-python");
        assert!(probe_pyside2(&interpreter).is_none());
        assert!(probe_pyside6(&interpreter).is_none());
    }
}
