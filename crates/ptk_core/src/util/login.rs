//! Login name lookup for the current user.
//!
//! The login name seeds user resolution against the tracking server. It
//! is an environment-dependent convenience: callers must handle `None`,
//! the lookup never fails loudly.

use once_cell::sync::Lazy;

static LOGIN_NAME: Lazy<Option<String>> = Lazy::new(lookup_login_name);

/// Retrieves the login name of the current user.
///
/// Returns `None` if no login name could be determined. The result is
/// cached for the lifetime of the process.
pub fn get_login_name() -> Option<String> {
    LOGIN_NAME.clone()
}

#[cfg(windows)]
fn lookup_login_name() -> Option<String> {
    std::env::var("USERNAME").ok().filter(|name| !name.is_empty())
}

#[cfg(unix)]
fn lookup_login_name() -> Option<String> {
    // Real effective user, via the passwd database. getpwuid_r is the
    // re-entrant variant; the name is copied out of the caller-owned
    // buffer before it goes away.
    use std::ffi::CStr;

    let mut passwd: libc::passwd = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::passwd = std::ptr::null_mut();

    let buf_len = match unsafe { libc::sysconf(libc::_SC_GETPW_R_SIZE_MAX) } {
        len if len > 0 => len as usize,
        _ => 4096,
    };
    let mut buf = vec![0_i8; buf_len];

    let rc = unsafe {
        libc::getpwuid_r(
            libc::geteuid(),
            &mut passwd,
            buf.as_mut_ptr() as *mut libc::c_char,
            buf.len(),
            &mut result,
        )
    };

    if rc != 0 || result.is_null() {
        return None;
    }

    let name = unsafe { CStr::from_ptr(passwd.pw_name) };
    name.to_str()
        .ok()
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}

#[cfg(not(any(unix, windows)))]
fn lookup_login_name() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_name_is_non_empty_or_absent() {
        match get_login_name() {
            Some(name) => assert!(!name.is_empty()),
            None => {}
        }
    }

    #[test]
    fn login_name_is_stable_across_calls() {
        assert_eq!(get_login_name(), get_login_name());
    }
}
