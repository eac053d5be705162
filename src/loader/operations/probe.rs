//! Write/execute capability probe
//!
//! A location is only usable if files written there can also be executed,
//! which rules out `noexec` mounts even when they are writable.

use std::fs;
use std::path::Path;

use super::super::pure::extraction_dir;

/// Check whether libraries can be extracted next to `location` and executed.
///
/// An existing location file must be writable and executable (it is made
/// executable if needed). Otherwise the parent directory is created if
/// missing and must be a directory. In both cases a uniquely named probe file
/// is written to the directory, marked executable, and removed again.
pub fn can_write(location: &Path) -> bool {
    let folder = extraction_dir(location);

    if location.exists() {
        if !is_writable(location) || !can_execute(location) {
            tracing::debug!(path = %location.display(), "existing file not writable/executable");
            return false;
        }
    } else {
        if !folder.exists() {
            if let Err(e) = fs::create_dir_all(&folder) {
                tracing::debug!(dir = %folder.display(), error = %e, "cannot create extraction dir");
                return false;
            }
        }
        if !folder.is_dir() {
            tracing::debug!(dir = %folder.display(), "extraction dir is not a directory");
            return false;
        }
    }

    // Removed again when dropped, whatever the outcome
    let probe = match tempfile::Builder::new().prefix(".probe-").tempfile_in(&folder) {
        Ok(probe) => probe,
        Err(e) => {
            tracing::debug!(dir = %folder.display(), error = %e, "probe file could not be written");
            return false;
        }
    };

    let executable = can_execute(probe.path());
    if !executable {
        tracing::debug!(dir = %folder.display(), "probe file could not be made executable");
    }
    executable
}

/// True if the file is executable, marking it executable first if needed
pub(crate) fn can_execute(path: &Path) -> bool {
    if is_executable(path) {
        return true;
    }
    set_executable(path).is_ok() && is_executable(path)
}

#[cfg(unix)]
fn access(path: &Path, mode: libc::c_int) -> bool {
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = std::ffi::CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call
    unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
}

#[cfg(unix)]
fn is_writable(path: &Path) -> bool {
    access(path, libc::W_OK)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    access(path, libc::X_OK)
}

#[cfg(unix)]
pub(super) fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}

// Any readable file may be mapped as a library on Windows
#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(not(unix))]
pub(super) fn set_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
