//! Library file naming

use std::path::{Path, PathBuf};

use crate::platform::{HostInfo, Platform};

/// Map a logical library name to the file the platform ships.
///
/// Windows natives come in two builds; the `64` suffix is only used when the
/// host is 64-bit and the caller asks for the 64-bit build.
pub fn platform_file_name(lib_name: &str, host: &HostInfo, use_64: bool) -> String {
    match host.platform {
        Platform::Windows => {
            let suffix = if host.is_64bit && use_64 { "64" } else { "" };
            format!("{}{}.dll", lib_name, suffix)
        }
        Platform::Linux => format!("lib{}.so", lib_name),
        Platform::MacOs => format!("lib{}.dylib", lib_name),
    }
}

/// Directory libraries are extracted into for a candidate location.
///
/// A bare file name lives in the current working directory.
pub fn extraction_dir(location: &Path) -> PathBuf {
    match location.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
