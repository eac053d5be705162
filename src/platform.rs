//! Host platform detection
//!
//! The host is detected once at startup and carried around as a plain
//! [`HostInfo`] value. Nothing here is global.

use crate::error::{Error, Result};

/// Operating systems the Steamworks natives ship for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::Linux => write!(f, "linux"),
            Platform::MacOs => write!(f, "macos"),
        }
    }
}

/// Immutable description of the running host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostInfo {
    pub platform: Platform,
    /// True for a 64-bit x86 host process
    pub is_64bit: bool,
}

impl HostInfo {
    pub fn new(platform: Platform, is_64bit: bool) -> Self {
        Self { platform, is_64bit }
    }

    /// Detect the host from OS name and architecture strings.
    ///
    /// Accepts both the short names Rust reports (`windows`, `macos`) and the
    /// long forms other runtimes use (`Windows 10`, `Mac OS X`). An OS that
    /// matches none of the supported platforms is an error the caller cannot
    /// recover from, since no file naming scheme can be chosen.
    pub fn detect(os_name: &str, os_arch: &str) -> Result<Self> {
        let os = os_name.to_lowercase();

        let platform = if os.contains("windows") {
            Platform::Windows
        } else if os.contains("linux") {
            Platform::Linux
        } else if os.contains("mac") {
            Platform::MacOs
        } else {
            return Err(Error::UnknownPlatform {
                os_name: os_name.to_string(),
                os_arch: os_arch.to_string(),
            });
        };

        let is_64bit = os_arch == "amd64" || os_arch == "x86_64";

        Ok(Self { platform, is_64bit })
    }

    /// Detect the host this binary was compiled for
    pub fn current() -> Result<Self> {
        Self::detect(std::env::consts::OS, std::env::consts::ARCH)
    }
}
