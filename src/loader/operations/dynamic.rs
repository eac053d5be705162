//! OS dynamic loader
//!
//! Loaded libraries stay mapped for as long as the loader that opened them
//! is alive.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use libloading::Library;

use crate::error::{Error, LoadErrorKind, Result};

use super::super::pure::binary_is_64bit;

/// `ERROR_BAD_EXE_FORMAT`: "%1 is not a valid Win32 application"
#[cfg(windows)]
const ERROR_BAD_EXE_FORMAT: i32 = 193;

/// Enough of the file to reach the PE optional header
const HEADER_PROBE_LEN: u64 = 4096;

/// Something that can map a shared library into the process
pub trait DynamicLoader {
    /// Load the library at `path`.
    ///
    /// Failures caused by a word-size mismatch must be reported with
    /// [`LoadErrorKind::ArchitectureMismatch`].
    fn load(&mut self, path: &Path) -> Result<()>;
}

/// Loads through the platform loader (`dlopen` / `LoadLibraryExW`)
#[derive(Default)]
pub struct SystemLoader {
    libraries: Vec<(PathBuf, Library)>,
}

impl std::fmt::Debug for SystemLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemLoader")
            .field("loaded", &self.loaded().collect::<Vec<_>>())
            .finish()
    }
}

impl SystemLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths of every library loaded so far, in load order
    pub fn loaded(&self) -> impl Iterator<Item = &Path> {
        self.libraries.iter().map(|(path, _)| path.as_path())
    }

    /// Keep every loaded library mapped until the process exits
    pub fn leak(self) {
        for (_, library) in self.libraries {
            std::mem::forget(library);
        }
    }
}

impl DynamicLoader for SystemLoader {
    fn load(&mut self, path: &Path) -> Result<()> {
        // SAFETY: library initialisers run here. The libraries are the
        // bundled natives extracted by this crate, which are trusted.
        match unsafe { Library::new(path) } {
            Ok(library) => {
                tracing::info!(path = %path.display(), "loaded native library");
                self.libraries.push((path.to_path_buf(), library));
                Ok(())
            }
            Err(e) => {
                let kind = classify_failure(path, &e);
                Err(Error::load(path, kind, e.to_string()))
            }
        }
    }
}

fn classify_failure(path: &Path, error: &libloading::Error) -> LoadErrorKind {
    if reports_bad_format(error) {
        return LoadErrorKind::ArchitectureMismatch;
    }

    let process_is_64bit = cfg!(target_pointer_width = "64");
    match read_header(path).as_deref().and_then(binary_is_64bit) {
        Some(lib_is_64bit) if lib_is_64bit != process_is_64bit => {
            LoadErrorKind::ArchitectureMismatch
        }
        _ => LoadErrorKind::Other,
    }
}

#[cfg(windows)]
fn reports_bad_format(error: &libloading::Error) -> bool {
    use std::error::Error as _;

    error
        .source()
        .and_then(|source| source.downcast_ref::<std::io::Error>())
        .and_then(std::io::Error::raw_os_error)
        == Some(ERROR_BAD_EXE_FORMAT)
}

#[cfg(not(windows))]
fn reports_bad_format(_error: &libloading::Error) -> bool {
    false
}

fn read_header(path: &Path) -> Option<Vec<u8>> {
    let mut header = Vec::new();
    File::open(path)
        .ok()?
        .take(HEADER_PROBE_LEN)
        .read_to_end(&mut header)
        .ok()?;
    Some(header)
}
