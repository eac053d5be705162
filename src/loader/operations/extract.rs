//! Library extraction
//!
//! Copies a bundled library to disk. The bytes go to a temporary file in the
//! destination directory which is then moved over the destination, so a
//! failed copy never leaves a truncated library behind.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::super::pure::extraction_dir;
use super::super::types::ExtractOutcome;
use super::probe::set_executable;
use super::resources::ResourceSource;

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Extract the bundled resource `name` to `destination`.
///
/// If the write fails but the destination already exists, most likely
/// because another process has it open, the existing file is used instead.
/// A resource that is not bundled at all is always an error.
pub fn extract_library(
    resources: &dyn ResourceSource,
    destination: &Path,
    name: &str,
) -> Result<ExtractOutcome> {
    let Some(mut input) = resources.open(name) else {
        return Err(Error::ResourceMissing {
            name: name.to_string(),
            path: absolute(destination),
        });
    };

    match write_replacing(&mut input, destination) {
        Ok(bytes) => {
            tracing::debug!(path = %destination.display(), bytes, "extracted library");
            Ok(ExtractOutcome::Written)
        }
        Err(e) if destination.exists() => {
            tracing::warn!(
                path = %destination.display(),
                error = %e,
                "extraction failed, using existing file"
            );
            Ok(ExtractOutcome::ReusedExisting)
        }
        Err(e) => Err(Error::Extract {
            path: absolute(destination),
            source: e,
        }),
    }
}

fn write_replacing(input: &mut dyn Read, destination: &Path) -> io::Result<u64> {
    let dir = extraction_dir(destination);
    let mut staged = tempfile::Builder::new()
        .prefix(".extract-")
        .tempfile_in(&dir)?;

    let bytes = io::copy(input, &mut staged)?;
    staged.as_file().sync_all()?;
    set_executable(staged.path())?;

    staged.persist(destination).map_err(|e| e.error)?;
    Ok(bytes)
}
