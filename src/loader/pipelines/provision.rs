//! Provisioning pipeline
//!
//! Scans candidate locations, extracts the requested libraries into the
//! first writable one and loads them, retrying once with the 32-bit build
//! when the loader reports an architecture mismatch.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::platform::HostInfo;

use super::super::operations::{can_write, extract_library, DynamicLoader, ResourceSource};
use super::super::pure::{extraction_dir, platform_file_name};
use super::super::types::ExtractOutcome;

/// First candidate location that passes the write probe
pub fn discover_extract_location<I>(locations: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    locations
        .into_iter()
        .find(|location| can_write(location))
        .ok_or(Error::NoWritableLocation)
}

/// Extracts and loads bundled natives for one host
pub struct Provisioner<R, L> {
    host: HostInfo,
    resources: R,
    loader: L,
}

impl<R: ResourceSource, L: DynamicLoader> Provisioner<R, L> {
    pub fn new(host: HostInfo, resources: R, loader: L) -> Self {
        Self {
            host,
            resources,
            loader,
        }
    }

    pub fn host(&self) -> HostInfo {
        self.host
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn into_loader(self) -> L {
        self.loader
    }

    /// Load `names` (dependencies first) using the locations from `config`.
    ///
    /// Returns the directory the libraries were loaded from.
    pub fn load_library<S: AsRef<str>>(&mut self, config: &LoaderConfig, names: &[S]) -> Result<PathBuf> {
        self.load_library_from(config.candidate_locations(), names)
    }

    /// Load `names` from the first location that works.
    ///
    /// Locations failing the write probe are skipped without an attempt.
    /// For a writable location the 64-bit build is tried first, then the
    /// 32-bit build if the loader reported an architecture mismatch. When
    /// nothing works the error wraps the first failure seen; later failures
    /// are kept as secondary errors.
    pub fn load_library_from<I, S>(&mut self, locations: I, names: &[S]) -> Result<PathBuf>
    where
        I: IntoIterator<Item = PathBuf>,
        S: AsRef<str>,
    {
        let mut first: Option<Error> = None;
        let mut secondary = Vec::new();
        let mut record = |e: Error| {
            if first.is_none() {
                first = Some(e);
            } else {
                secondary.push(e);
            }
        };

        for location in locations {
            if !can_write(&location) {
                tracing::debug!(location = %location.display(), "location not writable, skipping");
                continue;
            }

            let dir = extraction_dir(&location);
            let err = match self.load_all(&dir, true, names) {
                Ok(()) => return Ok(dir),
                Err(e) => e,
            };

            tracing::warn!(dir = %dir.display(), error = %err, "loading natives failed");
            let retry_32bit = err.is_architecture_mismatch();
            record(err);

            if retry_32bit {
                tracing::info!(dir = %dir.display(), "architecture mismatch, retrying with 32-bit natives");
                match self.load_all(&dir, false, names) {
                    Ok(()) => return Ok(dir),
                    Err(e) => {
                        tracing::warn!(dir = %dir.display(), error = %e, "32-bit retry failed");
                        record(e);
                    }
                }
            }
        }

        match first {
            Some(first) => Err(Error::Exhausted {
                first: Box::new(first),
                secondary,
            }),
            None => Err(Error::NoWritableLocation),
        }
    }

    /// Extract and load every library into `dir`, in the order given
    pub fn load_all<S: AsRef<str>>(&mut self, dir: &Path, use_64: bool, names: &[S]) -> Result<()> {
        for name in names {
            let file_name = platform_file_name(name.as_ref(), &self.host, use_64);
            let lib_path = dir.join(&file_name);

            if extract_library(&self.resources, &lib_path, &file_name)? == ExtractOutcome::ReusedExisting {
                tracing::debug!(path = %lib_path.display(), "loading previously extracted file");
            }

            let canonical = fs::canonicalize(&lib_path).map_err(|source| Error::Extract {
                path: lib_path.clone(),
                source,
            })?;
            self.loader.load(&canonical)?;
        }

        tracing::info!(
            dir = %dir.display(),
            use_64,
            count = names.len(),
            "native libraries loaded"
        );
        Ok(())
    }
}
