//! Error types for steamworks-loader.
//!
//! Messages are lower case and follow `"<operation> failed: <reason>"` or
//! `"<entity> not found: <identifier>"`, with the offending path included
//! whenever one is known.

use std::path::PathBuf;
use thiserror::Error;

/// Why the dynamic loader rejected a library.
///
/// Set by the loader at the call site so the provisioner never has to sniff
/// error messages to decide whether a 32-bit retry is worthwhile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadErrorKind {
    /// The library was built for a different word size than this process.
    ArchitectureMismatch,
    /// Any other loader failure (missing dependency, bad symbol, ...).
    #[default]
    Other,
}

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while provisioning native libraries.
#[derive(Error, Debug)]
pub enum Error {
    /// The host OS matches none of the supported platforms.
    #[error("unknown host platform: {os_name}, {os_arch}")]
    UnknownPlatform {
        /// OS name as reported by the host.
        os_name: String,
        /// Architecture as reported by the host.
        os_arch: String,
    },

    /// No bundled resource exists for a library file name.
    #[error("resource not found: {name} (extracting to {})", path.display())]
    ResourceMissing {
        /// File name that was looked up.
        name: String,
        /// Absolute destination the resource would have been written to.
        path: PathBuf,
    },

    /// Writing an extracted library to disk failed.
    #[error("library extraction failed: {}: {source}", path.display())]
    Extract {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The dynamic loader refused a library.
    #[error("library load failed: {}: {reason}", path.display())]
    Load {
        /// Path handed to the loader.
        path: PathBuf,
        /// Classification of the failure.
        kind: LoadErrorKind,
        /// Loader-provided description.
        reason: String,
    },

    /// None of the candidate locations passed the write probe.
    #[error("no suitable extraction path found")]
    NoWritableLocation,

    /// Every writable location and bitness combination failed.
    ///
    /// `first` is the earliest failure observed; everything after it,
    /// including failed 32-bit retries, is kept in `secondary`.
    #[error("native libraries could not be loaded: {first}")]
    Exhausted {
        /// First failure in scan order.
        #[source]
        first: Box<Error>,
        /// Later failures, in the order they happened.
        secondary: Vec<Error>,
    },

    /// Configuration could not be serialized or parsed.
    #[error("config operation failed: {0}")]
    Config(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("io operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a load error with an explicit classification.
    pub fn load(path: impl Into<PathBuf>, kind: LoadErrorKind, reason: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            kind,
            reason: reason.into(),
        }
    }

    /// Returns true if a 32-bit retry may succeed where this attempt failed.
    pub fn is_architecture_mismatch(&self) -> bool {
        matches!(
            self,
            Error::Load {
                kind: LoadErrorKind::ArchitectureMismatch,
                ..
            }
        )
    }

    /// The path this error is about, if it has one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::ResourceMissing { path, .. }
            | Error::Extract { path, .. }
            | Error::Load { path, .. } => Some(path),
            _ => None,
        }
    }
}
