//! Loader type definitions

/// What `extract_library` did with the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// The bundled bytes were written to the destination
    Written,
    /// Writing failed but a file was already there (typically held open by
    /// another process), so that file is used as-is
    ReusedExisting,
}
