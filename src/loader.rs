//! Native library provisioning
//!
//! Extracts bundled Steamworks natives to the first writable location and
//! hands them to the OS dynamic loader, dependencies first.
//!
//! ## Module Structure
//! - `types.rs`: ExtractOutcome
//! - `pure/`: Pure functions (file naming, binary header bitness, location dirs)
//! - `operations/`: Atomic I/O operations (candidate locations, write probe, extraction, loading)
//! - `pipelines/`: High-level orchestration (Provisioner)

mod operations;
mod pipelines;
mod pure;
mod types;

#[cfg(test)]
mod tests;

// Re-export types for external use
pub use types::ExtractOutcome;

// Re-export key functions for direct access
pub use operations::{
    can_write, extract_library, CandidateLocations, DynamicLoader, EmbeddedResources,
    ResourceDir, ResourceSource, SystemLoader,
};
pub use pipelines::{discover_extract_location, Provisioner};
pub use pure::{binary_is_64bit, extraction_dir, platform_file_name};
