//! Pure functions for the loader
//!
//! These functions have no side effects and are deterministic.

mod binary_header;
mod file_name;

pub use binary_header::binary_is_64bit;
pub use file_name::{extraction_dir, platform_file_name};
