pub mod operations;
pub mod types;

// Re-export types
pub use types::LoaderConfig;

// Re-export operations
pub use operations::{load_cfg, save_cfg};
