//! Extraction and loading of bundled Steamworks native libraries.
//!
//! The natives ship inside the application (embedded or next to the
//! executable). At startup they are copied to the first writable location
//! that also allows execution, then loaded in dependency order:
//!
//! ```no_run
//! use steamworks_loader::{HostInfo, LoaderConfig, Provisioner, ResourceDir, SystemLoader};
//!
//! # fn main() -> steamworks_loader::Result<()> {
//! let host = HostInfo::current()?;
//! let config = LoaderConfig::default();
//! let resources = ResourceDir::new(config.resource_dir()?);
//!
//! let mut provisioner = Provisioner::new(host, resources, SystemLoader::new());
//! provisioner.load_library(&config, &["steam_api", "steamworks4j"])?;
//! provisioner.into_loader().leak();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod paths;
pub mod platform;

pub use config::LoaderConfig;
pub use error::{Error, LoadErrorKind, Result};
pub use loader::{
    DynamicLoader, EmbeddedResources, ExtractOutcome, Provisioner, ResourceDir, ResourceSource,
    SystemLoader,
};
pub use platform::{HostInfo, Platform};

/// Crate version, used to namespace extraction folders
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
