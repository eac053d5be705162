mod dynamic;
mod extract;
mod locations;
mod probe;
mod resources;

pub use dynamic::{DynamicLoader, SystemLoader};
pub use extract::extract_library;
pub use locations::CandidateLocations;
pub use probe::can_write;
pub use resources::{EmbeddedResources, ResourceDir, ResourceSource};
