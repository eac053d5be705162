mod provision;

pub use provision::{discover_extract_location, Provisioner};
