use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::loader::CandidateLocations;
use crate::paths;

/// Name of the placeholder file each candidate location points at.
/// Only its parent directory matters; libraries are extracted next to it.
pub const DEFAULT_FILE_NAME: &str = "out";

/// Version-tagged folder used to namespace extraction directories, so two
/// builds never load each other's natives.
pub fn default_folder_tag() -> String {
    format!("steamworks4j_{}", crate::VERSION)
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

/// Provisioner configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LoaderConfig {
    #[serde(default = "default_folder_tag")]
    pub folder_tag: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Where bundled natives are read from (None = next to the executable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_dir: Option<PathBuf>,
    /// Overrides the system temp directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,
    /// Overrides the user's home directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_dir: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            folder_tag: default_folder_tag(),
            file_name: default_file_name(),
            resource_dir: None,
            temp_dir: None,
            home_dir: None,
        }
    }
}

impl LoaderConfig {
    /// Fresh candidate sequence for this configuration.
    ///
    /// Each call starts a new scan; the returned iterator itself cannot be
    /// rewound.
    pub fn candidate_locations(&self) -> CandidateLocations {
        let temp_dir = self.temp_dir.clone().unwrap_or_else(paths::temp_dir);
        let home_dir = self.home_dir.clone().or_else(paths::home_dir);
        CandidateLocations::new(&self.folder_tag, &self.file_name, temp_dir, home_dir)
    }

    /// Resolved resource directory
    pub fn resource_dir(&self) -> std::io::Result<PathBuf> {
        match &self.resource_dir {
            Some(dir) => Ok(dir.clone()),
            None => paths::resource_dir(),
        }
    }
}
