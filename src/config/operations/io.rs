use crate::config::types::LoaderConfig;
use crate::error::Result;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load the provisioner config from a JSON file.
///
/// A missing or unreadable file yields the default configuration.
pub fn load_cfg(path: &Path) -> LoaderConfig {
    match File::open(path) {
        Ok(file) => match serde_json::from_reader::<_, LoaderConfig>(BufReader::new(file)) {
            Ok(config) => return config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid loader config, using defaults");
            }
        },
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no loader config, using defaults");
        }
    }

    LoaderConfig::default()
}

pub fn save_cfg(path: &Path, config: &LoaderConfig) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}
