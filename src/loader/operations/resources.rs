//! Bundled native library sources
//!
//! Resources are looked up by exact file name, e.g. `steam_api64.dll`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// Where bundled library bytes come from
pub trait ResourceSource {
    /// Open the resource with this exact file name, or `None` if it is not
    /// bundled.
    fn open(&self, name: &str) -> Option<Box<dyn Read + '_>>;
}

/// Reject anything that is not a plain file name
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && Path::new(name).file_name().is_some_and(|f| f == name)
}

/// Libraries compiled into the binary (usually via `include_bytes!`)
#[derive(Debug, Default, Clone)]
pub struct EmbeddedResources {
    files: HashMap<String, Cow<'static, [u8]>>,
}

impl EmbeddedResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource under its file name
    pub fn with(mut self, name: &str, bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&mut self, name: &str, bytes: impl Into<Cow<'static, [u8]>>) {
        self.files.insert(name.to_string(), bytes.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }
}

impl ResourceSource for EmbeddedResources {
    fn open(&self, name: &str) -> Option<Box<dyn Read + '_>> {
        self.files
            .get(name)
            .map(|bytes| Box::new(Cursor::new(bytes.as_ref())) as Box<dyn Read + '_>)
    }
}

/// Libraries shipped as loose files in a directory
#[derive(Debug, Clone)]
pub struct ResourceDir {
    root: PathBuf,
}

impl ResourceDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceSource for ResourceDir {
    fn open(&self, name: &str) -> Option<Box<dyn Read + '_>> {
        if !is_plain_file_name(name) {
            tracing::warn!(name, "refusing resource name with path components");
            return None;
        }

        let path = self.root.join(name);
        if !path.is_file() {
            return None;
        }
        match File::open(&path) {
            Ok(file) => Some(Box::new(file)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "bundled resource unreadable");
                None
            }
        }
    }
}
