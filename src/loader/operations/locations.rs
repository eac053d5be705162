//! Candidate extraction locations
//!
//! Yields the places extraction may succeed, most preferred first.

use std::iter::FusedIterator;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    TempFolder,
    UniqueTemp,
    Home,
    LocalTmp,
    WorkingDir,
    Done,
}

/// Lazy, finite sequence of candidate locations.
///
/// Order:
/// 1. `<temp>/<folder>/<file>`
/// 2. `<unique temp file>/<file>` (the unique name is reserved and released
///    only when the iterator reaches this step)
/// 3. `<home>/.<folder>/<file>` (skipped without a home directory)
/// 4. `.tmp/<folder>/<file>`
/// 5. `<file>`
///
/// Once consumed it stays exhausted; build a new one to scan again.
#[derive(Debug)]
pub struct CandidateLocations {
    folder_tag: String,
    file_name: String,
    temp_dir: PathBuf,
    home_dir: Option<PathBuf>,
    stage: Stage,
}

impl CandidateLocations {
    pub fn new(
        folder_tag: &str,
        file_name: &str,
        temp_dir: PathBuf,
        home_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            folder_tag: folder_tag.to_string(),
            file_name: file_name.to_string(),
            temp_dir,
            home_dir,
            stage: Stage::TempFolder,
        }
    }

    /// Reserve a unique file name in the temp dir, then delete the file so
    /// the name can be reused as a directory.
    fn unique_temp_location(&self) -> Option<PathBuf> {
        let file = match tempfile::Builder::new()
            .prefix(&self.folder_tag)
            .suffix(".tmp")
            .tempfile_in(&self.temp_dir)
        {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(dir = %self.temp_dir.display(), error = %e, "could not create unique temp file");
                return None;
            }
        };

        let path = file.path().to_path_buf();
        match file.close() {
            Ok(()) => Some(path.join(&self.file_name)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "could not release unique temp file");
                None
            }
        }
    }
}

impl Iterator for CandidateLocations {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let (candidate, next_stage) = match self.stage {
                Stage::TempFolder => (
                    Some(self.temp_dir.join(&self.folder_tag).join(&self.file_name)),
                    Stage::UniqueTemp,
                ),
                Stage::UniqueTemp => (self.unique_temp_location(), Stage::Home),
                Stage::Home => (
                    self.home_dir.as_ref().map(|home| {
                        home.join(format!(".{}", self.folder_tag))
                            .join(&self.file_name)
                    }),
                    Stage::LocalTmp,
                ),
                Stage::LocalTmp => (
                    Some(
                        PathBuf::from(".tmp")
                            .join(&self.folder_tag)
                            .join(&self.file_name),
                    ),
                    Stage::WorkingDir,
                ),
                Stage::WorkingDir => (Some(PathBuf::from(&self.file_name)), Stage::Done),
                Stage::Done => return None,
            };

            self.stage = next_stage;
            if candidate.is_some() {
                return candidate;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.stage {
            Stage::TempFolder => 5,
            Stage::UniqueTemp => 4,
            Stage::Home => 3,
            Stage::LocalTmp => 2,
            Stage::WorkingDir => 1,
            Stage::Done => 0,
        };
        (remaining.min(1), Some(remaining))
    }
}

impl FusedIterator for CandidateLocations {}
