// src/fs/mock.rs

use super::FileSystem;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;

/// In-memory filesystem recording directory creation and mode changes.
///
/// `Clone` shares the underlying state, so tests can keep a handle and
/// inspect what the code under test did.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    dirs: Arc<Mutex<BTreeMap<PathBuf, Option<u32>>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directories created so far, in sorted order.
    pub fn created_dirs(&self) -> Vec<PathBuf> {
        let dirs = self.dirs.lock().unwrap();
        dirs.keys().cloned().collect()
    }

    /// The last mode applied to a directory, if any.
    pub fn mode_of(&self, path: impl AsRef<Path>) -> Option<u32> {
        let dirs = self.dirs.lock().unwrap();
        dirs.get(path.as_ref()).copied().flatten()
    }
}

impl FileSystem for MockFileSystem {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut dirs = self.dirs.lock().unwrap();
        // Like the real create_dir_all: repeat creation is not an error and
        // does not reset the recorded mode.
        dirs.entry(path.to_path_buf()).or_insert(None);
        Ok(())
    }

    fn set_mode(&self, path: &Path, mode: u32) -> Result<()> {
        let mut dirs = self.dirs.lock().unwrap();
        dirs.insert(path.to_path_buf(), Some(mode));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let dirs = self.dirs.lock().unwrap();
        dirs.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.exists(path)
    }
}
