//! Post-prune cleanup: empty directories and (for Windows targets) symlinks.

use crate::error::{PruneError, Result};
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct TreeCompactor<'a, F: FileSystem> {
    fs: &'a F,
    exclude: Option<PathBuf>,
}

impl<'a, F: FileSystem> TreeCompactor<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs, exclude: None }
    }

    /// Leave a subtree untouched (typically a nested trash root).
    pub fn exclude<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.exclude = Some(path.as_ref().to_path_buf());
        self
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.as_deref() == Some(path)
    }

    /// Remove every directory under `root` that holds nothing once its own
    /// empty subdirectories are gone. `root` itself is kept.
    pub fn remove_empty_dirs(&self, root: &Path) -> Result<usize> {
        let mut removed = 0;
        self.collapse(root, true, &mut removed)?;
        Ok(removed)
    }

    fn collapse(&self, dir: &Path, is_root: bool, removed: &mut usize) -> Result<bool> {
        let mut children = std::fs::read_dir(dir)
            .and_then(|entries| entries.collect::<std::io::Result<Vec<_>>>())
            .map_err(|e| PruneError::Enumeration {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?;
        children.sort_by_key(|entry| entry.file_name());

        let mut empty = true;
        for child in children {
            let path = child.path();
            let file_type = child.file_type()?;
            if file_type.is_dir() && !self.is_excluded(&path) {
                if !self.collapse(&path, false, removed)? {
                    empty = false;
                }
            } else {
                empty = false;
            }
        }

        if empty && !is_root {
            self.fs.remove_dir(dir).map_err(|source| PruneError::Compaction {
                path: dir.to_path_buf(),
                source,
            })?;
            log::debug!("Removed empty directory {}", dir.display());
            *removed += 1;
        }

        Ok(empty)
    }

    /// Remove every symlink under `root`. Links are never followed.
    pub fn remove_symlinks(&self, root: &Path) -> Result<usize> {
        let mut links = Vec::new();
        let mut walker = WalkDir::new(root).follow_links(false).into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry.map_err(|e| PruneError::Enumeration {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
                message: e.to_string(),
            })?;
            if entry.file_type().is_dir() && self.is_excluded(entry.path()) {
                walker.skip_current_dir();
                continue;
            }
            if entry.path_is_symlink() {
                links.push(entry.into_path());
            }
        }

        for link in &links {
            self.fs.remove_symlink(link).map_err(|source| PruneError::Compaction {
                path: link.clone(),
                source,
            })?;
            log::debug!("Removed symlink {}", link.display());
        }

        Ok(links.len())
    }
}
