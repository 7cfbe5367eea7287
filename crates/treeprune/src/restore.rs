//! Moving quarantined files back into the tree they were pruned from.

use crate::compact::TreeCompactor;
use crate::error::{PruneError, Result};
use crate::fs::FileSystem;
use crate::quarantine::move_entry;
use crate::walk::TreeWalker;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreStats {
    pub files_restored: usize,
    pub dirs_removed: usize,
}

pub struct RestoreEngine<'a, F: FileSystem> {
    fs: &'a F,
    trash_root: PathBuf,
}

impl<'a, F: FileSystem> RestoreEngine<'a, F> {
    pub fn new<P: AsRef<Path>>(fs: &'a F, trash_root: P) -> Self {
        Self {
            fs,
            trash_root: trash_root.as_ref().to_path_buf(),
        }
    }

    /// Put every file under the trash root back at `root/<relative path>`.
    ///
    /// Stops at the first file whose original location is occupied; files
    /// already restored stay restored.
    pub fn restore(&self, root: &Path) -> Result<RestoreStats> {
        log::info!(
            "Restoring files from '{}' into '{}'",
            self.trash_root.display(),
            root.display()
        );

        let mut stats = RestoreStats::default();

        for entry in TreeWalker::new(&self.trash_root).walk()? {
            let entry = entry?;
            let dest = root.join(&entry.relative);

            if let Err(e) = move_entry(self.fs, &entry.path, &dest, entry.is_symlink) {
                log::error!("Failed to restore '{}': {}", entry.normalized, e);
                return Err(e);
            }
            log::info!("Restored '{}'", entry.normalized);
            stats.files_restored += 1;
        }

        stats.dirs_removed = TreeCompactor::new(self.fs).remove_empty_dirs(&self.trash_root)?;

        self.fs
            .remove_dir(&self.trash_root)
            .map_err(|source| PruneError::Compaction {
                path: self.trash_root.clone(),
                source,
            })?;

        log::info!(
            "Restored {} files; removed {} trash directories",
            stats.files_restored,
            stats.dirs_removed + 1
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::RealFileSystem;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_restore_moves_files_back() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("app");
        let trash = temp_dir.path().join("trash");
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(trash.join("src/deep")).unwrap();
        fs::write(trash.join("src/deep/a.test.js"), b"test").unwrap();
        fs::write(trash.join("notes.txt"), b"notes").unwrap();

        let stats = RestoreEngine::new(&RealFileSystem, &trash).restore(&root).unwrap();

        assert_eq!(stats.files_restored, 2);
        assert_eq!(stats.dirs_removed, 2);
        assert_eq!(fs::read(root.join("src/deep/a.test.js")).unwrap(), b"test");
        assert_eq!(fs::read(root.join("notes.txt")).unwrap(), b"notes");
        assert!(!trash.exists());
    }

    #[test]
    fn test_restore_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("app");
        let trash = temp_dir.path().join("trash");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&trash).unwrap();
        fs::write(root.join("a.txt"), b"current").unwrap();
        fs::write(trash.join("a.txt"), b"quarantined").unwrap();

        let result = RestoreEngine::new(&RealFileSystem, &trash).restore(&root);

        assert!(matches!(result, Err(PruneError::Conflict(_))));
        assert_eq!(fs::read(root.join("a.txt")).unwrap(), b"current");
        assert_eq!(fs::read(trash.join("a.txt")).unwrap(), b"quarantined");
    }

    #[test]
    fn test_restore_missing_trash_root() {
        let temp_dir = TempDir::new().unwrap();
        let result = RestoreEngine::new(&RealFileSystem, temp_dir.path().join("nope"))
            .restore(temp_dir.path());
        assert!(matches!(result, Err(PruneError::Enumeration { .. })));
    }
}
