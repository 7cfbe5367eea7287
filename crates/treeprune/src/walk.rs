//! Lazy enumeration of the non-directory entries of a tree.
//!
//! Symlinks are reported as entries and never followed. Entries come out in
//! file-name order within each directory, so a walk over an unchanged tree
//! is repeatable.

use crate::error::{PruneError, Result};
use crate::filter::normalize_path;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file (or symlink) found under the walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTreeEntry {
    /// Path on disk.
    pub path: PathBuf,
    /// Path relative to the walk root, in host form.
    pub relative: PathBuf,
    /// `relative` with `/` separators, used for matching and logging.
    pub normalized: String,
    pub is_symlink: bool,
}

#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    exclude: Option<PathBuf>,
}

impl TreeWalker {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            exclude: None,
        }
    }

    /// Skip a subtree (typically a trash root nested inside the walk root).
    pub fn exclude<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.exclude = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a fresh traversal. Each call walks the tree from the beginning.
    pub fn walk(&self) -> Result<FileTreeIter> {
        let metadata = std::fs::metadata(&self.root).map_err(|e| PruneError::Enumeration {
            path: self.root.clone(),
            message: e.to_string(),
        })?;
        if !metadata.is_dir() {
            return Err(PruneError::Enumeration {
                path: self.root.clone(),
                message: "not a directory".to_string(),
            });
        }

        let inner = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Ok(FileTreeIter {
            root: self.root.clone(),
            exclude: self.exclude.clone(),
            inner,
        })
    }
}

pub struct FileTreeIter {
    root: PathBuf,
    exclude: Option<PathBuf>,
    inner: walkdir::IntoIter,
}

impl Iterator for FileTreeIter {
    type Item = Result<FileTreeEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                    return Some(Err(PruneError::Enumeration {
                        path,
                        message: e.to_string(),
                    }));
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                if self.exclude.as_deref() == Some(entry.path()) {
                    self.inner.skip_current_dir();
                }
                continue;
            }

            let relative = match entry.path().strip_prefix(&self.root) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => continue,
            };

            return Some(Ok(FileTreeEntry {
                normalized: normalize_path(&relative),
                path: entry.path().to_path_buf(),
                relative,
                is_symlink: file_type.is_symlink(),
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(walker: &TreeWalker) -> Vec<String> {
        walker
            .walk()
            .unwrap()
            .map(|entry| entry.unwrap().normalized)
            .collect()
    }

    #[test]
    fn test_walk_lists_files_only() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("src/nested")).unwrap();
        fs::create_dir_all(temp_dir.path().join("empty")).unwrap();
        fs::write(temp_dir.path().join("README.md"), b"readme").unwrap();
        fs::write(temp_dir.path().join("src/code.js"), b"code").unwrap();
        fs::write(temp_dir.path().join("src/nested/deep.js"), b"deep").unwrap();

        let walker = TreeWalker::new(temp_dir.path());
        assert_eq!(
            names(&walker),
            vec!["README.md", "src/code.js", "src/nested/deep.js"]
        );
    }

    #[test]
    fn test_walk_is_restartable() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a"), b"a").unwrap();
        fs::write(temp_dir.path().join("b"), b"b").unwrap();

        let walker = TreeWalker::new(temp_dir.path());
        assert_eq!(names(&walker), names(&walker));
    }

    #[test]
    fn test_walk_skips_excluded_subtree() {
        let temp_dir = TempDir::new().unwrap();
        let trash = temp_dir.path().join("trash");
        fs::create_dir_all(&trash).unwrap();
        fs::write(trash.join("old.txt"), b"old").unwrap();
        fs::write(temp_dir.path().join("keep.txt"), b"keep").unwrap();

        let walker = TreeWalker::new(temp_dir.path()).exclude(&trash);
        assert_eq!(names(&walker), vec!["keep.txt"]);
    }

    #[test]
    fn test_walk_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let walker = TreeWalker::new(temp_dir.path().join("missing"));
        assert!(matches!(walker.walk(), Err(PruneError::Enumeration { .. })));
    }

    #[test]
    fn test_walk_root_is_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(TreeWalker::new(&file).walk(), Err(PruneError::Enumeration { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_reports_symlinks_without_following() {
        let temp_dir = TempDir::new().unwrap();
        let lib = temp_dir.path().join("lib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("libfoo.so.1"), b"elf").unwrap();
        std::os::unix::fs::symlink("libfoo.so.1", lib.join("libfoo.so")).unwrap();
        std::os::unix::fs::symlink(&lib, temp_dir.path().join("lib-link")).unwrap();

        let entries: Vec<_> = TreeWalker::new(temp_dir.path())
            .walk()
            .unwrap()
            .map(|e| e.unwrap())
            .collect();
        let listed: Vec<_> = entries.iter().map(|e| e.normalized.as_str()).collect();
        assert_eq!(listed, vec!["lib/libfoo.so", "lib/libfoo.so.1", "lib-link"]);
        assert!(entries[0].is_symlink);
        assert!(!entries[1].is_symlink);
        assert!(entries[2].is_symlink);
    }
}
