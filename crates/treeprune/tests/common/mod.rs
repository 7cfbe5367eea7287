#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use treeprune_lib::{FilePattern, FileSystem, PlatformSpec, PruneConfig, RealFileSystem};

/// A source tree plus a sibling trash directory inside one temp dir.
pub struct TreeFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub trash: PathBuf,
}

impl TreeFixture {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("app");
        let trash = temp_dir.path().join("trash");
        fs::create_dir_all(&root).unwrap();
        Self {
            temp_dir,
            root,
            trash,
        }
    }

    pub fn with_files(files: &[&str]) -> Self {
        let fixture = Self::new();
        for file in files {
            fixture.write(file);
        }
        fixture
    }

    /// Write a file whose content is its own relative path.
    pub fn write(&self, relative: &str) -> PathBuf {
        let path = self.root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, relative.as_bytes()).unwrap();
        path
    }

    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.root.join(relative)).unwrap();
    }

    pub fn exists(&self, relative: &str) -> bool {
        fs::symlink_metadata(self.root.join(relative)).is_ok()
    }

    pub fn in_trash(&self, relative: &str) -> bool {
        fs::symlink_metadata(self.trash.join(relative)).is_ok()
    }

    /// Every file under `dir`, relative and `/`-separated, sorted.
    pub fn list(dir: &Path) -> Vec<String> {
        let mut files: Vec<String> = walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| !e.file_type().is_dir())
            .map(|e| {
                e.path()
                    .strip_prefix(dir)
                    .unwrap()
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().to_string())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect();
        files.sort();
        files
    }
}

pub fn rule(keep: &[&str], delete: &[&str]) -> FilePattern {
    FilePattern {
        keep: keep.iter().map(|s| s.to_string()).collect(),
        delete: delete.iter().map(|s| s.to_string()).collect(),
        platform: None,
    }
}

pub fn rule_for(keep: &[&str], platform: &str) -> FilePattern {
    FilePattern {
        platform: Some(PlatformSpec::One(platform.to_string())),
        ..rule(keep, &[])
    }
}

pub fn config(patterns: Vec<FilePattern>) -> PruneConfig {
    PruneConfig {
        skip: false,
        patterns: Some(patterns),
        post_prune: None,
    }
}

/// Records every mutation and forwards it to the real file system.
#[derive(Default)]
pub struct SpyFileSystem {
    pub calls: RefCell<Vec<String>>,
}

impl SpyFileSystem {
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, op: &str, path: &Path) {
        self.calls.borrow_mut().push(format!("{} {}", op, path.display()));
    }
}

impl FileSystem for SpyFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.record("create_dir_all", path);
        RealFileSystem.create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.record("rename", from);
        RealFileSystem.rename(from, to)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        self.record("copy", from);
        RealFileSystem.copy(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.record("remove_file", path);
        RealFileSystem.remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        self.record("remove_dir", path);
        RealFileSystem.remove_dir(path)
    }

    fn remove_symlink(&self, path: &Path) -> io::Result<()> {
        self.record("remove_symlink", path);
        RealFileSystem.remove_symlink(path)
    }
}

/// Fails the `nth` rename (zero-based) with a permission error.
pub struct FailingRename {
    pub nth: usize,
    pub seen: Cell<usize>,
}

impl FailingRename {
    pub fn new(nth: usize) -> Self {
        Self {
            nth,
            seen: Cell::new(0),
        }
    }
}

impl FileSystem for FailingRename {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        RealFileSystem.create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let seen = self.seen.get();
        self.seen.set(seen + 1);
        if seen == self.nth {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only file"));
        }
        RealFileSystem.rename(from, to)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        RealFileSystem.copy(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        RealFileSystem.remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        RealFileSystem.remove_dir(path)
    }

    fn remove_symlink(&self, path: &Path) -> io::Result<()> {
        RealFileSystem.remove_symlink(path)
    }
}
