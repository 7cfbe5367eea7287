//! File-system mutations used by quarantine, compaction and restore.
//!
//! Reads (walking, metadata) go straight to `std::fs`/`walkdir`; everything
//! that changes the tree goes through [`FileSystem`].

use std::fs;
use std::io;
use std::path::Path;

pub trait FileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;
    fn remove_file(&self, path: &Path) -> io::Result<()>;
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
    fn remove_symlink(&self, path: &Path) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        fs::copy(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn remove_symlink(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            // Directory symlinks on Windows have to be removed as directories.
            Err(err) if cfg!(windows) => fs::remove_dir(path).map_err(|_| err),
            Err(err) => Err(err),
        }
    }
}

/// Whether a failed rename crossed a file-system boundary.
pub fn is_cross_device(err: &io::Error) -> bool {
    #[cfg(unix)]
    {
        err.raw_os_error() == Some(libc::EXDEV)
    }
    #[cfg(windows)]
    {
        // ERROR_NOT_SAME_DEVICE
        err.raw_os_error() == Some(17)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = err;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_and_remove() {
        let temp_dir = tempfile::tempdir().unwrap();
        let fs_impl = RealFileSystem;
        let from = temp_dir.path().join("a.txt");
        let to = temp_dir.path().join("nested/dir/a.txt");
        fs::write(&from, b"content").unwrap();

        fs_impl.create_dir_all(to.parent().unwrap()).unwrap();
        fs_impl.rename(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"content");

        fs_impl.remove_file(&to).unwrap();
        fs_impl.remove_dir(to.parent().unwrap()).unwrap();
        assert!(!to.parent().unwrap().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_symlink_leaves_target() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("target.txt");
        let link = temp_dir.path().join("link.txt");
        fs::write(&target, b"x").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        RealFileSystem.remove_symlink(&link).unwrap();
        assert!(fs::symlink_metadata(&link).is_err());
        assert!(target.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_cross_device_detection() {
        let exdev = io::Error::from_raw_os_error(libc::EXDEV);
        assert!(is_cross_device(&exdev));
        let other = io::Error::from_raw_os_error(libc::ENOENT);
        assert!(!is_cross_device(&other));
    }
}
