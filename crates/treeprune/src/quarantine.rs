//! Soft deletion: discarded files move to the same relative path under a trash root.

use crate::error::{PruneError, Result};
use crate::filter::Decision;
use crate::fs::{is_cross_device, FileSystem};
use crate::hash;
use crate::walk::FileTreeEntry;
use std::path::{Path, PathBuf};

pub struct QuarantineMover<'a, F: FileSystem> {
    fs: &'a F,
    trash_root: PathBuf,
}

impl<'a, F: FileSystem> QuarantineMover<'a, F> {
    pub fn new<P: AsRef<Path>>(fs: &'a F, trash_root: P) -> Self {
        Self {
            fs,
            trash_root: trash_root.as_ref().to_path_buf(),
        }
    }

    pub fn trash_root(&self) -> &Path {
        &self.trash_root
    }

    /// Where a discarded entry ends up.
    pub fn destination(&self, entry: &FileTreeEntry) -> PathBuf {
        self.trash_root.join(&entry.relative)
    }

    /// Leave a kept entry alone; move a discarded one into the trash root.
    /// Returns the new location of a moved entry.
    pub fn apply(&self, entry: &FileTreeEntry, decision: Decision) -> Result<Option<PathBuf>> {
        if decision.is_keep() {
            return Ok(None);
        }

        let dest = self.destination(entry);
        move_entry(self.fs, &entry.path, &dest, entry.is_symlink)?;
        log::debug!("Moved {} -> {}", entry.path.display(), dest.display());
        Ok(Some(dest))
    }
}

/// Move `from` to `to`, creating parents. Never overwrites an existing `to`.
pub(crate) fn move_entry<F: FileSystem>(fs: &F, from: &Path, to: &Path, is_symlink: bool) -> Result<()> {
    if std::fs::symlink_metadata(to).is_ok() {
        return Err(PruneError::Conflict(to.to_path_buf()));
    }

    if let Some(parent) = to.parent() {
        fs.create_dir_all(parent).map_err(|source| PruneError::Quarantine {
            path: from.to_path_buf(),
            source,
        })?;
    }

    match fs.rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if is_cross_device(&err) && !is_symlink => copy_across_devices(fs, from, to),
        Err(source) => Err(PruneError::Quarantine {
            path: from.to_path_buf(),
            source,
        }),
    }
}

fn copy_across_devices<F: FileSystem>(fs: &F, from: &Path, to: &Path) -> Result<()> {
    log::debug!("Copying {} across devices", from.display());

    let expected = hash::compute_blake3_hash(from)?;
    fs.copy(from, to).map_err(|source| PruneError::Quarantine {
        path: from.to_path_buf(),
        source,
    })?;

    if let Err(e) = hash::verify_destination(to, &expected) {
        if let Err(remove_err) = fs.remove_file(to) {
            log::warn!(
                "Could not remove unverified copy {}: {}",
                to.display(),
                remove_err
            );
        }
        return Err(e);
    }

    fs.remove_file(from).map_err(|source| PruneError::Quarantine {
        path: from.to_path_buf(),
        source,
    })
}
