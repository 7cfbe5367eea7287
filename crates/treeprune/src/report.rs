use crate::error::Result;
use crate::filter::Decision;
use crate::platform::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome for one file of a prune run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDecision {
    pub path: String,
    pub decision: Decision,
    /// Layer that kept the file, or the exclusion layer that vetoed it.
    pub layer: Option<String>,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PruneReport {
    pub platform: Platform,
    pub root: PathBuf,
    pub trash_root: PathBuf,
    pub dry_run: bool,
    pub skipped: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub decisions: Vec<FileDecision>,
    pub empty_dirs_removed: usize,
    pub symlinks_removed: usize,
    /// Post-prune command lines that ran to completion.
    #[serde(default)]
    pub commands_run: Vec<String>,
    /// Set when the run stopped early; `decisions` then ends at the failing entry.
    #[serde(default)]
    pub error: Option<String>,
}

impl PruneReport {
    pub fn new(platform: Platform, root: &Path, trash_root: &Path, dry_run: bool) -> Self {
        Self {
            platform,
            root: root.to_path_buf(),
            trash_root: trash_root.to_path_buf(),
            dry_run,
            skipped: false,
            started_at: Utc::now(),
            finished_at: None,
            decisions: Vec::new(),
            empty_dirs_removed: 0,
            symlinks_removed: 0,
            commands_run: Vec::new(),
            error: None,
        }
    }

    pub fn kept_count(&self) -> usize {
        self.decisions.iter().filter(|d| d.decision.is_keep()).count()
    }

    pub fn pruned_count(&self) -> usize {
        self.decisions.len() - self.kept_count()
    }

    pub fn pruned_bytes(&self) -> u64 {
        self.decisions
            .iter()
            .filter(|d| !d.decision.is_keep())
            .map(|d| d.size_bytes)
            .sum()
    }

    pub fn pruned_paths(&self) -> Vec<&str> {
        self.decisions
            .iter()
            .filter(|d| !d.decision.is_keep())
            .map(|d| d.path.as_str())
            .collect()
    }

    pub fn kept_paths(&self) -> Vec<&str> {
        self.decisions
            .iter()
            .filter(|d| d.decision.is_keep())
            .map(|d| d.path.as_str())
            .collect()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "removed {} empty directories and {} symlinks",
            self.empty_dirs_removed, self.symlinks_removed
        )
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Audit log: one `kept`/`pruned` line per file, then the compaction
    /// summary and any post-prune commands, or the error that stopped the run.
    pub fn log_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .decisions
            .iter()
            .map(|d| format!("{} {}", d.decision.as_str(), d.path))
            .collect();
        match &self.error {
            Some(error) => lines.push(format!("failed: {}", error)),
            None => {
                lines.push(self.summary_line());
                lines.extend(self.commands_run.iter().map(|c| format!("ran {}", c)));
            }
        }
        lines
    }

    pub fn write_log<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut content = self.log_lines().join("\n");
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
