//! Prune run orchestration.
//!
//! `NotStarted -> Validated -> Walking -> Completed | Failed`. Validation
//! builds the classifier and the post-prune command list and touches
//! nothing on disk. Once a run has failed the engine refuses further work;
//! the trash root is left as it is so the moved files can be inspected or
//! put back, and the decisions made so far stay available through
//! [`PruneEngine::partial_report`].

use crate::commands::CommandList;
use crate::compact::TreeCompactor;
use crate::config::PruneConfig;
use crate::error::{PruneError, Result};
use crate::filter::Classifier;
use crate::fs::FileSystem;
use crate::platform::Platform;
use crate::quarantine::QuarantineMover;
use crate::report::{FileDecision, PruneReport};
use crate::rules::build_classifier;
use crate::walk::TreeWalker;
use chrono::Utc;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub const TRASH_DIRECTORY_VARIABLE: &str = "pruneStep_trashDirectory";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    NotStarted,
    Validated,
    Walking,
    Completed,
    Failed,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::NotStarted => "not_started",
            EngineState::Validated => "validated",
            EngineState::Walking => "walking",
            EngineState::Completed => "completed",
            EngineState::Failed => "failed",
        }
    }

    fn can_transition_to(&self, to: EngineState) -> bool {
        use EngineState::*;
        matches!(
            (self, to),
            (NotStarted, Validated)
                | (NotStarted, Failed)
                | (NotStarted, Completed)
                | (Validated, Walking)
                | (Validated, Completed)
                | (Walking, Completed)
                | (Walking, Failed)
        )
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Classify and log without moving or removing anything.
    pub dry_run: bool,
}

pub struct PruneEngine<'a, F: FileSystem> {
    fs: &'a F,
    config: PruneConfig,
    platform: Platform,
    trash_root: PathBuf,
    options: EngineOptions,
    state: EngineState,
    classifier: Option<Classifier>,
    commands: Option<CommandList>,
    partial_report: Option<PruneReport>,
}

impl<'a, F: FileSystem> PruneEngine<'a, F> {
    pub fn new<P: AsRef<Path>>(
        fs: &'a F,
        config: PruneConfig,
        platform: Platform,
        trash_root: P,
        options: EngineOptions,
    ) -> Self {
        Self {
            fs,
            config,
            platform,
            trash_root: trash_root.as_ref().to_path_buf(),
            options,
            state: EngineState::NotStarted,
            classifier: None,
            commands: None,
            partial_report: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn trash_root(&self) -> &Path {
        &self.trash_root
    }

    pub fn classifier(&self) -> Option<&Classifier> {
        self.classifier.as_ref()
    }

    /// Post-prune command lines active for this platform, once validated.
    pub fn commands(&self) -> Option<&CommandList> {
        self.commands.as_ref()
    }

    /// What a failed run decided before it stopped, including the entry it
    /// failed on.
    pub fn partial_report(&self) -> Option<&PruneReport> {
        self.partial_report.as_ref()
    }

    /// Variables handed to later packaging steps.
    pub fn variables(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        vars.insert(
            TRASH_DIRECTORY_VARIABLE.to_string(),
            self.trash_root.to_string_lossy().to_string(),
        );
        vars
    }

    fn transition(&mut self, to: EngineState) -> Result<()> {
        if !self.state.can_transition_to(to) {
            return Err(PruneError::InvalidStateTransition {
                from: self.state.to_string(),
                to: to.to_string(),
            });
        }
        self.state = to;
        Ok(())
    }

    /// Check the configuration, build the classifier and the post-prune
    /// command list. No file I/O.
    pub fn validate(&mut self) -> Result<()> {
        if self.state == EngineState::Validated {
            return Ok(());
        }
        if self.state != EngineState::NotStarted {
            return Err(PruneError::InvalidStateTransition {
                from: self.state.to_string(),
                to: EngineState::Validated.to_string(),
            });
        }

        let post_prune = self.config.post_prune.as_deref().unwrap_or(&[]);
        let built = build_classifier(&self.config, self.platform)
            .and_then(|classifier| Ok((classifier, CommandList::new(post_prune, self.platform)?)));

        match built {
            Ok((classifier, commands)) => {
                log::info!(
                    "Using directory '{}' to hold pruned files",
                    self.trash_root.display()
                );
                self.classifier = Some(classifier);
                self.commands = Some(commands);
                self.transition(EngineState::Validated)
            }
            Err(e) => {
                log::error!("{}", e);
                self.state = EngineState::Failed;
                Err(e)
            }
        }
    }

    pub fn run(&mut self, root: &Path) -> Result<PruneReport> {
        self.run_with(root, |_| {})
    }

    /// Prune `root`, calling `on_decision` after each file has been handled.
    pub fn run_with<C>(&mut self, root: &Path, mut on_decision: C) -> Result<PruneReport>
    where
        C: FnMut(&FileDecision),
    {
        let mut report = PruneReport::new(self.platform, root, &self.trash_root, self.options.dry_run);

        if self.config.skip {
            log::info!("Prune step (skipping)");
            self.transition(EngineState::Completed)?;
            report.skipped = true;
            report.finished_at = Some(Utc::now());
            return Ok(report);
        }

        self.validate()?;
        self.transition(EngineState::Walking)?;

        match self.walk_and_compact(root, &mut report, &mut on_decision) {
            Ok(()) => {
                self.transition(EngineState::Completed)?;
                report.finished_at = Some(Utc::now());
                log::info!(
                    "Kept {} files, pruned {} files; {}",
                    report.kept_count(),
                    report.pruned_count(),
                    report.summary_line()
                );
                Ok(report)
            }
            Err(e) => {
                log::error!("Prune failed: {}", e);
                self.transition(EngineState::Failed)?;
                report.error = Some(e.to_string());
                report.finished_at = Some(Utc::now());
                self.partial_report = Some(report);
                Err(e)
            }
        }
    }

    fn walk_and_compact<C>(&self, root: &Path, report: &mut PruneReport, on_decision: &mut C) -> Result<()>
    where
        C: FnMut(&FileDecision),
    {
        let classifier = self.classifier.as_ref().ok_or_else(|| PruneError::InvalidStateTransition {
            from: EngineState::NotStarted.to_string(),
            to: EngineState::Walking.to_string(),
        })?;

        let root_abs = absolute(root)?;
        let trash_abs = absolute(&self.trash_root)?;
        let nested_trash = trash_abs.starts_with(&root_abs).then(|| {
            trash_abs
                .strip_prefix(&root_abs)
                .map(|rel| root.join(rel))
                .unwrap_or_else(|_| trash_abs.clone())
        });

        let mut walker = TreeWalker::new(root);
        if let Some(trash) = &nested_trash {
            walker = walker.exclude(trash);
        }

        log::info!("Pruning files");
        let mover = QuarantineMover::new(self.fs, &self.trash_root);

        for entry in walker.walk()? {
            let entry = entry?;
            let verdict = classifier.evaluate(&entry.normalized);

            let size_bytes = std::fs::symlink_metadata(&entry.path)
                .map(|m| m.len())
                .unwrap_or(0);

            if verdict.decision.is_keep() {
                log::info!("Keeping '{}'", entry.normalized);
            } else {
                log::info!("Pruning '{}'", entry.normalized);
            }

            let decision = FileDecision {
                path: entry.normalized.clone(),
                decision: verdict.decision,
                layer: verdict.layer.map(|l| l.to_string()),
                size_bytes,
            };

            on_decision(&decision);
            report.decisions.push(decision);

            if !self.options.dry_run {
                if let Err(e) = mover.apply(&entry, verdict.decision) {
                    log::error!("Failed to prune '{}': {}", entry.normalized, e);
                    return Err(e);
                }
            }
        }

        if self.options.dry_run {
            return Ok(());
        }

        let mut compactor = TreeCompactor::new(self.fs);
        if let Some(trash) = &nested_trash {
            compactor = compactor.exclude(trash);
        }

        if self.platform == Platform::Windows {
            log::info!("Pruning symlinks");
            report.symlinks_removed = compactor.remove_symlinks(root)?;
        }

        log::info!("Pruning empty directories");
        report.empty_dirs_removed = compactor.remove_empty_dirs(root)?;

        if let Some(commands) = self.commands.as_ref().filter(|c| !c.is_empty()) {
            commands.execute(root, &self.variables())?;
            report.commands_run = commands.commands().to_vec();
        }

        Ok(())
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
