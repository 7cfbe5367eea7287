pub mod commands;
pub mod compact;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod fs;
pub mod hash;
pub mod platform;
pub mod quarantine;
pub mod report;
pub mod restore;
pub mod rules;
pub mod runtime;
pub mod walk;

pub use commands::CommandList;
pub use compact::TreeCompactor;
pub use config::{FilePattern, PlatformSpec, PostPruneCommand, PruneConfig, ScopedCommand, Settings};
pub use engine::{EngineOptions, EngineState, PruneEngine, TRASH_DIRECTORY_VARIABLE};
pub use error::{PruneError, Result};
pub use filter::{Classifier, Decision, LayerSource, PathMatcher, PatternLayer, Verdict};
pub use fs::{FileSystem, RealFileSystem};
pub use platform::Platform;
pub use quarantine::QuarantineMover;
pub use report::{FileDecision, PruneReport};
pub use restore::{RestoreEngine, RestoreStats};
pub use rules::build_classifier;
pub use runtime::{runtime_shape, RuntimeShape};
pub use walk::{FileTreeEntry, TreeWalker};
