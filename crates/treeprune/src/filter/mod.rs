pub mod classifier;
pub mod layer;
pub mod matcher;

pub use classifier::{Classifier, Decision, Verdict};
pub use layer::{LayerSource, MatchSet, PatternLayer};
pub use matcher::{normalize_path, PathMatcher};
