use crate::error::{PruneError, Result};
use crate::filter::matcher::{compile_glob, has_hidden_segment, SegmentPattern};
use crate::platform::Platform;
use globset::{GlobSet, GlobSetBuilder};
use std::fmt;

/// Where a layer's patterns were declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerSource {
    /// Entry of the configured `patterns` list, zero-based.
    Pattern(usize),
    /// Built-in native runtime shape for a platform.
    RuntimeShape(Platform),
}

impl fmt::Display for LayerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerSource::Pattern(index) => write!(f, "pattern #{}", index + 1),
            LayerSource::RuntimeShape(platform) => write!(f, "runtime shape ({})", platform),
        }
    }
}

/// An ordered list of globs tested as one set.
#[derive(Debug, Clone)]
pub struct MatchSet {
    patterns: Vec<String>,
    segments: Vec<SegmentPattern>,
    set: GlobSet,
}

impl MatchSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut segments = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let pattern = pattern.as_ref();
            builder.add(compile_glob(pattern)?);
            segments.push(SegmentPattern::new(pattern)?);
        }
        let patterns: Vec<String> = patterns.iter().map(|p| p.as_ref().to_string()).collect();
        let set = builder.build().map_err(|e| PruneError::Pattern {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })?;
        Ok(Self {
            patterns,
            segments,
            set,
        })
    }

    pub fn is_match(&self, path: &str) -> bool {
        if !has_hidden_segment(path) {
            return self.set.is_match(path);
        }
        // The glob set over-matches hidden names; confirm each candidate.
        self.set
            .matches(path)
            .into_iter()
            .any(|index| self.segments[index].matches(path))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }
}

/// One self-contained accept/reject rule group.
#[derive(Debug, Clone)]
pub struct PatternLayer {
    source: LayerSource,
    accept: MatchSet,
    reject: MatchSet,
}

impl PatternLayer {
    pub fn new<S: AsRef<str>>(source: LayerSource, accept: &[S], reject: &[S]) -> Result<Self> {
        Ok(Self {
            source,
            accept: MatchSet::new(accept)?,
            reject: MatchSet::new(reject)?,
        })
    }

    pub fn source(&self) -> LayerSource {
        self.source
    }

    pub fn accept(&self) -> &MatchSet {
        &self.accept
    }

    pub fn reject(&self) -> &MatchSet {
        &self.reject
    }

    /// True when the path matches an accept pattern and no reject pattern of this layer.
    pub fn accepts(&self, path: &str) -> bool {
        self.accept.is_match(path) && !self.reject.is_match(path)
    }

    pub fn rejects(&self, path: &str) -> bool {
        self.reject.is_match(path)
    }

    /// A layer with rejects but nothing to accept acts as a tree-wide exclusion.
    pub fn is_exclusion(&self) -> bool {
        self.accept.is_empty() && !self.reject.is_empty()
    }
}
