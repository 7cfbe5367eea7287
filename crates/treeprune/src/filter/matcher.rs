//! Glob matching against forward-slash relative paths.
//!
//! Patterns follow shell-glob rules: `*` and `?` never cross a `/`, `**`
//! spans any number of directory levels, `[...]` is a character class and a
//! backslash escapes the next character. A pattern has to match the whole
//! relative path. Matching is case-sensitive on every host.
//!
//! Wildcards never match a hidden name (one starting with `.`): `*` skips
//! `.npmignore` and `**` does not descend into `.github/`. Only a pattern
//! segment that itself starts with a literal `.` matches a hidden name.

use crate::error::{PruneError, Result};
use globset::{Glob, GlobBuilder, GlobMatcher};
use std::path::{Component, Path};

/// A single compiled glob pattern.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    pattern: String,
    matcher: GlobMatcher,
    segments: SegmentPattern,
}

impl PathMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = compile_glob(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
            segments: SegmentPattern::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Test a relative path, already normalized to `/` separators.
    pub fn matches(&self, path: &str) -> bool {
        if has_hidden_segment(path) {
            self.segments.matches(path)
        } else {
            self.matcher.is_match(path)
        }
    }
}

#[derive(Debug, Clone)]
enum Segment {
    /// `**`: zero or more non-hidden directory levels.
    AnyDepth,
    Name { matcher: GlobMatcher, literal_dot: bool },
}

/// A pattern split on `/`, matched one path segment at a time.
///
/// Only consulted for paths with a hidden segment; for every other path it
/// agrees with the whole-pattern glob.
#[derive(Debug, Clone)]
pub(crate) struct SegmentPattern {
    segments: Vec<Segment>,
}

impl SegmentPattern {
    pub(crate) fn new(pattern: &str) -> Result<Self> {
        let segments = pattern
            .split('/')
            .map(|part| {
                if part == "**" {
                    return Ok(Segment::AnyDepth);
                }
                let matcher = compile_glob(part)
                    .map_err(|e| match e {
                        PruneError::Pattern { message, .. } => PruneError::Pattern {
                            pattern: pattern.to_string(),
                            message,
                        },
                        other => other,
                    })?
                    .compile_matcher();
                Ok(Segment::Name {
                    matcher,
                    literal_dot: part.starts_with('.') || part.starts_with("\\."),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }

    pub(crate) fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').collect();
        match_segments(&self.segments, &parts)
    }
}

fn match_segments(segments: &[Segment], parts: &[&str]) -> bool {
    match segments.split_first() {
        None => parts.is_empty(),
        Some((Segment::AnyDepth, rest)) => {
            if match_segments(rest, parts) {
                return true;
            }
            match parts.split_first() {
                Some((part, tail)) if !is_hidden(part) => match_segments(segments, tail),
                _ => false,
            }
        }
        Some((Segment::Name { matcher, literal_dot }, rest)) => match parts.split_first() {
            Some((part, tail)) => {
                (*literal_dot || !is_hidden(part)) && matcher.is_match(part) && match_segments(rest, tail)
            }
            None => false,
        },
    }
}

fn is_hidden(segment: &str) -> bool {
    segment.starts_with('.')
}

pub(crate) fn has_hidden_segment(path: &str) -> bool {
    path.split('/').any(is_hidden)
}

pub(crate) fn compile_glob(pattern: &str) -> Result<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .case_insensitive(false)
        .build()
        .map_err(|e| PruneError::Pattern {
            pattern: pattern.to_string(),
            message: e.kind().to_string(),
        })
}

/// Render a relative path with `/` separators regardless of the host convention.
pub fn normalize_path(relative: &Path) -> String {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::ParentDir => parts.push("..".into()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.join("/")
}
