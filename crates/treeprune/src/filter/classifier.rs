//! Keep/discard decisions over an ordered stack of pattern layers.
//!
//! A path is kept when at least one layer accepts it on its own terms (an
//! accept pattern matches and none of that layer's reject patterns do).
//! Layers do not see each other's reject lists, with one exception: a layer
//! that declares only reject patterns is an exclusion layer and vetoes the
//! paths it matches across the whole stack. Anything no layer accepts is
//! discarded.

use crate::filter::layer::{LayerSource, PatternLayer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Keep,
    Discard,
}

impl Decision {
    /// Tag used in the audit log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Keep => "kept",
            Decision::Discard => "pruned",
        }
    }

    pub fn is_keep(&self) -> bool {
        *self == Decision::Keep
    }
}

/// A decision plus the layer responsible for it, when there is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub decision: Decision,
    pub layer: Option<LayerSource>,
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    layers: Vec<PatternLayer>,
}

impl Classifier {
    pub fn new(layers: Vec<PatternLayer>) -> Self {
        Self { layers }
    }

    pub fn push(&mut self, layer: PatternLayer) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[PatternLayer] {
        &self.layers
    }

    pub fn classify(&self, path: &str) -> Decision {
        self.evaluate(path).decision
    }

    pub fn evaluate(&self, path: &str) -> Verdict {
        if let Some(layer) = self
            .layers
            .iter()
            .find(|layer| layer.is_exclusion() && layer.rejects(path))
        {
            return Verdict {
                decision: Decision::Discard,
                layer: Some(layer.source()),
            };
        }

        match self.layers.iter().find(|layer| layer.accepts(path)) {
            Some(layer) => Verdict {
                decision: Decision::Keep,
                layer: Some(layer.source()),
            },
            None => Verdict {
                decision: Decision::Discard,
                layer: None,
            },
        }
    }
}
