//! Assembly of the classifier from configured patterns and the runtime shape.

use crate::config::{FilePattern, PruneConfig};
use crate::error::{PruneError, Result};
use crate::filter::{Classifier, LayerSource, PatternLayer};
use crate::platform::Platform;
use crate::runtime::runtime_shape;

/// Lower-cased platform set for one pattern; `None` means every platform.
pub fn pattern_platforms(index: usize, pattern: &FilePattern) -> Result<Option<Vec<Platform>>> {
    let spec = match &pattern.platform {
        Some(spec) => spec,
        None => return Ok(None),
    };

    spec.names()
        .into_iter()
        .map(|name| {
            name.parse::<Platform>()
                .map_err(|_| PruneError::InvalidPlatform {
                    index: index + 1,
                    value: name.to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Validate every declaration, then build the active layers for `platform`
/// followed by the built-in runtime shape layer.
pub fn build_classifier(config: &PruneConfig, platform: Platform) -> Result<Classifier> {
    let patterns = config.patterns.as_ref().ok_or_else(|| {
        PruneError::Config(
            "The 'prune' section in the config file doesn't contain a 'patterns' field".to_string(),
        )
    })?;

    let mut classifier = Classifier::default();

    for (index, pattern) in patterns.iter().enumerate() {
        let platforms = pattern_platforms(index, pattern)?;
        // Inactive layers are compiled too so that a bad glob fails the run on every platform.
        let layer = PatternLayer::new(LayerSource::Pattern(index), &pattern.keep, &pattern.delete)?;

        let active = platforms.map_or(true, |set| set.contains(&platform));
        if active {
            classifier.push(layer);
        } else {
            log::debug!("Skipping {} (not active on {})", LayerSource::Pattern(index), platform);
        }
    }

    let shape = runtime_shape(platform);
    classifier.push(PatternLayer::new(
        LayerSource::RuntimeShape(platform),
        &shape.accept,
        &shape.reject,
    )?);

    Ok(classifier)
}
