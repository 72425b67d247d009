//! Turns whatever a model reveals about its inputs into an ordered feature
//! list.
//!
//! Names the model carries are authoritative. When only a count is known the
//! names are guessed from [`NAME_GUESSES`]; a guess is a label for the input
//! field and says nothing about the order the model was actually trained
//! with.

use crate::error::UnresolvableModelError;
use crate::features::{FeatureSpec, NameSource, ResolvedFeatures};
use crate::model::{FeatureMetadata, Model};

/// Labels to show for a model that only reports how many inputs it takes.
#[derive(Debug, Clone, Copy)]
pub struct NameGuess {
    pub count: usize,
    pub names: &'static [&'static str],
}

pub const NAME_GUESSES: &[NameGuess] = &[
    NameGuess {
        count: 3,
        names: &["pm1_0", "pm2_5", "pm10"],
    },
    NameGuess {
        count: 5,
        names: &["pm1_0", "pm10", "temperature", "humidity", "pressure"],
    },
    // Same as the 5-input layout with pm2_5 appended last. Kept as is; there is
    // no known training run this order comes from.
    NameGuess {
        count: 6,
        names: &[
            "pm1_0",
            "pm10",
            "temperature",
            "humidity",
            "pressure",
            "pm2_5",
        ],
    },
];

pub fn guess_names(count: usize) -> Vec<String> {
    match NAME_GUESSES.iter().find(|guess| guess.count == count) {
        Some(guess) => guess.names.iter().map(|name| name.to_string()).collect(),
        None => (1..=count).map(|i| format!("feature_{i}")).collect(),
    }
}

pub fn resolve<M: Model + ?Sized>(model: &M) -> Result<ResolvedFeatures, UnresolvableModelError> {
    resolve_metadata(FeatureMetadata::query(model))
}

pub fn resolve_metadata(
    metadata: FeatureMetadata,
) -> Result<ResolvedFeatures, UnresolvableModelError> {
    let (names, source) = match metadata {
        FeatureMetadata::Names(names) => {
            log::info!("model reports {} feature names", names.len());
            (names, NameSource::FromModel)
        }
        FeatureMetadata::Count(count) => {
            let names = guess_names(count);
            log::warn!(
                "model reports {count} features without names, guessing {:?}",
                names
            );
            (names, NameSource::Guessed)
        }
        FeatureMetadata::Unavailable => {
            log::error!("model exposes neither feature names nor a feature count");
            return Err(UnresolvableModelError);
        }
    };

    let specs = names.iter().map(|name| FeatureSpec::for_name(name)).collect();
    Ok(ResolvedFeatures::new(names, source, specs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn literal_guesses() {
        assert_eq!(guess_names(3), owned(&["pm1_0", "pm2_5", "pm10"]));
        assert_eq!(
            guess_names(5),
            owned(&["pm1_0", "pm10", "temperature", "humidity", "pressure"])
        );
        let mut six = guess_names(5);
        six.push("pm2_5".to_string());
        assert_eq!(guess_names(6), six);
    }

    #[test]
    fn other_counts_are_numbered_from_one() {
        assert_eq!(
            guess_names(7),
            (1..=7).map(|i| format!("feature_{i}")).collect::<Vec<_>>()
        );
        assert!(guess_names(0).is_empty());
        assert_eq!(guess_names(1), owned(&["feature_1"]));
    }

    #[test]
    fn guessed_length_matches_count() {
        for count in 0..40 {
            assert_eq!(guess_names(count).len(), count);
        }
    }

    #[test]
    fn names_are_taken_verbatim() {
        let names = owned(&["so2", "Temperature_C", "pm10"]);
        let resolved = resolve_metadata(FeatureMetadata::Names(names.clone())).unwrap();
        assert_eq!(resolved.names(), names.as_slice());
        assert_eq!(resolved.count(), 3);
        assert_eq!(resolved.source(), NameSource::FromModel);
    }

    #[test]
    fn empty_name_list_resolves_to_zero_features() {
        let resolved = resolve_metadata(FeatureMetadata::Names(Vec::new())).unwrap();
        assert_eq!(resolved.count(), 0);
        assert!(resolved.specs().is_empty());
    }

    #[test]
    fn unavailable_metadata_is_an_error() {
        assert_eq!(
            resolve_metadata(FeatureMetadata::Unavailable),
            Err(UnresolvableModelError)
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let a = resolve_metadata(FeatureMetadata::Count(6)).unwrap();
        let b = resolve_metadata(FeatureMetadata::Count(6)).unwrap();
        assert_eq!(a, b);
    }
}
