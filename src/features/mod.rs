pub mod defaults;
pub mod resolver;

pub use resolver::{guess_names, resolve, resolve_metadata};

/// One input field: its label plus the value and increment it starts with.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSpec {
    pub name: String,
    pub default: f64,
    pub step: f64,
}

impl FeatureSpec {
    pub fn for_name(name: &str) -> Self {
        let (default, step) = defaults::default_for(name);
        FeatureSpec {
            name: name.to_string(),
            default,
            step,
        }
    }
}

/// Where the feature names came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    FromModel,
    Guessed,
}

/// The model's inputs in the order it expects them. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFeatures {
    names: Vec<String>,
    source: NameSource,
    specs: Vec<FeatureSpec>,
}

impl ResolvedFeatures {
    pub(crate) fn new(names: Vec<String>, source: NameSource, specs: Vec<FeatureSpec>) -> Self {
        ResolvedFeatures {
            names,
            source,
            specs,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }

    pub fn source(&self) -> NameSource {
        self.source
    }

    pub fn is_guessed(&self) -> bool {
        self.source == NameSource::Guessed
    }

    pub fn specs(&self) -> &[FeatureSpec] {
        &self.specs
    }

    pub fn defaults(&self) -> Vec<f64> {
        self.specs.iter().map(|spec| spec.default).collect()
    }
}
