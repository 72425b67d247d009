pub mod layers;
pub mod network;
pub mod saved;

use std::fmt;

use crate::error::PredictionError;

pub use network::{DenseLayer, RegressionNetwork};
pub use saved::SavedModel;

/// A loaded predictive model.
///
/// Metadata is optional: a model may know the ordered names of the features it
/// was trained on, only how many there were, or nothing at all. Callers are
/// responsible for feeding inputs in training order; nothing here can verify it.
pub trait Model {
    fn feature_names(&self) -> Option<Vec<String>> {
        None
    }

    fn feature_count(&self) -> Option<usize> {
        None
    }

    fn predict(&self, input: &[f64]) -> Result<Prediction, PredictionError>;
}

/// What a model reveals about its inputs, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureMetadata {
    Names(Vec<String>),
    Count(usize),
    Unavailable,
}

impl FeatureMetadata {
    pub fn query<M: Model + ?Sized>(model: &M) -> Self {
        if let Some(names) = model.feature_names() {
            FeatureMetadata::Names(names)
        } else if let Some(count) = model.feature_count() {
            FeatureMetadata::Count(count)
        } else {
            FeatureMetadata::Unavailable
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl Prediction {
    pub fn from_output(mut values: Vec<f64>) -> Self {
        if values.len() == 1 {
            Prediction::Scalar(values.remove(0))
        } else {
            Prediction::Vector(values)
        }
    }

    pub fn values(&self) -> &[f64] {
        match self {
            Prediction::Scalar(v) => std::slice::from_ref(v),
            Prediction::Vector(vs) => vs,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Scalar(v) => write!(f, "Prediction: {}", render(*v)),
            Prediction::Vector(vs) => {
                let rendered: Vec<String> = vs.iter().map(|v| render(*v)).collect();
                write!(f, "Prediction array: [{}]", rendered.join(", "))
            }
        }
    }
}

/// Rounded to 3 places, whole numbers keep one decimal (`13.0`).
fn render(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.1}")
    } else {
        rounded.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl Model for Bare {
        fn predict(&self, _input: &[f64]) -> Result<Prediction, PredictionError> {
            Ok(Prediction::Scalar(0.0))
        }
    }

    struct Both;

    impl Model for Both {
        fn feature_names(&self) -> Option<Vec<String>> {
            Some(vec!["a".into(), "b".into()])
        }

        fn feature_count(&self) -> Option<usize> {
            Some(7)
        }

        fn predict(&self, _input: &[f64]) -> Result<Prediction, PredictionError> {
            Ok(Prediction::Scalar(0.0))
        }
    }

    #[test]
    fn query_prefers_names_over_count() {
        assert_eq!(
            FeatureMetadata::query(&Both),
            FeatureMetadata::Names(vec!["a".into(), "b".into()])
        );
        assert_eq!(FeatureMetadata::query(&Bare), FeatureMetadata::Unavailable);
    }

    #[test]
    fn scalar_display_rounds_to_three_places() {
        assert_eq!(Prediction::Scalar(41.23456).to_string(), "Prediction: 41.235");
        assert_eq!(Prediction::Scalar(13.0).to_string(), "Prediction: 13.0");
        assert_eq!(Prediction::Scalar(12.99999).to_string(), "Prediction: 13.0");
        assert_eq!(
            Prediction::from_output(vec![1.0, 2.5]).to_string(),
            "Prediction array: [1.0, 2.5]"
        );
    }
}
