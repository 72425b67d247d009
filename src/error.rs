use std::path::PathBuf;

use thiserror::Error;

/// The model carries neither a feature-name list nor a feature count, so no
/// input form can be generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "model does not expose feature information; re-train or re-save it with \
     `feature_names` or `n_features` so inputs can be generated"
)]
pub struct UnresolvableModelError;

/// The assembled input has a different length than the resolved feature count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("input shape mismatch: model expects {expected} features but you provided {provided}")]
pub struct FeatureCountMismatchError {
    pub expected: usize,
    pub provided: usize,
}

/// Failure raised by the model's own predict capability.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("model input layer takes {expected} values but received {provided}")]
    InputWidth { expected: usize, provided: usize },
    #[error("normalisation stats cover {expected} features but received {provided}")]
    Scaler { expected: usize, provided: usize },
    #[error("model produced a non-finite output")]
    NonFinite,
    #[error("model has no layers")]
    EmptyNetwork,
    #[error("layer {layer}: bias has {bias} entries for {outputs} outputs")]
    BiasWidth {
        layer: usize,
        bias: usize,
        outputs: usize,
    },
    #[error("layer {layer} outputs {outputs} values but layer {next} takes {inputs}")]
    LayerChain {
        layer: usize,
        outputs: usize,
        next: usize,
        inputs: usize,
    },
}

/// A value that should have been a number but was not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input at row {row}, column {column}: {value:?} is not a number")]
pub struct InvalidCellError {
    pub row: usize,
    pub column: usize,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Unresolvable(#[from] UnresolvableModelError),
    #[error(transparent)]
    FeatureCountMismatch(#[from] FeatureCountMismatchError),
    #[error("prediction failed: {0}")]
    Prediction(#[from] PredictionError),
    #[error("failed to load model from {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },
    #[error(transparent)]
    InvalidInput(#[from] InvalidCellError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub(crate) fn model_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AppError::ModelLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_states_both_lengths() {
        let err = FeatureCountMismatchError {
            expected: 5,
            provided: 4,
        };
        assert_eq!(
            err.to_string(),
            "input shape mismatch: model expects 5 features but you provided 4"
        );
    }

    #[test]
    fn unresolvable_message_carries_guidance() {
        let msg = AppError::from(UnresolvableModelError).to_string();
        assert!(msg.contains("re-save"));
        assert!(msg.contains("n_features"));
    }
}
