use crate::error::{AppError, FeatureCountMismatchError};
use crate::features::ResolvedFeatures;
use crate::model::{Model, Prediction};

/// User readings in feature order, checked against the resolved count.
#[derive(Debug, Clone, PartialEq)]
pub struct InputVector(Vec<f64>);

impl InputVector {
    pub fn assemble(
        values: Vec<f64>,
        features: &ResolvedFeatures,
    ) -> Result<Self, FeatureCountMismatchError> {
        if values.len() != features.count() {
            return Err(FeatureCountMismatchError {
                expected: features.count(),
                provided: values.len(),
            });
        }
        Ok(InputVector(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Length check first, then the model. A mismatch never reaches `predict`.
pub fn predict_checked<M: Model + ?Sized>(
    model: &M,
    features: &ResolvedFeatures,
    values: Vec<f64>,
) -> Result<Prediction, AppError> {
    let input = InputVector::assemble(values, features)?;
    log::debug!("predicting on {:?}", input.as_slice());
    let prediction = model.predict(input.as_slice())?;
    log::info!("{prediction}");
    Ok(prediction)
}
