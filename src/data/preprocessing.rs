use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::PredictionError;

/// Per-feature standardisation captured at training time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStats {
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
}

impl DataStats {
    pub fn new(mean: Vec<f64>, std: Vec<f64>) -> Self {
        DataStats {
            mean: Array1::from(mean),
            std: Array1::from(std),
        }
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// `(x - mean) / std`, column-wise. A zero std leaves the centred value as is.
    pub fn normalize(&self, x: &Array2<f64>) -> Result<Array2<f64>, PredictionError> {
        if self.mean.len() != x.ncols() || self.std.len() != x.ncols() {
            return Err(PredictionError::Scaler {
                expected: self.mean.len(),
                provided: x.ncols(),
            });
        }
        let mean = self.mean.view().insert_axis(Axis(0));
        let std = self
            .std
            .mapv(|s| if s == 0.0 { 1.0 } else { s })
            .insert_axis(Axis(0));
        Ok((x - &mean) / &std)
    }
}
