use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::data::preprocessing::DataStats;
use crate::error::PredictionError;
use crate::model::layers::relu;

/// One fully connected layer; `weights` is `(inputs, outputs)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Array2<f64>,
    pub bias: Array1<f64>,
}

impl DenseLayer {
    pub fn new(weights: Array2<f64>, bias: Array1<f64>) -> Self {
        DenseLayer { weights, bias }
    }

    pub fn inputs(&self) -> usize {
        self.weights.nrows()
    }

    pub fn outputs(&self) -> usize {
        self.weights.ncols()
    }

    fn apply(&self, x: &Array2<f64>) -> Array2<f64> {
        x.dot(&self.weights) + &self.bias
    }
}

/// Feed-forward regressor: ReLU between layers, linear output.
///
/// A single layer is plain linear regression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionNetwork {
    pub layers: Vec<DenseLayer>,
}

impl RegressionNetwork {
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self, PredictionError> {
        let network = RegressionNetwork { layers };
        network.validate()?;
        Ok(network)
    }

    /// Every bias matches its layer's width and each layer feeds the next.
    /// Deserialized networks skip `new`, so loaders must call this.
    pub fn validate(&self) -> Result<(), PredictionError> {
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.bias.len() != layer.outputs() {
                return Err(PredictionError::BiasWidth {
                    layer: i,
                    bias: layer.bias.len(),
                    outputs: layer.outputs(),
                });
            }
        }
        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[0].outputs() != pair[1].inputs() {
                return Err(PredictionError::LayerChain {
                    layer: i,
                    outputs: pair[0].outputs(),
                    next: i + 1,
                    inputs: pair[1].inputs(),
                });
            }
        }
        Ok(())
    }

    pub fn linear(coefficients: Vec<f64>, intercept: f64) -> Self {
        let n = coefficients.len();
        let weights = Array2::from_shape_vec((n, 1), coefficients)
            .unwrap_or_else(|_| Array2::zeros((n, 1)));
        RegressionNetwork {
            layers: vec![DenseLayer::new(weights, Array1::from_elem(1, intercept))],
        }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map(DenseLayer::inputs).unwrap_or(0)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map(DenseLayer::outputs).unwrap_or(0)
    }

    pub fn forward(&self, x: &Array2<f64>) -> Array2<f64> {
        let last = self.layers.len().saturating_sub(1);
        let mut activation = x.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            let z = layer.apply(&activation);
            activation = if i < last { relu(&z) } else { z };
        }
        activation
    }

    /// Runs one sample through the network, standardising it first when
    /// `stats` is given.
    pub fn predict(
        &self,
        input: &[f64],
        stats: Option<&DataStats>,
    ) -> Result<Vec<f64>, PredictionError> {
        if self.layers.is_empty() {
            return Err(PredictionError::EmptyNetwork);
        }
        self.validate()?;
        if input.len() != self.input_size() {
            return Err(PredictionError::InputWidth {
                expected: self.input_size(),
                provided: input.len(),
            });
        }

        let row = Array1::from(input.to_vec()).insert_axis(Axis(0));
        let row = match stats {
            Some(stats) => stats.normalize(&row)?,
            None => row,
        };
        log::debug!("normalized input: {row:?}");

        let output = self.forward(&row);
        let values = output.row(0).to_vec();
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PredictionError::NonFinite);
        }
        Ok(values)
    }
}
