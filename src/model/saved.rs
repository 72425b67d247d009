use serde::{Deserialize, Serialize};

use crate::data::preprocessing::DataStats;
use crate::error::PredictionError;
use crate::model::{Model, Prediction, RegressionNetwork};

/// A trained regressor as stored on disk.
///
/// `feature_names` and `n_features` are whatever the training side chose to
/// record; either may be missing. The network's own input width is not treated
/// as metadata, it is only checked when predicting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedModel {
    pub network: RegressionNetwork,
    #[serde(default)]
    pub stats: Option<DataStats>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    #[serde(default)]
    pub n_features: Option<usize>,
}

impl SavedModel {
    pub fn new(network: RegressionNetwork) -> Self {
        SavedModel {
            network,
            stats: None,
            feature_names: None,
            n_features: None,
        }
    }

    pub fn with_stats(mut self, stats: DataStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_feature_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feature_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_feature_count(mut self, count: usize) -> Self {
        self.n_features = Some(count);
        self
    }
}

impl Model for SavedModel {
    fn feature_names(&self) -> Option<Vec<String>> {
        self.feature_names.clone()
    }

    fn feature_count(&self) -> Option<usize> {
        self.n_features
    }

    fn predict(&self, input: &[f64]) -> Result<Prediction, PredictionError> {
        let values = self.network.predict(input, self.stats.as_ref())?;
        Ok(Prediction::from_output(values))
    }
}
