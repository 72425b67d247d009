use std::path::Path;

use crate::error::{AppError, Result};
use crate::model::SavedModel;

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Writes bincode, or JSON when the path ends in `.json`.
pub fn save_model(path: impl AsRef<Path>, model: &SavedModel) -> Result<()> {
    let path = path.as_ref();
    let model_data = if is_json(path) {
        serde_json::to_vec_pretty(model).map_err(|e| AppError::model_load(path, e))?
    } else {
        bincode::serialize(model).map_err(|e| AppError::model_load(path, e))?
    };
    std::fs::write(path, model_data)?;
    Ok(())
}

pub fn load_model(path: impl AsRef<Path>) -> Result<SavedModel> {
    let path = path.as_ref();
    log::info!("loading model from {}", path.display());
    let model_data = std::fs::read(path).map_err(|e| AppError::model_load(path, e))?;
    let model: SavedModel = if is_json(path) {
        serde_json::from_slice(&model_data).map_err(|e| AppError::model_load(path, e))?
    } else {
        bincode::deserialize(&model_data).map_err(|e| AppError::model_load(path, e))?
    };
    model
        .network
        .validate()
        .map_err(|e| AppError::model_load(path, e))?;
    log::debug!(
        "model loaded: {} layers, input width {}, output width {}",
        model.network.layers.len(),
        model.network.input_size(),
        model.network.output_size()
    );
    Ok(model)
}
