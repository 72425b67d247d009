pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod form;
pub mod model;
pub mod prediction;
pub mod utils;

use std::ffi::{CStr, CString};
use std::path::Path;

use libc::c_char;

pub use error::{AppError, FeatureCountMismatchError, PredictionError, UnresolvableModelError};
pub use features::{FeatureSpec, NameSource, ResolvedFeatures, resolve};
pub use model::{FeatureMetadata, Model, Prediction, SavedModel};
pub use prediction::{InputVector, predict_checked};

pub const STATUS_OK: i32 = 0;
pub const STATUS_UNRESOLVABLE_MODEL: i32 = 1;
pub const STATUS_FEATURE_COUNT_MISMATCH: i32 = 2;
pub const STATUS_PREDICTION_ERROR: i32 = 3;
pub const STATUS_MODEL_LOAD_ERROR: i32 = 4;
pub const STATUS_INVALID_ARGUMENT: i32 = 5;

fn status_of(err: &AppError) -> i32 {
    match err {
        AppError::Unresolvable(_) => STATUS_UNRESOLVABLE_MODEL,
        AppError::FeatureCountMismatch(_) => STATUS_FEATURE_COUNT_MISMATCH,
        AppError::Prediction(_) => STATUS_PREDICTION_ERROR,
        AppError::ModelLoad { .. } | AppError::Io(_) => STATUS_MODEL_LOAD_ERROR,
        AppError::InvalidInput(_) | AppError::Config(_) | AppError::Csv(_) => {
            STATUS_INVALID_ARGUMENT
        }
    }
}

fn c_string(text: &str) -> CString {
    CString::new(text.replace('\0', "")).unwrap_or_default()
}

/// Reads a path handed over from C. `None` for null or non UTF-8 input.
///
/// # Safety
/// `ptr` must be null or point to a NUL terminated string.
unsafe fn path_arg<'a>(ptr: *const c_char) -> Option<&'a Path> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok().map(Path::new)
}

fn load_and_resolve(path: &Path) -> Result<(SavedModel, ResolvedFeatures), AppError> {
    let model = utils::io::load_model(path)?;
    let features = resolve(&model)?;
    Ok((model, features))
}

struct LoadedModel {
    model: SavedModel,
    features: ResolvedFeatures,
    names: Vec<CString>,
}

/// A model loaded once for a foreign form renderer, together with the feature
/// list resolved from it. Check the status first; on failure there are no
/// features and `message` explains why.
pub struct ModelHandle {
    status: i32,
    message: CString,
    loaded: Option<LoadedModel>,
}

impl ModelHandle {
    fn from_result(result: Result<(SavedModel, ResolvedFeatures), AppError>) -> Self {
        match result {
            Ok((model, features)) => ModelHandle {
                status: STATUS_OK,
                message: CString::default(),
                loaded: Some(LoadedModel {
                    names: features.names().iter().map(|n| c_string(n)).collect(),
                    model,
                    features,
                }),
            },
            Err(err) => ModelHandle {
                status: status_of(&err),
                message: c_string(&err.to_string()),
                loaded: None,
            },
        }
    }

    fn spec(&self, index: usize) -> Option<&FeatureSpec> {
        self.loaded.as_ref()?.features.specs().get(index)
    }
}

/// Loads and resolves the model at `model_path`. Never null; release with
/// `aqi_free_model`.
#[unsafe(no_mangle)]
pub extern "C" fn aqi_load_model(model_path: *const c_char) -> *mut ModelHandle {
    let result = match unsafe { path_arg(model_path) } {
        Some(path) => load_and_resolve(path),
        None => Err(AppError::Config("model path is null or not UTF-8".to_string())),
    };
    if let Err(e) = &result {
        log::error!("loading model failed: {e}");
    }
    Box::into_raw(Box::new(ModelHandle::from_result(result)))
}

/// # Safety
/// `handle` must be null or come from `aqi_load_model` and not be freed yet.
unsafe fn handle_ref<'a>(handle: *const ModelHandle) -> Option<&'a ModelHandle> {
    unsafe { handle.as_ref() }
}

#[unsafe(no_mangle)]
pub extern "C" fn aqi_model_status(handle: *const ModelHandle) -> i32 {
    unsafe { handle_ref(handle) }.map_or(STATUS_INVALID_ARGUMENT, |h| h.status)
}

#[unsafe(no_mangle)]
pub extern "C" fn aqi_model_message(handle: *const ModelHandle) -> *const c_char {
    unsafe { handle_ref(handle) }.map_or(std::ptr::null(), |h| h.message.as_ptr())
}

#[unsafe(no_mangle)]
pub extern "C" fn aqi_feature_count(handle: *const ModelHandle) -> usize {
    unsafe { handle_ref(handle) }
        .and_then(|h| h.loaded.as_ref())
        .map_or(0, |l| l.features.count())
}

#[unsafe(no_mangle)]
pub extern "C" fn aqi_features_guessed(handle: *const ModelHandle) -> bool {
    unsafe { handle_ref(handle) }
        .and_then(|h| h.loaded.as_ref())
        .is_some_and(|l| l.features.is_guessed())
}

#[unsafe(no_mangle)]
pub extern "C" fn aqi_feature_name(handle: *const ModelHandle, index: usize) -> *const c_char {
    unsafe { handle_ref(handle) }
        .and_then(|h| h.loaded.as_ref())
        .and_then(|l| l.names.get(index))
        .map_or(std::ptr::null(), |name| name.as_ptr())
}

#[unsafe(no_mangle)]
pub extern "C" fn aqi_feature_default(handle: *const ModelHandle, index: usize) -> f64 {
    unsafe { handle_ref(handle) }
        .and_then(|h| h.spec(index))
        .map_or(f64::NAN, |spec| spec.default)
}

#[unsafe(no_mangle)]
pub extern "C" fn aqi_feature_step(handle: *const ModelHandle, index: usize) -> f64 {
    unsafe { handle_ref(handle) }
        .and_then(|h| h.spec(index))
        .map_or(f64::NAN, |spec| spec.step)
}

#[unsafe(no_mangle)]
pub extern "C" fn aqi_free_model(handle: *mut ModelHandle) {
    if !handle.is_null() {
        unsafe {
            let _ = Box::from_raw(handle);
        }
    }
}

/// Outcome of `aqi_predict`. `values` holds `len` outputs when `status` is 0;
/// `message` is set otherwise.
#[repr(C)]
pub struct PredictionResult {
    pub status: i32,
    pub values: *mut f64,
    pub len: usize,
    pub message: *mut c_char,
}

impl PredictionResult {
    fn from_result(result: Result<Prediction, AppError>) -> Self {
        match result {
            Ok(prediction) => {
                let values: Box<[f64]> = prediction.values().into();
                let len = values.len();
                PredictionResult {
                    status: STATUS_OK,
                    values: Box::into_raw(values).cast::<f64>(),
                    len,
                    message: std::ptr::null_mut(),
                }
            }
            Err(err) => PredictionResult::failure(status_of(&err), c_string(&err.to_string())),
        }
    }

    fn failure(status: i32, message: CString) -> Self {
        PredictionResult {
            status,
            values: std::ptr::null_mut(),
            len: 0,
            message: message.into_raw(),
        }
    }
}

fn predict_on(loaded: &LoadedModel, values: *const f64, len: usize) -> Result<Prediction, AppError> {
    let inputs = if len == 0 {
        Vec::new()
    } else if values.is_null() {
        return Err(AppError::Config("values pointer is null".to_string()));
    } else {
        unsafe { std::slice::from_raw_parts(values, len) }.to_vec()
    };
    predict_checked(&loaded.model, &loaded.features, inputs)
}

/// Predicts on `len` values read from `values`, in the handle's feature order.
/// A handle whose load failed reports that failure again.
#[unsafe(no_mangle)]
pub extern "C" fn aqi_predict(
    handle: *const ModelHandle,
    values: *const f64,
    len: usize,
) -> *mut PredictionResult {
    let outcome = match unsafe { handle_ref(handle) } {
        None => PredictionResult::from_result(Err(AppError::Config(
            "model handle is null".to_string(),
        ))),
        Some(ModelHandle {
            status,
            message,
            loaded: None,
        }) => PredictionResult::failure(*status, message.clone()),
        Some(ModelHandle {
            loaded: Some(loaded),
            ..
        }) => {
            let result = predict_on(loaded, values, len);
            if let Err(e) = &result {
                log::error!("prediction failed: {e}");
            }
            PredictionResult::from_result(result)
        }
    };
    Box::into_raw(Box::new(outcome))
}

#[unsafe(no_mangle)]
pub extern "C" fn aqi_free_prediction_result(result: *mut PredictionResult) {
    if result.is_null() {
        return;
    }
    unsafe {
        let result = Box::from_raw(result);
        if !result.values.is_null() {
            let _ = Box::from_raw(std::ptr::slice_from_raw_parts_mut(result.values, result.len));
        }
        if !result.message.is_null() {
            let _ = CString::from_raw(result.message);
        }
    }
}
