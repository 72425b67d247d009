use std::io::{self, BufRead, Write};

use crate::data::batch::InputTable;
use crate::error::AppError;
use crate::features::{FeatureSpec, ResolvedFeatures};
use crate::model::{Model, Prediction};
use crate::prediction::predict_checked;
use crate::utils::input::get_input;

pub const CLOSING_HINT: &str = "If your prediction looks wrong, it's likely the model was trained on \
different features or a different order. Retrain the model and save it with the exact features \
you want to collect here.";

pub fn render_summary<W: Write>(out: &mut W, features: &ResolvedFeatures) -> io::Result<()> {
    writeln!(out, "Model expects {} features.", features.count())?;
    if features.is_guessed() {
        writeln!(
            out,
            "The model does not record feature names; labels below are guessed from the count \
             and may not match the training order."
        )?;
    } else {
        writeln!(out, "Detected feature names: {:?}", features.names())?;
    }
    Ok(())
}

fn prompt_for(spec: &FeatureSpec) -> String {
    format!(
        "{} [default {:.2}, step {}]: ",
        spec.name, spec.default, spec.step
    )
}

/// Asks for one value per feature, in feature order.
pub fn collect_values<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    features: &ResolvedFeatures,
) -> io::Result<Vec<f64>> {
    writeln!(out, "Enter values for the model inputs below (empty keeps the default):")?;
    features
        .specs()
        .iter()
        .map(|spec| get_input(input, out, &prompt_for(spec), spec.default))
        .collect()
}

/// Prints a prediction or its error. Returns whether it succeeded.
pub fn report<W: Write>(out: &mut W, outcome: Result<Prediction, AppError>) -> io::Result<bool> {
    match outcome {
        Ok(prediction) => {
            writeln!(out, "{prediction}")?;
            Ok(true)
        }
        Err(AppError::FeatureCountMismatch(err)) => {
            writeln!(out, "{err}")?;
            writeln!(
                out,
                "If this is unexpected, re-train your model with the exact features you want to use, and save it again."
            )?;
            Ok(false)
        }
        Err(err) => {
            writeln!(out, "{err}")?;
            Ok(false)
        }
    }
}

/// Predicts every row on its own. A failed row is reported and the rest still
/// run; returns false if any row failed.
pub fn run_batch<M, W>(
    out: &mut W,
    model: &M,
    features: &ResolvedFeatures,
    mut table: InputTable,
) -> io::Result<bool>
where
    M: Model + ?Sized,
    W: Write,
{
    if table.align_to(features.names()) {
        log::info!("batch columns matched feature names");
    } else {
        log::warn!(
            "batch header {:?} does not name the model features, using columns by position",
            table.headers
        );
    }

    let mut all_ok = true;
    for (i, row) in table.rows.into_iter().enumerate() {
        write!(out, "row {}: ", i + 1)?;
        let outcome = row
            .map_err(AppError::from)
            .and_then(|values| predict_checked(model, features, values));
        all_ok &= report(out, outcome)?;
    }
    Ok(all_ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredictionError;
    use crate::features::resolve_metadata;
    use crate::model::FeatureMetadata;

    struct Summing;

    impl Model for Summing {
        fn feature_names(&self) -> Option<Vec<String>> {
            Some(vec!["pm1_0".into(), "pm10".into()])
        }

        fn predict(&self, input: &[f64]) -> Result<Prediction, PredictionError> {
            let total: f64 = input.iter().sum();
            if total < 0.0 {
                return Err(PredictionError::NonFinite);
            }
            Ok(Prediction::Scalar(total))
        }
    }

    #[test]
    fn batch_reports_every_row_and_fails_on_any_bad_row() {
        let features = resolve_metadata(FeatureMetadata::query(&Summing)).unwrap();
        let table =
            InputTable::from_reader("pm10,pm1_0
2,1
3
1,x
-5,1
4,4
".as_bytes()).unwrap();
        let mut out = Vec::new();
        let ok = run_batch(&mut out, &Summing, &features, table).unwrap();
        assert!(!ok);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "row 1: Prediction: 3.0");
        assert_eq!(
            lines[1],
            "row 2: input shape mismatch: model expects 2 features but you provided 1"
        );
        assert!(lines[2].starts_with("If this is unexpected"));
        assert_eq!(
            lines[3],
            "row 3: invalid input at row 3, column 2: \"x\" is not a number"
        );
        assert_eq!(
            lines[4],
            "row 4: prediction failed: model produced a non-finite output"
        );
        assert_eq!(lines[5], "row 5: Prediction: 8.0");
    }

    #[test]
    fn batch_of_good_rows_succeeds() {
        let features = resolve_metadata(FeatureMetadata::query(&Summing)).unwrap();
        let table = InputTable::from_reader("a,b
1,2
".as_bytes()).unwrap();
        let mut out = Vec::new();
        assert!(run_batch(&mut out, &Summing, &features, table).unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "row 1: Prediction: 3.0\n");
    }

    #[test]
    fn summary_distinguishes_guessed_names() {
        let guessed = resolve_metadata(FeatureMetadata::Count(3)).unwrap();
        let mut out = Vec::new();
        render_summary(&mut out, &guessed).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Model expects 3 features."));
        assert!(text.contains("guessed"));

        let named = resolve_metadata(FeatureMetadata::Names(vec!["so2".into()])).unwrap();
        let mut out = Vec::new();
        render_summary(&mut out, &named).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Detected feature names: [\"so2\"]"));
    }

    #[test]
    fn collects_in_feature_order_with_defaults() {
        let features = resolve_metadata(FeatureMetadata::Count(5)).unwrap();
        let mut out = Vec::new();
        let values = collect_values(&mut "1\n\n30.5\n\n\n".as_bytes(), &mut out, &features).unwrap();
        assert_eq!(values, vec![1.0, 20.0, 30.5, 50.0, 1000.0]);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("temperature [default 25.00, step 0.1]: "));
    }
}
