use std::path::PathBuf;

use crate::error::{AppError, InvalidCellError, Result};

pub const DEFAULT_MODEL_PATH: &str = "aqi_model.bin";

pub const USAGE: &str = "\
usage: aqi-predictor [--model PATH] [--values V1,V2,...] [--batch FILE.csv]

  --model PATH     model artifact (bincode, or JSON when it ends in .json)
  --values LIST    comma separated inputs in feature order, skips the prompts
  --batch FILE     predict every row of a CSV file with a header line; rows
                   with a bad cell or the wrong length are reported and
                   skipped, the exit code is non-zero if any row failed
  -h, --help       show this message

environment: AQI_MODEL_PATH, AQI_BATCH_PATH, RUST_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub values: Option<Vec<f64>>,
    pub batch_path: Option<PathBuf>,
    pub show_help: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_sources(|key| std::env::var(key).ok(), std::env::args().skip(1))
    }

    /// Environment first, command line flags override it.
    pub fn from_sources<F, I>(lookup: F, args: I) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = String>,
    {
        let mut config = AppConfig {
            model_path: non_empty(lookup("AQI_MODEL_PATH"))
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            values: None,
            batch_path: non_empty(lookup("AQI_BATCH_PATH")).map(PathBuf::from),
            show_help: false,
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => config.show_help = true,
                "--model" => config.model_path = PathBuf::from(flag_value(&arg, args.next())?),
                "--batch" => config.batch_path = Some(PathBuf::from(flag_value(&arg, args.next())?)),
                "--values" => config.values = Some(parse_values(&flag_value(&arg, args.next())?)?),
                other => return Err(AppError::Config(format!("unknown argument `{other}`"))),
            }
        }

        if config.values.is_some() && config.batch_path.is_some() {
            return Err(AppError::Config(
                "--values and --batch cannot be used together".to_string(),
            ));
        }
        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn flag_value(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| AppError::Config(format!("{flag} needs a value")))
}

/// An empty list is valid and means a model with no inputs.
pub fn parse_values(raw: &str) -> Result<Vec<f64>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(i, cell)| {
            cell.parse::<f64>().map_err(|_| {
                AppError::from(InvalidCellError {
                    row: 1,
                    column: i + 1,
                    value: cell.to_string(),
                })
            })
        })
        .collect()
}
