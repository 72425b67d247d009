use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use aqi_predictor::config::{AppConfig, USAGE};
use aqi_predictor::data::batch::InputTable;
use aqi_predictor::form::{CLOSING_HINT, collect_values, render_summary, report, run_batch};
use aqi_predictor::utils::io::load_model;
use aqi_predictor::{predict_checked, resolve};

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    if config.show_help {
        println!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    }

    let model = load_model(&config.model_path)?;
    let features = resolve(&model)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_summary(&mut out, &features)?;

    let ok = match (config.batch_path, config.values) {
        (Some(path), _) => {
            let table = InputTable::from_path(&path)
                .with_context(|| format!("reading batch file {}", path.display()))?;
            run_batch(&mut out, &model, &features, table)?
        }
        (None, Some(values)) => report(&mut out, predict_checked(&model, &features, values))?,
        (None, None) => {
            let stdin = io::stdin();
            let values = collect_values(&mut stdin.lock(), &mut out, &features)
                .context("reading feature values")?;
            report(&mut out, predict_checked(&model, &features, values))?
        }
    };

    writeln!(out, "\n{CLOSING_HINT}")?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
