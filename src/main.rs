mod config;

use std::env;

use anyhow::{Context, Result};
use log::info;
use machine_learning::{
    bayes::{self, Gaussian},
    evaluation,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

use config::{ReportFormat, RunConfig};

const CONFIG_VAR: &str = "NB_CONFIG";

fn main() -> Result<()> {
    env_logger::init();

    let config = match env::var(CONFIG_VAR) {
        Ok(path) => {
            RunConfig::load(&path).with_context(|| format!("loading config from {path}"))?
        }
        Err(_) => {
            info!("{CONFIG_VAR} not set, using the bundled iris sample");
            RunConfig::builtin()?
        }
    };

    let data = config.dataset()?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let (train, test) = data
        .split(config.test_ratio, &mut StdRng::seed_from_u64(seed))
        .context("splitting dataset")?;
    info!(
        "split {} row(s) with seed {seed}: {} train, {} test",
        data.len(),
        train.len(),
        test.len()
    );

    let model = bayes::fit(train.x(), train.y()).context("fitting model")?;
    info!(
        "fitted {} class(es) over {} feature(s)",
        model.nclasses(),
        model.nfeatures()
    );

    let likelihood = Gaussian::with_policy(config.degenerate_policy);
    let predicted = if config.log_space {
        bayes::predict_log(&model, test.x(), &likelihood)
    } else {
        bayes::predict(&model, test.x(), &likelihood)
    }
    .context("predicting test rows")?;

    let metrics = evaluation::evaluate(&predicted, test.y())?;
    match config.report {
        ReportFormat::Text => println!("{metrics}"),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&metrics)?),
    }

    Ok(())
}
