//! Obesity predictor entrypoint: loads the artifact bundle once, then answers one
//! form submission per input line (file argument or stdin) with one JSON report per line.

use obesity_predictor::{
    artifacts::ArtifactBundle,
    config::AppConfig,
    form::FormSubmission,
    logging::{PredictionReport, StructuredLogger},
};
use std::io::{BufRead, BufReader};
use tracing::{info, warn};

fn run_one(
    bundle: &ArtifactBundle,
    line: &str,
    out: &mut impl std::io::Write,
) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
    let model_sha = bundle.fingerprints().get("classifier").map(String::as_str);
    let outcome = serde_json::from_str::<FormSubmission>(line)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|form| form.into_record().map_err(|e| e.into()))
        .and_then(|record| bundle.predict_with_features(&record).map_err(|e| e.into()));

    let ok = outcome.is_ok();
    let report = match &outcome {
        Ok((vector, result)) => {
            info!(obesity_level = %result.level, code = result.class_code, "prediction");
            PredictionReport::new(model_sha, Ok(result)).with_features(bundle.encoder().labelled(vector))
        }
        Err(e) => {
            warn!(error = %e, "prediction refused");
            PredictionReport::new(model_sha, Err(e.as_ref()))
        }
    };
    StructuredLogger::emit_json(&report, out)?;
    Ok(ok)
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("OBESITY_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = AppConfig::load(&config_path)?;

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(artifacts_dir = ?config.artifacts.dir, "obesity predictor starting");
    let bundle = ArtifactBundle::load(&config)?;

    let input: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(BufReader::new(std::io::stdin())),
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let (mut served, mut refused) = (0u64, 0u64);
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if run_one(&bundle, &line, &mut out)? {
            served += 1;
        } else {
            refused += 1;
        }
    }
    info!(served, refused, "obesity predictor done");
    Ok(())
}
