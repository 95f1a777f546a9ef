//! JSON output lines: one JSON object per line (ndjson) for the log pipeline and the caller.

use crate::features::FeatureValue;
use crate::prediction::PredictionResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Outcome of one submission as reported back: either a result or the error that blocked it.
#[derive(Debug, Serialize)]
pub struct PredictionReport<'a> {
    pub request_id: String,
    pub ts: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_sha256: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a PredictionResult>,
    /// Model input in schema order, as the classifier received it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<FeatureValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> PredictionReport<'a> {
    pub fn new(
        model_sha256: Option<&'a str>,
        outcome: Result<&'a PredictionResult, &dyn std::error::Error>,
    ) -> Self {
        let (result, error) = match outcome {
            Ok(r) => (Some(r), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            ts: Utc::now(),
            model_sha256,
            result,
            features: None,
            error,
        }
    }

    pub fn with_features(mut self, features: Vec<FeatureValue>) -> Self {
        self.features = Some(features);
        self
    }
}

/// Initialize tracing with JSON format (one JSON object per line)
pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber writing to stderr (stdout carries the reports);
    /// level from RUST_LOG or the configured default.
    pub fn init(json: bool, default_level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(fmt).init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    /// Emit a single structured line (e.g. a prediction report) without going through tracing
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) -> std::io::Result<()> {
        let line = serde_json::to_string(event)?;
        writeln!(w, "{}", line)
    }
}
