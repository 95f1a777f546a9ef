//! Structured logging and report lines.

mod format;

pub use format::{PredictionReport, StructuredLogger};
