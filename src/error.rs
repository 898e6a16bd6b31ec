/// Error types for the processing pipeline
///
/// Only the structural failures (`MissingGlobalParameter`,
/// `InvalidGlobalParameter`, `Io`) ever reach the caller of
/// `pipeline::processing::process`. The remaining variants are raised by
/// individual stages and turned into warnings by the processing entry point.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("{0} parameter not found in any PARAMETER SUMMARY")]
    MissingGlobalParameter(&'static str),
    #[error("Invalid {name} value '{value}': expected a positive integer")]
    InvalidGlobalParameter { name: &'static str, value: String },
    #[error("Invalid row range format: '{0}'. Ignoring range.")]
    InvalidRowRange(String),
    #[error("Unknown scale type: {0}")]
    UnknownScaleType(String),
    #[error("Log scale needs positive bounds, got {start} to {stop}")]
    InvalidTauBounds { start: f64, stop: f64 },
}
