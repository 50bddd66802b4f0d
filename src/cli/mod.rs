//! CLI support for pipette
//!
//! The pieces of the `pipette` binary that are worth calling from other
//! tools: running an expression against input, and checking its syntax.

mod check;
mod run;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use run::{RunOptions, RunOutput, context_from_json, execute_run};

use std::{io, time::Duration};

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Parse, evaluation, or registration error
    #[error("Filter error: {0}")]
    Filter(#[from] crate::FilterError),

    /// Malformed JSON passed on the command line
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The initial context was JSON, but not an object
    #[error("The initial context must be a JSON object, got {0}")]
    InvalidContext(&'static str),

    /// Evaluation did not complete in time
    #[error("Filter evaluation did not complete within {} ms", .0.as_millis())]
    Timeout(Duration),
}
