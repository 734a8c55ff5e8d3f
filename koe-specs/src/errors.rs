//! Error types for the scenario harness.

use koe_rules::EngineError;
use thiserror::Error;

/// Errors that can occur while loading or running a scenario.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The fixture is not valid scenario TOML.
    #[error("failed to parse fixture: {path}: {message}")]
    Parse { path: String, message: String },

    /// The fixture file could not be read.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// A step failed in a way the fixture did not expect.
    #[error("step {step} ({action}) failed: {source}")]
    Step {
        step: usize,
        action: String,
        #[source]
        source: EngineError,
    },

    /// The final assessment failed.
    #[error("assessment failed: {0}")]
    Assess(#[source] EngineError),

    /// A step was expected to fail but succeeded, or failed differently.
    #[error("step {step} ({action}): expected error `{expected}`, got {actual}")]
    UnexpectedOutcome {
        step: usize,
        action: String,
        expected: String,
        actual: String,
    },
}

/// Result type for harness operations.
pub type SpecResult<T> = Result<T, SpecError>;
