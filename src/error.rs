//! Error types for the adjudication engine.
//!
//! The derivations are total functions; these errors cover the few inputs
//! that mean the upstream snapshot is inconsistent, plus misuse of the
//! lifecycle helpers on [`Case`](crate::Case).

use rust_decimal::Decimal;
use thiserror::Error;

use crate::track::TrackKind;

/// Hard failures raised by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Acceleration ceiling requested for a negative number of days.
    #[error("rejected day count cannot be negative (got {0})")]
    NegativeDays(i64),

    /// Acceleration ceiling requested with a negative daily rate.
    #[error("daily liquidated damages rate cannot be negative (got {0})")]
    NegativeRate(Decimal),

    /// The acceleration ceiling does not fit in a decimal amount.
    #[error("acceleration ceiling for {rejected_days} days at {daily_rate} per day is out of range")]
    CeilingOverflow { daily_rate: Decimal, rejected_days: i64 },

    /// The stored previous basis verdict is not a verdict the engine knows.
    #[error("unrecognized prior basis verdict `{0}`")]
    InvalidPriorVerdict(String),

    /// Compensation or time was claimed before the basis claim was submitted.
    #[error("the basis claim must be submitted before the {0} track can be claimed")]
    BasisNotSubmitted(TrackKind),

    /// The category was changed after the basis claim was first submitted.
    #[error("the category is fixed once the basis claim has been submitted")]
    CategoryLocked,

    /// Compensation claimed for a category that carries no compensation right.
    #[error("compensation cannot be claimed for a force majeure circumstance")]
    CompensationUnavailable,

    /// A response was recorded on a track with no submitted claim.
    #[error("the {0} track has no submitted claim to respond to")]
    NothingToAnswer(TrackKind),

    /// A locked or withdrawn track was revised.
    #[error("the {0} track is closed for revisions")]
    TrackClosed(TrackKind),

    /// A change order was requested before all tracks were agreed.
    #[error("the case is not ready for a change order")]
    NotReadyForChangeOrder,
}

/// Errors raised while loading project configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {path}: {message}")]
    Read { path: String, message: String },

    /// The configuration file is not valid TOML for [`ProjectConfig`](crate::ProjectConfig).
    #[error("failed to parse config: {path}: {message}")]
    Parse { path: String, message: String },
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
