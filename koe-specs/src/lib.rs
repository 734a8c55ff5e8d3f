//! Scenario-driven testing for the koe-rules engine.
//!
//! Scenarios are written as TOML fixtures: a list of contractor and owner
//! actions on one case, and the derived state expected afterwards. The
//! runner replays the actions through the public `Case` API and checks
//! every expectation, so a fixture reads as a worked example of the
//! contract rules.
//!
//! ## Modules
//!
//! - [`fixture`] - Fixture types and TOML parsing
//! - [`loader`] - Loading fixture files from disk
//! - [`runner`] - Replaying fixtures and checking expectations
//! - [`errors`] - Error types for the harness

pub mod errors;
pub mod fixture;
pub mod loader;
pub mod runner;

pub use errors::{SpecError, SpecResult};
pub use fixture::{
    BasisConsequenceExpectation, CompensationConsequenceExpectation, Expectations,
    NextActionExpectation, PointExpectation, ScenarioFixture, Step, StepErrorExpectation,
    TimeConsequenceExpectation, parse_fixture,
};
pub use loader::{load_all_fixtures, load_fixture};
pub use runner::{
    check_expectations, run_and_check, run_fixture, AssertionOutcome, AssertionResult,
    ScenarioResult, ScenarioRun,
};

#[cfg(test)]
mod tests;
