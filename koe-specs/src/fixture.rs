//! Scenario fixture types.
//!
//! A fixture is a TOML file describing a sequence of contractor and owner
//! actions on one case, followed by the derived state expected at the end:
//!
//! ```toml
//! title = "Time-barred approval"
//!
//! [[steps]]
//! action = "submit_basis"
//! on = "2025-04-20"
//! main = "ENDRING"
//! subs = ["IRREG"]
//! notice_on = "2025-04-20"
//!
//! [expect]
//! status = "under_negotiation"
//! ```

use chrono::NaiveDate;
use koe_rules::{
    BasisVerdict, CaseStatus, CompensationVerdict, NotificationPoint, PointStatus, ProjectConfig,
    Role, SettlementMethod, Severity, SubsidiaryTrigger, TimeVerdict, TrackKind,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::{SpecError, SpecResult};

/// A parsed scenario file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioFixture {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub config: ProjectConfig,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub expect: Expectations,
}

/// One action applied to the case. Dates are `YYYY-MM-DD` strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    SubmitBasis {
        on: NaiveDate,
        main: String,
        #[serde(default)]
        subs: Vec<String>,
        #[serde(default)]
        description: String,
        #[serde(default)]
        discovered_on: Option<NaiveDate>,
        #[serde(default)]
        notice_on: Option<NaiveDate>,
    },
    SubmitCompensation {
        on: NaiveDate,
        amount: Decimal,
        #[serde(default)]
        method: Option<SettlementMethod>,
        #[serde(default)]
        site_overhead: Option<Decimal>,
        #[serde(default)]
        productivity: Option<Decimal>,
        #[serde(default)]
        main_notice_on: Option<NaiveDate>,
        #[serde(default)]
        site_overhead_notice_on: Option<NaiveDate>,
        #[serde(default)]
        productivity_notice_on: Option<NaiveDate>,
    },
    SubmitTime {
        on: NaiveDate,
        #[serde(default)]
        days: Option<u32>,
        #[serde(default)]
        neutral_notice_on: Option<NaiveDate>,
        #[serde(default)]
        itemized_notice_on: Option<NaiveDate>,
    },
    RespondBasis {
        on: NaiveDate,
        verdict: BasisVerdict,
        #[serde(default)]
        objections: Vec<NotificationPoint>,
    },
    RespondCompensation {
        on: NaiveDate,
        verdict: CompensationVerdict,
        #[serde(default)]
        approved_amount: Option<Decimal>,
        #[serde(default)]
        method: Option<SettlementMethod>,
        #[serde(default)]
        objections: Vec<NotificationPoint>,
        #[serde(default)]
        triggers: Vec<SubsidiaryTrigger>,
    },
    RespondTime {
        on: NaiveDate,
        verdict: TimeVerdict,
        #[serde(default)]
        approved_days: Option<u32>,
        #[serde(default)]
        objections: Vec<NotificationPoint>,
        #[serde(default)]
        triggers: Vec<SubsidiaryTrigger>,
    },
    Withdraw {
        on: NaiveDate,
        track: TrackKind,
    },
    IssueChangeOrder {
        on: NaiveDate,
    },
    Accelerate {
        on: NaiveDate,
        #[serde(default)]
        estimated_cost: Option<Decimal>,
    },
}

impl Step {
    /// The action tag, as written in the fixture.
    pub fn action(&self) -> &'static str {
        match self {
            Step::SubmitBasis { .. } => "submit_basis",
            Step::SubmitCompensation { .. } => "submit_compensation",
            Step::SubmitTime { .. } => "submit_time",
            Step::RespondBasis { .. } => "respond_basis",
            Step::RespondCompensation { .. } => "respond_compensation",
            Step::RespondTime { .. } => "respond_time",
            Step::Withdraw { .. } => "withdraw",
            Step::IssueChangeOrder { .. } => "issue_change_order",
            Step::Accelerate { .. } => "accelerate",
        }
    }

    pub fn on(&self) -> NaiveDate {
        match self {
            Step::SubmitBasis { on, .. }
            | Step::SubmitCompensation { on, .. }
            | Step::SubmitTime { on, .. }
            | Step::RespondBasis { on, .. }
            | Step::RespondCompensation { on, .. }
            | Step::RespondTime { on, .. }
            | Step::Withdraw { on, .. }
            | Step::IssueChangeOrder { on }
            | Step::Accelerate { on, .. } => *on,
        }
    }
}

/// Derived state expected after the last step. Unset fields are not checked.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Expectations {
    #[serde(default)]
    pub status: Option<CaseStatus>,
    #[serde(default)]
    pub can_issue_change_order: Option<bool>,
    #[serde(default)]
    pub subsidiary_tracks: Option<Vec<TrackKind>>,
    /// Tracks promoted by the last basis response.
    #[serde(default)]
    pub promoted: Option<Vec<TrackKind>>,
    #[serde(default)]
    pub rejected_days: Option<u32>,
    #[serde(default)]
    pub acceleration_ceiling: Option<Decimal>,
    #[serde(default)]
    pub within_ceiling: Option<bool>,
    #[serde(default)]
    pub next_action: Option<NextActionExpectation>,
    #[serde(default)]
    pub points: Vec<PointExpectation>,
    /// Steps expected to fail, by 1-based step number.
    #[serde(default)]
    pub step_errors: Vec<StepErrorExpectation>,
    #[serde(default)]
    pub basis_consequence: Vec<BasisConsequenceExpectation>,
    #[serde(default)]
    pub compensation_consequence: Vec<CompensationConsequenceExpectation>,
    #[serde(default)]
    pub time_consequence: Vec<TimeConsequenceExpectation>,
}

/// `none = true` expects no action at all.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NextActionExpectation {
    #[serde(default)]
    pub none: bool,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub track: Option<TrackKind>,
    #[serde(default)]
    pub contains: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PointExpectation {
    pub point: NotificationPoint,
    pub status: PointStatus,
    #[serde(default)]
    pub late: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StepErrorExpectation {
    pub step: usize,
    /// Substring of the error message.
    pub contains: String,
}

/// Narrate a proposed basis response against the final case.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasisConsequenceExpectation {
    pub verdict: BasisVerdict,
    #[serde(default)]
    pub objections: Vec<NotificationPoint>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub contains: Vec<String>,
    #[serde(default)]
    pub reversal: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompensationConsequenceExpectation {
    pub verdict: CompensationVerdict,
    #[serde(default)]
    pub approved_amount: Option<Decimal>,
    #[serde(default)]
    pub method: Option<SettlementMethod>,
    #[serde(default)]
    pub triggers: Vec<SubsidiaryTrigger>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub contains: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeConsequenceExpectation {
    pub verdict: TimeVerdict,
    #[serde(default)]
    pub approved_days: Option<u32>,
    #[serde(default)]
    pub objections: Vec<NotificationPoint>,
    #[serde(default)]
    pub triggers: Vec<SubsidiaryTrigger>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub contains: Vec<String>,
}

/// Parse a fixture from TOML text.
pub fn parse_fixture(content: &str) -> SpecResult<ScenarioFixture> {
    parse_fixture_at(content, "<inline>")
}

pub(crate) fn parse_fixture_at(content: &str, path: &str) -> SpecResult<ScenarioFixture> {
    toml::from_str(content).map_err(|e| SpecError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })
}
