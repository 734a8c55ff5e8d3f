//! One-call assessment of a case snapshot.
//!
//! Runs every derivation in data-flow order and collects the results in a
//! serializable [`CaseAssessment`]:
//!
//! ```text
//! Case ─► category flags ─► preclusion ─► compliance matrix
//!                                    └──► subsidiary tracks
//!     └─► track statuses ─► case status / next action
//!     └─► rejected days ──► acceleration ceiling
//! ```

use serde::Serialize;
use uuid::Uuid;

use crate::acceleration::AccelerationAssessment;
use crate::case::Case;
use crate::category::CategoryFlags;
use crate::compliance::ComplianceMatrix;
use crate::config::ProjectConfig;
use crate::error::EngineResult;
use crate::preclusion::{evaluate_case, PreclusionReport};
use crate::status::{CaseStatus, NextAction, TrackStatuses};
use crate::track::TrackKind;

/// Everything the engine derives for a case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseAssessment {
    pub case_id: Uuid,
    pub flags: CategoryFlags,
    pub status: CaseStatus,
    pub track_statuses: TrackStatuses,
    pub can_issue_change_order: bool,
    pub next_action: Option<NextAction>,
    pub preclusion: PreclusionReport,
    pub compliance: ComplianceMatrix,
    pub subsidiary_tracks: Vec<TrackKind>,
    /// Present when the owner has refused days on the time track.
    pub acceleration: Option<AccelerationAssessment>,
}

impl CaseAssessment {
    /// Pretty-printed JSON for audit logs.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Assess a case under the project configuration.
pub fn assess_case(case: &Case, config: &ProjectConfig) -> EngineResult<CaseAssessment> {
    let preclusion = evaluate_case(case, config.notice_grace_days);
    let compliance = ComplianceMatrix::from_report(&preclusion);
    let track_statuses = case.track_statuses();
    let acceleration = case.acceleration_assessment(config.daily_liquidated_damages)?;

    let assessment = CaseAssessment {
        case_id: case.id,
        flags: case.flags(),
        status: track_statuses.aggregate(),
        track_statuses,
        can_issue_change_order: case.can_issue_change_order(),
        next_action: track_statuses.next_action(),
        preclusion,
        compliance,
        subsidiary_tracks: case.subsidiary_tracks(),
        acceleration,
    };
    tracing::debug!(
        case = %case.id,
        status = ?assessment.status,
        has_missing = assessment.compliance.has_missing,
        has_objection = assessment.compliance.has_objection,
        "assessed case"
    );
    Ok(assessment)
}
