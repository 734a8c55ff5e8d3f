//! The case aggregate: one basis track, one compensation track, one time
//! track and an optional acceleration.
//!
//! Status, change-order readiness and the next action are derived on every
//! call and never stored. The lifecycle helpers validate the transition and
//! leave the case untouched when they fail.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::acceleration::{self, Acceleration, AccelerationAssessment};
use crate::category::{Category, CategoryFlags, MainCategory};
use crate::consequence::{
    compensation_outcome, time_outcome, BasisContext, CompensationContext, SubsidiaryOutcome,
    TimeContext,
};
use crate::error::{EngineError, EngineResult};
use crate::preclusion::NotificationPoint;
use crate::promotion::{is_reversal, resolve_promotion, PromotionBundle};
use crate::status::{CaseStatus, NextAction, TrackStatuses};
use crate::track::{
    BasisClaim, BasisResponse, BasisTrack, BasisVerdict, CompensationClaim, CompensationResponse,
    CompensationTrack, TimeClaim, TimeResponse, TimeTrack, TimeVerdict, TrackKind, TrackStatus,
};

/// A change claim (krav om endring) with its three tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// Number of recorded events.
    pub event_count: u64,
    pub basis: BasisTrack,
    pub compensation: CompensationTrack,
    pub time: TimeTrack,
    #[serde(default)]
    pub acceleration: Option<Acceleration>,
}

impl Case {
    /// A new, empty case with a random id.
    pub fn new(title: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), title, at)
    }

    pub fn with_id(id: Uuid, title: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            created_at: at,
            last_activity: at,
            event_count: 0,
            basis: BasisTrack::new(TrackKind::Basis),
            compensation: CompensationTrack::new(TrackKind::Compensation),
            time: TimeTrack::new(TrackKind::Time),
            acceleration: None,
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.last_activity = at;
        self.event_count += 1;
    }

    // ========================================================================
    // Classification
    // ========================================================================

    /// The category fixed by the first basis submission.
    pub fn category(&self) -> Option<&Category> {
        self.basis
            .claims
            .first()
            .map(|entry| &entry.value.category)
    }

    /// Flags of the case category; all false before the basis is submitted.
    pub fn flags(&self) -> CategoryFlags {
        self.category().map(Category::flags).unwrap_or_default()
    }

    /// The basis is finally approved (approved or locked).
    pub fn basis_approved(&self) -> bool {
        matches!(
            self.basis.status(),
            TrackStatus::Approved | TrackStatus::Locked
        )
    }

    pub fn is_subsidiary(&self, kind: TrackKind) -> bool {
        let basis_approved = self.basis_approved();
        match kind {
            TrackKind::Basis => false,
            TrackKind::Compensation => self.compensation.is_subsidiary(basis_approved),
            TrackKind::Time => self.time.is_subsidiary(basis_approved),
        }
    }

    /// Dependent tracks currently answered conditionally.
    pub fn subsidiary_tracks(&self) -> Vec<TrackKind> {
        [TrackKind::Compensation, TrackKind::Time]
            .into_iter()
            .filter(|kind| self.is_subsidiary(*kind))
            .collect()
    }

    // ========================================================================
    // Contractor operations
    // ========================================================================

    /// Submit or revise the basis claim.
    pub fn submit_basis_claim(&mut self, claim: BasisClaim, at: DateTime<Utc>) -> EngineResult<u32> {
        if let Some(category) = self.category() {
            if *category != claim.category {
                return Err(EngineError::CategoryLocked);
            }
        }
        let revision = self.basis.submit(claim, at)?;
        self.touch(at);
        Ok(revision)
    }

    fn ensure_basis_open(&self, kind: TrackKind) -> EngineResult<()> {
        if !self.basis.is_submitted() {
            return Err(EngineError::BasisNotSubmitted(kind));
        }
        if self.basis.withdrawn || self.basis.locked {
            return Err(EngineError::TrackClosed(TrackKind::Basis));
        }
        Ok(())
    }

    /// Submit or revise the compensation claim.
    pub fn submit_compensation_claim(
        &mut self,
        claim: CompensationClaim,
        at: DateTime<Utc>,
    ) -> EngineResult<u32> {
        self.ensure_basis_open(TrackKind::Compensation)?;
        if self.flags().is_force_majeure {
            return Err(EngineError::CompensationUnavailable);
        }
        let revision = self.compensation.submit(claim, at)?;
        self.touch(at);
        Ok(revision)
    }

    /// Submit or revise the time claim.
    pub fn submit_time_claim(&mut self, claim: TimeClaim, at: DateTime<Utc>) -> EngineResult<u32> {
        self.ensure_basis_open(TrackKind::Time)?;
        let revision = self.time.submit(claim, at)?;
        self.touch(at);
        Ok(revision)
    }

    /// Withdraw a track. Withdrawing the basis withdraws the whole case.
    pub fn withdraw(&mut self, kind: TrackKind, at: DateTime<Utc>) -> EngineResult<()> {
        match kind {
            TrackKind::Basis => {
                let mut next = self.clone();
                next.basis.withdraw(at)?;
                if !next.compensation.locked && !next.compensation.withdrawn {
                    next.compensation.withdraw(at)?;
                }
                if !next.time.locked && !next.time.withdrawn {
                    next.time.withdraw(at)?;
                }
                next.touch(at);
                *self = next;
            }
            TrackKind::Compensation => {
                self.compensation.withdraw(at)?;
                self.touch(at);
            }
            TrackKind::Time => {
                self.time.withdraw(at)?;
                self.touch(at);
            }
        }
        tracing::debug!(case = %self.id, track = %kind, "track withdrawn");
        Ok(())
    }

    // ========================================================================
    // Owner operations
    // ========================================================================

    /// Record the owner's basis response and apply any reversal promotion.
    ///
    /// The response and the promotion land together: on error the case is
    /// unchanged.
    pub fn record_basis_response(
        &mut self,
        response: BasisResponse,
        at: DateTime<Utc>,
    ) -> EngineResult<PromotionBundle> {
        let category = match self.category() {
            Some(category) => category.clone(),
            None => return Err(EngineError::NothingToAnswer(TrackKind::Basis)),
        };
        let previous = self
            .basis
            .latest_response()
            .map(|previous| previous.effective_verdict(&category));
        let plan = resolve_promotion(
            previous,
            response.effective_verdict(&category),
            self.is_subsidiary(TrackKind::Compensation),
            self.is_subsidiary(TrackKind::Time),
        );

        let mut next = self.clone();
        let basis_revision = next.basis.respond(response, at)?;
        let mut cleared = BTreeMap::new();
        for kind in &plan.promote {
            let triggers = match kind {
                TrackKind::Compensation => next.compensation.clear_triggers(),
                TrackKind::Time => next.time.clear_triggers(),
                TrackKind::Basis => continue,
            };
            cleared.insert(*kind, triggers);
        }
        next.touch(at);
        *self = next;

        tracing::debug!(
            case = %self.id,
            basis_revision,
            is_reversal = plan.is_reversal,
            promoted = plan.promote.len(),
            "recorded basis response"
        );
        Ok(PromotionBundle {
            plan,
            basis_revision,
            cleared,
        })
    }

    pub fn record_compensation_response(
        &mut self,
        response: CompensationResponse,
        at: DateTime<Utc>,
    ) -> EngineResult<u32> {
        let revision = self.compensation.respond(response, at)?;
        self.touch(at);
        Ok(revision)
    }

    pub fn record_time_response(
        &mut self,
        response: TimeResponse,
        at: DateTime<Utc>,
    ) -> EngineResult<u32> {
        let revision = self.time.respond(response, at)?;
        self.touch(at);
        Ok(revision)
    }

    /// Issue the change order (endringsordre) and lock every track.
    pub fn issue_change_order(&mut self, at: DateTime<Utc>) -> EngineResult<()> {
        if !self.can_issue_change_order() {
            tracing::warn!(case = %self.id, status = ?self.status(), "change order refused");
            return Err(EngineError::NotReadyForChangeOrder);
        }
        self.basis.lock(at);
        self.compensation.lock(at);
        self.time.lock(at);
        self.touch(at);
        Ok(())
    }

    /// Declare or update the contractor's acceleration.
    pub fn set_acceleration(&mut self, acceleration: Acceleration, at: DateTime<Utc>) {
        self.acceleration = Some(acceleration);
        self.touch(at);
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    pub fn track_statuses(&self) -> TrackStatuses {
        TrackStatuses::new(
            self.basis.status(),
            self.compensation.status(),
            self.time.status(),
        )
        .with_force_majeure(self.flags().is_force_majeure)
        .with_claim_withdrawn(self.basis.withdrawn)
    }

    pub fn status(&self) -> CaseStatus {
        self.track_statuses().aggregate()
    }

    /// Ready for a change order that has not been issued yet.
    pub fn can_issue_change_order(&self) -> bool {
        self.status() == CaseStatus::ReadyForChangeOrder && !self.basis.locked
    }

    pub fn next_action(&self) -> Option<NextAction> {
        self.track_statuses().next_action()
    }

    /// Days refused by the owner's answer to the latest time claim.
    pub fn rejected_days(&self) -> u32 {
        let requested = self
            .time
            .latest_claim()
            .and_then(|claim| claim.days)
            .unwrap_or(0);
        match self.time.current_response() {
            Some(response) => match response.verdict {
                TimeVerdict::Rejected => requested,
                TimeVerdict::PartiallyApproved => {
                    requested.saturating_sub(response.approved_days.unwrap_or(0))
                }
                TimeVerdict::Approved => 0,
            },
            None => 0,
        }
    }

    /// The 30% check for this case, or `None` when no days were refused.
    pub fn acceleration_assessment(
        &self,
        daily_rate: Decimal,
    ) -> EngineResult<Option<AccelerationAssessment>> {
        let days = i64::from(self.rejected_days());
        if days == 0 {
            return Ok(None);
        }
        let estimate = self
            .acceleration
            .as_ref()
            .filter(|acceleration| acceleration.declared)
            .and_then(|acceleration| acceleration.estimated_cost);
        let assessment = match estimate {
            Some(estimate) => acceleration::assess(daily_rate, days, estimate)?,
            None => acceleration::ceiling_only(daily_rate, days)?,
        };
        Ok(Some(assessment))
    }

    // ========================================================================
    // Narrator inputs
    // ========================================================================

    /// Conditional outcomes of the dependent tracks, for reversal text.
    pub fn subsidiary_outcomes(&self) -> Vec<SubsidiaryOutcome> {
        let mut outcomes = Vec::new();
        if self.is_subsidiary(TrackKind::Compensation) {
            if let Some(response) = self.compensation.latest_response() {
                outcomes.push(SubsidiaryOutcome {
                    track: TrackKind::Compensation,
                    outcome: compensation_outcome(response, self.compensation.latest_claim()),
                });
            }
        }
        if self.is_subsidiary(TrackKind::Time) {
            if let Some(response) = self.time.latest_response() {
                outcomes.push(SubsidiaryOutcome {
                    track: TrackKind::Time,
                    outcome: time_outcome(response, self.time.latest_claim()),
                });
            }
        }
        outcomes
    }

    /// Narrator input for a proposed basis response.
    pub fn basis_context(&self, proposed: &BasisResponse) -> BasisContext {
        let category = self
            .category()
            .cloned()
            .unwrap_or_else(|| Category::new(MainCategory::Unrecognized, Vec::new()));
        let previous: Option<BasisVerdict> = self
            .basis
            .latest_response()
            .map(|previous| previous.effective_verdict(&category));
        BasisContext {
            verdict: Some(proposed.verdict),
            flags: category.flags(),
            precluded: proposed.objections.contains(&NotificationPoint::BasisNotice),
            is_reversal: is_reversal(previous, proposed.effective_verdict(&category)),
            subsidiary_outcomes: self.subsidiary_outcomes(),
        }
    }

    /// Narrator input for a proposed time response.
    pub fn time_context(&self, proposed: &TimeResponse) -> TimeContext {
        TimeContext {
            verdict: Some(proposed.verdict),
            precluded: proposed.objections.contains(&NotificationPoint::NeutralTimeNotice)
                || proposed.objections.contains(&NotificationPoint::ItemizedTimeNotice),
            subsidiary: !proposed.triggers.is_empty() && !self.basis_approved(),
            requested_days: self.time.latest_claim().and_then(|claim| claim.days),
            approved_days: proposed.approved_days,
        }
    }

    /// Narrator input for a proposed compensation response.
    pub fn compensation_context(&self, proposed: &CompensationResponse) -> CompensationContext {
        let claim = self.compensation.latest_claim();
        let claimed_method = claim.map(|claim| claim.method);
        CompensationContext {
            verdict: Some(proposed.verdict),
            method_changed: proposed
                .method
                .map_or(false, |method| Some(method) != claimed_method),
            subsidiary: !proposed.triggers.is_empty() && !self.basis_approved(),
            requested_amount: claim.map(|claim| claim.amount),
            approved_amount: proposed.approved_amount,
            approved_method: proposed.method.or(claimed_method),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Role;
    use crate::track::{CompensationVerdict, Notice, SettlementMethod, SubsidiaryTrigger};
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, day, 12, 0, 0).unwrap()
    }

    fn basis_claim(main: &str, sub: &str) -> BasisClaim {
        BasisClaim {
            category: Category::from_codes(main, &[sub]),
            description: "Pålegg om omprosjektering av dekke".into(),
            discovered_on: None,
            notice: Notice::default(),
        }
    }

    fn basis_response(verdict: BasisVerdict) -> BasisResponse {
        BasisResponse {
            verdict,
            rationale: String::new(),
            objections: Default::default(),
        }
    }

    fn compensation_claim(amount: i64) -> CompensationClaim {
        CompensationClaim {
            amount: Decimal::new(amount, 0),
            method: SettlementMethod::UnitPrices,
            site_overhead: None,
            productivity: None,
            main_notice: Notice::default(),
            site_overhead_notice: Notice::default(),
            productivity_notice: Notice::default(),
        }
    }

    fn compensation_response(verdict: CompensationVerdict, subsidiary: bool) -> CompensationResponse {
        CompensationResponse {
            verdict,
            approved_amount: None,
            method: None,
            rationale: String::new(),
            objections: Default::default(),
            triggers: if subsidiary {
                [SubsidiaryTrigger::BasisRejected].into_iter().collect()
            } else {
                Default::default()
            },
        }
    }

    fn time_claim(days: u32) -> TimeClaim {
        TimeClaim {
            days: Some(days),
            neutral_notice: Notice::default(),
            itemized_notice: Notice::default(),
        }
    }

    fn time_response(verdict: TimeVerdict, approved_days: Option<u32>) -> TimeResponse {
        TimeResponse {
            verdict,
            approved_days,
            rationale: String::new(),
            objections: Default::default(),
            triggers: Default::default(),
        }
    }

    fn submitted_case() -> Case {
        let mut case = Case::new("Omprosjektering", at(1));
        case.submit_basis_claim(basis_claim("ENDRING", "IRREG"), at(1)).unwrap();
        case
    }

    #[test]
    fn new_case_is_draft_with_no_flags() {
        let case = Case::new("Tom sak", at(1));
        assert_eq!(case.status(), CaseStatus::Draft);
        assert_eq!(case.flags(), CategoryFlags::default());
        assert_eq!(case.event_count, 0);
    }

    #[test]
    fn dependent_claims_need_basis() {
        let mut case = Case::new("Sak", at(1));
        assert_eq!(
            case.submit_time_claim(time_claim(5), at(2)).unwrap_err(),
            EngineError::BasisNotSubmitted(TrackKind::Time)
        );
        assert_eq!(case.event_count, 0);
    }

    #[test]
    fn category_is_fixed_after_first_submission() {
        let mut case = submitted_case();
        let err = case
            .submit_basis_claim(basis_claim("SVIKT", "MEDVIRK"), at(2))
            .unwrap_err();
        assert_eq!(err, EngineError::CategoryLocked);
        assert_eq!(case.basis.revision, 1);
        case.submit_basis_claim(basis_claim("ENDRING", "IRREG"), at(2)).unwrap();
        assert_eq!(case.basis.revision, 2);
    }

    #[test]
    fn force_majeure_has_no_compensation() {
        let mut case = Case::new("Storm", at(1));
        case.submit_basis_claim(basis_claim("FORCE_MAJEURE", "FM_EGEN"), at(1)).unwrap();
        assert_eq!(
            case.submit_compensation_claim(compensation_claim(1000), at(2)).unwrap_err(),
            EngineError::CompensationUnavailable
        );
    }

    #[test]
    fn reversal_promotes_and_clears_triggers_atomically() {
        let mut case = submitted_case();
        case.submit_compensation_claim(compensation_claim(120_000), at(2)).unwrap();
        case.submit_time_claim(time_claim(10), at(2)).unwrap();
        case.record_basis_response(basis_response(BasisVerdict::Rejected), at(3)).unwrap();
        case.record_compensation_response(
            compensation_response(CompensationVerdict::Approved, true),
            at(3),
        )
        .unwrap();
        case.record_time_response(time_response(TimeVerdict::Approved, None), at(3))
            .unwrap();
        assert_eq!(case.subsidiary_tracks(), vec![TrackKind::Compensation]);

        let bundle = case
            .record_basis_response(basis_response(BasisVerdict::Approved), at(4))
            .unwrap();
        assert!(bundle.plan.is_reversal);
        assert_eq!(bundle.plan.promote, [TrackKind::Compensation].into_iter().collect());
        assert_eq!(
            bundle.cleared[&TrackKind::Compensation],
            [SubsidiaryTrigger::BasisRejected].into_iter().collect()
        );
        assert!(!case.compensation.has_triggers());
        assert!(case.subsidiary_tracks().is_empty());
        assert_eq!(case.status(), CaseStatus::ReadyForChangeOrder);
    }

    #[test]
    fn failed_basis_response_leaves_case_unchanged() {
        let mut case = submitted_case();
        case.withdraw(TrackKind::Basis, at(2)).unwrap();
        let before = case.clone();
        let err = case
            .record_basis_response(basis_response(BasisVerdict::Approved), at(3))
            .unwrap_err();
        assert_eq!(err, EngineError::TrackClosed(TrackKind::Basis));
        assert_eq!(case, before);
    }

    #[test]
    fn withdrawing_basis_closes_case() {
        let mut case = submitted_case();
        case.submit_time_claim(time_claim(4), at(2)).unwrap();
        case.withdraw(TrackKind::Basis, at(3)).unwrap();
        assert_eq!(case.time.status(), TrackStatus::Withdrawn);
        assert_eq!(case.compensation.status(), TrackStatus::Withdrawn);
        assert_eq!(case.status(), CaseStatus::Agreed);
        assert_eq!(case.next_action(), None);
        assert_eq!(
            case.submit_time_claim(time_claim(2), at(4)).unwrap_err(),
            EngineError::TrackClosed(TrackKind::Basis)
        );
    }

    #[test]
    fn change_order_locks_tracks() {
        let mut case = submitted_case();
        assert_eq!(
            case.issue_change_order(at(2)).unwrap_err(),
            EngineError::NotReadyForChangeOrder
        );
        case.record_basis_response(basis_response(BasisVerdict::Approved), at(2)).unwrap();
        case.submit_compensation_claim(compensation_claim(80_000), at(2)).unwrap();
        case.submit_time_claim(time_claim(6), at(2)).unwrap();
        case.record_compensation_response(
            compensation_response(CompensationVerdict::Approved, false),
            at(3),
        )
        .unwrap();
        assert!(!case.can_issue_change_order());
        case.record_time_response(time_response(TimeVerdict::Approved, None), at(3))
            .unwrap();
        assert!(case.can_issue_change_order());
        case.issue_change_order(at(3)).unwrap();
        assert!(case.basis.locked && case.compensation.locked && case.time.locked);
        assert_eq!(case.status(), CaseStatus::ReadyForChangeOrder);
        assert!(!case.can_issue_change_order());
        assert_eq!(case.next_action(), None);
    }

    #[test]
    fn approved_basis_alone_is_not_ready() {
        let mut case = submitted_case();
        case.record_basis_response(basis_response(BasisVerdict::Approved), at(2)).unwrap();
        assert_eq!(case.status(), CaseStatus::UnderReview);
        assert!(!case.can_issue_change_order());
        assert_eq!(
            case.issue_change_order(at(3)).unwrap_err(),
            EngineError::NotReadyForChangeOrder
        );
        let next = case.next_action().unwrap();
        assert_eq!(next.role, Role::Te);
        assert_eq!(next.owning_track, Some(TrackKind::Compensation));
        case.submit_compensation_claim(compensation_claim(10_000), at(4)).unwrap();
    }

    #[test]
    fn force_majeure_is_ready_with_time_alone() {
        let mut case = Case::new("Storm", at(1));
        case.submit_basis_claim(basis_claim("FORCE_MAJEURE", "FM_EGEN"), at(1)).unwrap();
        case.record_basis_response(basis_response(BasisVerdict::Approved), at(2)).unwrap();
        assert_eq!(case.status(), CaseStatus::UnderReview);
        case.submit_time_claim(time_claim(5), at(3)).unwrap();
        case.record_time_response(time_response(TimeVerdict::Approved, None), at(4))
            .unwrap();
        assert!(case.can_issue_change_order());
    }

    #[test]
    fn withdrawn_instruction_leaves_compensation_for_owner() {
        let mut case = Case::new("Stans", at(1));
        case.submit_basis_claim(basis_claim("ENDRING", "IRREG"), at(1)).unwrap();
        case.record_basis_response(basis_response(BasisVerdict::InstructionWithdrawn), at(2))
            .unwrap();
        assert_eq!(case.basis.status(), TrackStatus::Withdrawn);
        case.submit_compensation_claim(compensation_claim(15_000), at(3)).unwrap();

        assert_eq!(case.status(), CaseStatus::UnderReview);
        let next = case.next_action().unwrap();
        assert_eq!(next.role, Role::Bh);
        assert_eq!(next.owning_track, Some(TrackKind::Compensation));
    }

    #[test]
    fn rejected_days_follow_latest_answer() {
        let mut case = submitted_case();
        case.submit_time_claim(time_claim(20), at(2)).unwrap();
        assert_eq!(case.rejected_days(), 0);
        case.record_time_response(time_response(TimeVerdict::PartiallyApproved, Some(12)), at(3))
            .unwrap();
        assert_eq!(case.rejected_days(), 8);
        case.record_time_response(time_response(TimeVerdict::Rejected, None), at(4))
            .unwrap();
        assert_eq!(case.rejected_days(), 20);

        case.submit_time_claim(time_claim(15), at(5)).unwrap();
        assert_eq!(case.rejected_days(), 0);
    }

    #[test]
    fn acceleration_is_gated_on_rejected_days() {
        let mut case = submitted_case();
        case.submit_time_claim(time_claim(10), at(2)).unwrap();
        assert_eq!(case.acceleration_assessment(Decimal::new(10_000, 0)).unwrap(), None);

        case.record_time_response(time_response(TimeVerdict::Rejected, None), at(3))
            .unwrap();
        case.set_acceleration(
            Acceleration {
                declared: true,
                estimated_cost: Some(Decimal::new(25_000, 0)),
                ..Default::default()
            },
            at(4),
        );
        let assessment = case
            .acceleration_assessment(Decimal::new(10_000, 0))
            .unwrap()
            .unwrap();
        assert_eq!(assessment.cost_ceiling, Decimal::new(30_000, 0));
        assert!(assessment.within_ceiling);
    }

    #[test]
    fn compensation_context_detects_method_change() {
        let mut case = submitted_case();
        case.submit_compensation_claim(compensation_claim(50_000), at(2)).unwrap();
        let mut proposed = compensation_response(CompensationVerdict::Approved, false);
        proposed.method = Some(SettlementMethod::UnitPrices);
        assert!(!case.compensation_context(&proposed).method_changed);
        proposed.method = Some(SettlementMethod::CostPlus);
        let context = case.compensation_context(&proposed);
        assert!(context.method_changed);
        assert_eq!(context.requested_amount, Some(Decimal::new(50_000, 0)));
    }

    #[test]
    fn events_are_counted() {
        let mut case = submitted_case();
        case.submit_time_claim(time_claim(3), at(2)).unwrap();
        assert_eq!(case.event_count, 2);
        assert_eq!(case.last_activity, at(2));
    }
}
