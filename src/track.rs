//! The three parallel claim lanes: basis, compensation and time.
//!
//! A [`Track`] holds append-only histories of contractor claims and owner
//! responses. Nothing is ever removed; a new revision supersedes the previous
//! one and bumps the revision counter. The track status is derived from the
//! latest claim and the latest response through the [`Claim`] trait, never
//! stored.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::{EngineError, EngineResult};
use crate::preclusion::NotificationPoint;

// ============================================================================
// Track identity and status
// ============================================================================

/// Identifies one of the three claim lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    /// Grunnlag.
    Basis,
    /// Vederlag.
    Compensation,
    /// Frist.
    Time,
}

impl TrackKind {
    /// Norwegian display label.
    pub fn label(&self) -> &'static str {
        match self {
            TrackKind::Basis => "grunnlag",
            TrackKind::Compensation => "vederlag",
            TrackKind::Time => "frist",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrackKind::Basis => "basis",
            TrackKind::Compensation => "compensation",
            TrackKind::Time => "time",
        })
    }
}

/// Status of a single track, in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackStatus {
    Draft,
    Submitted,
    UnderReview,
    Approved,
    PartiallyApproved,
    Rejected,
    Withdrawn,
    Locked,
    NotApplicable,
    AwaitingSpecification,
}

impl TrackStatus {
    /// Every status, in declaration order.
    pub const ALL: [TrackStatus; 10] = [
        TrackStatus::Draft,
        TrackStatus::Submitted,
        TrackStatus::UnderReview,
        TrackStatus::Approved,
        TrackStatus::PartiallyApproved,
        TrackStatus::Rejected,
        TrackStatus::Withdrawn,
        TrackStatus::Locked,
        TrackStatus::NotApplicable,
        TrackStatus::AwaitingSpecification,
    ];
}

// ============================================================================
// Notices
// ============================================================================

/// Channel a notice was delivered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeMethod {
    Email,
    Letter,
    MeetingMinutes,
    SiteMeeting,
    ProjectPortal,
    Other,
}

/// A notice sent by the contractor. Present iff `sent_on` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Notice {
    /// Date the notice was sent.
    #[serde(default)]
    pub sent_on: Option<NaiveDate>,
    /// Channels used.
    #[serde(default)]
    pub methods: BTreeSet<NoticeMethod>,
}

impl Notice {
    /// A notice sent on `date` through the given channels.
    pub fn sent(date: NaiveDate, methods: impl IntoIterator<Item = NoticeMethod>) -> Self {
        Self {
            sent_on: Some(date),
            methods: methods.into_iter().collect(),
        }
    }

    /// A notice that has not been sent.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_present(&self) -> bool {
        self.sent_on.is_some()
    }
}

// ============================================================================
// Verdicts and subsidiarity
// ============================================================================

/// Owner verdict on the basis track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasisVerdict {
    #[serde(rename = "godkjent")]
    Approved,
    #[serde(rename = "avslatt")]
    Rejected,
    /// The owner withdraws the instruction (§32.3 c).
    #[serde(rename = "frafalt")]
    InstructionWithdrawn,
}

impl BasisVerdict {
    /// Parse a stored verdict code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "godkjent" => Some(BasisVerdict::Approved),
            "avslatt" | "avslått" => Some(BasisVerdict::Rejected),
            "frafalt" => Some(BasisVerdict::InstructionWithdrawn),
            _ => None,
        }
    }
}

/// Owner verdict on the compensation track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompensationVerdict {
    #[serde(rename = "godkjent")]
    Approved,
    #[serde(rename = "delvis_godkjent")]
    PartiallyApproved,
    #[serde(rename = "avslatt")]
    Rejected,
    /// Payment withheld until the contractor provides a cost estimate (§30.2).
    #[serde(rename = "hold_tilbake")]
    Withheld,
}

/// Owner verdict on the time track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeVerdict {
    #[serde(rename = "godkjent")]
    Approved,
    #[serde(rename = "delvis_godkjent")]
    PartiallyApproved,
    #[serde(rename = "avslatt")]
    Rejected,
}

/// Reason a response was issued conditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsidiaryTrigger {
    /// The basis claim is rejected.
    BasisRejected,
    /// The basis notice is objected to as late.
    BasisNoticePrecluded,
    /// The compensation notice (§34.1.2) is objected to as late.
    MainClaimPrecluded,
    /// The site overhead notice (§34.1.3) is objected to as late.
    SiteOverheadPrecluded,
    /// The productivity notice (§34.1.3) is objected to as late.
    ProductivityPrecluded,
    /// The neutral time notice (§33.4) is objected to as late.
    NeutralNoticePrecluded,
    /// The itemized time claim (§33.6.1) is objected to as late.
    ItemizedNoticePrecluded,
    /// The itemized time claim is reduced for late specification (§33.6.1).
    ItemizedReduced,
}

impl SubsidiaryTrigger {
    /// Norwegian display label.
    pub fn label(&self) -> &'static str {
        match self {
            SubsidiaryTrigger::BasisRejected => "grunnlaget er avvist",
            SubsidiaryTrigger::BasisNoticePrecluded => "preklusjon av varsel om grunnlag",
            SubsidiaryTrigger::MainClaimPrecluded => "preklusjon av vederlagskravet",
            SubsidiaryTrigger::SiteOverheadPrecluded => "preklusjon av rigg- og driftskrav",
            SubsidiaryTrigger::ProductivityPrecluded => "preklusjon av produktivitetskrav",
            SubsidiaryTrigger::NeutralNoticePrecluded => "preklusjon av nøytralt varsel",
            SubsidiaryTrigger::ItemizedNoticePrecluded => "preklusjon av spesifisert krav",
            SubsidiaryTrigger::ItemizedReduced => "reduksjon av spesifisert krav",
        }
    }
}

/// How a compensation claim is to be settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMethod {
    /// Contract unit prices (§34.3.1).
    UnitPrices,
    /// Adjusted unit prices (§34.3.2).
    AdjustedUnitPrices,
    /// Cost-plus, regningsarbeid (§34.4).
    CostPlus,
    /// Agreed lump sum.
    FixedPrice,
}

impl SettlementMethod {
    /// Norwegian display label.
    pub fn label(&self) -> &'static str {
        match self {
            SettlementMethod::UnitPrices => "kontraktens enhetspriser",
            SettlementMethod::AdjustedUnitPrices => "justerte enhetspriser",
            SettlementMethod::CostPlus => "regningsarbeid",
            SettlementMethod::FixedPrice => "fastpris",
        }
    }
}

// ============================================================================
// Claims and responses
// ============================================================================

/// Contractor claim on the basis track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisClaim {
    pub category: Category,
    /// Free-text description of the entitling circumstance.
    pub description: String,
    /// Date the contractor became aware of the circumstance.
    #[serde(default)]
    pub discovered_on: Option<NaiveDate>,
    #[serde(default)]
    pub notice: Notice,
}

/// Contractor claim on the compensation track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationClaim {
    pub amount: Decimal,
    pub method: SettlementMethod,
    /// Site overhead component, if claimed.
    #[serde(default)]
    pub site_overhead: Option<Decimal>,
    /// Productivity loss component, if claimed.
    #[serde(default)]
    pub productivity: Option<Decimal>,
    #[serde(default)]
    pub main_notice: Notice,
    #[serde(default)]
    pub site_overhead_notice: Notice,
    #[serde(default)]
    pub productivity_notice: Notice,
}

/// Contractor claim on the time track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeClaim {
    /// Requested extension. `None` while only the neutral notice has been given.
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub neutral_notice: Notice,
    #[serde(default)]
    pub itemized_notice: Notice,
}

/// Owner response on the basis track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisResponse {
    pub verdict: BasisVerdict,
    #[serde(default)]
    pub rationale: String,
    /// Notification points the owner objects to as late.
    #[serde(default)]
    pub objections: BTreeSet<NotificationPoint>,
}

/// Owner response on the compensation track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationResponse {
    pub verdict: CompensationVerdict,
    #[serde(default)]
    pub approved_amount: Option<Decimal>,
    /// Settlement method the owner approves under, if it differs from the claim.
    #[serde(default)]
    pub method: Option<SettlementMethod>,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub objections: BTreeSet<NotificationPoint>,
    #[serde(default)]
    pub triggers: BTreeSet<SubsidiaryTrigger>,
}

/// Owner response on the time track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeResponse {
    pub verdict: TimeVerdict,
    #[serde(default)]
    pub approved_days: Option<u32>,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub objections: BTreeSet<NotificationPoint>,
    #[serde(default)]
    pub triggers: BTreeSet<SubsidiaryTrigger>,
}

impl BasisResponse {
    /// True when the owner holds the claim time-barred under the category's
    /// notice-timing rule.
    pub fn is_time_barred(&self, category: &Category) -> bool {
        category.flags().notice_timing_applies
            && self.objections.contains(&NotificationPoint::BasisNotice)
    }

    /// The verdict as it stands principally: an approval given despite a
    /// time-bar objection is a rejection with a subsidiary approval.
    pub fn effective_verdict(&self, category: &Category) -> BasisVerdict {
        match self.verdict {
            BasisVerdict::Approved if self.is_time_barred(category) => BasisVerdict::Rejected,
            verdict => verdict,
        }
    }
}

/// Shared view of an owner response.
pub trait OwnerResponse {
    /// Notification points objected to as late.
    fn objections(&self) -> &BTreeSet<NotificationPoint>;

    /// Subsidiarity triggers recorded with the response.
    fn subsidiary_triggers(&self) -> BTreeSet<SubsidiaryTrigger> {
        BTreeSet::new()
    }
}

impl OwnerResponse for BasisResponse {
    fn objections(&self) -> &BTreeSet<NotificationPoint> {
        &self.objections
    }
}

impl OwnerResponse for CompensationResponse {
    fn objections(&self) -> &BTreeSet<NotificationPoint> {
        &self.objections
    }

    fn subsidiary_triggers(&self) -> BTreeSet<SubsidiaryTrigger> {
        self.triggers.clone()
    }
}

impl OwnerResponse for TimeResponse {
    fn objections(&self) -> &BTreeSet<NotificationPoint> {
        &self.objections
    }

    fn subsidiary_triggers(&self) -> BTreeSet<SubsidiaryTrigger> {
        self.triggers.clone()
    }
}

/// Status rules for a claim type.
pub trait Claim {
    type Response: OwnerResponse;

    /// Status while the claim waits for an owner response.
    fn pending_status(&self) -> TrackStatus {
        TrackStatus::Submitted
    }

    /// Status once the owner has answered this claim.
    fn answered_status(&self, response: &Self::Response) -> TrackStatus;
}

impl Claim for BasisClaim {
    type Response = BasisResponse;

    fn answered_status(&self, response: &BasisResponse) -> TrackStatus {
        match response.effective_verdict(&self.category) {
            BasisVerdict::Approved => TrackStatus::Approved,
            BasisVerdict::Rejected => TrackStatus::Rejected,
            BasisVerdict::InstructionWithdrawn => TrackStatus::Withdrawn,
        }
    }
}

impl Claim for CompensationClaim {
    type Response = CompensationResponse;

    fn answered_status(&self, response: &CompensationResponse) -> TrackStatus {
        match response.verdict {
            CompensationVerdict::Approved => TrackStatus::Approved,
            CompensationVerdict::PartiallyApproved => TrackStatus::PartiallyApproved,
            CompensationVerdict::Rejected => TrackStatus::Rejected,
            CompensationVerdict::Withheld => TrackStatus::AwaitingSpecification,
        }
    }
}

impl Claim for TimeClaim {
    type Response = TimeResponse;

    fn pending_status(&self) -> TrackStatus {
        if self.days.is_some() {
            TrackStatus::Submitted
        } else {
            TrackStatus::AwaitingSpecification
        }
    }

    fn answered_status(&self, response: &TimeResponse) -> TrackStatus {
        match response.verdict {
            TimeVerdict::Approved => TrackStatus::Approved,
            TimeVerdict::PartiallyApproved => TrackStatus::PartiallyApproved,
            TimeVerdict::Rejected => TrackStatus::Rejected,
        }
    }
}

// ============================================================================
// Track
// ============================================================================

/// One entry in an append-only history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision<T> {
    /// Track revision counter at the time of recording.
    pub revision: u32,
    pub recorded_at: DateTime<Utc>,
    pub value: T,
}

/// A claim lane with its claim and response histories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>, R: Deserialize<'de>"))]
pub struct Track<C, R> {
    pub kind: TrackKind,
    /// Unsubmitted working copy.
    #[serde(default)]
    pub draft: Option<C>,
    #[serde(default)]
    pub claims: Vec<Revision<C>>,
    #[serde(default)]
    pub responses: Vec<Revision<R>>,
    /// Active subsidiarity triggers from the latest response.
    #[serde(default)]
    pub subsidiary_triggers: BTreeSet<SubsidiaryTrigger>,
    #[serde(default)]
    pub withdrawn: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub revision: u32,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

pub type BasisTrack = Track<BasisClaim, BasisResponse>;
pub type CompensationTrack = Track<CompensationClaim, CompensationResponse>;
pub type TimeTrack = Track<TimeClaim, TimeResponse>;

impl<C, R> Track<C, R> {
    /// An empty track.
    pub fn new(kind: TrackKind) -> Self {
        Self {
            kind,
            draft: None,
            claims: Vec::new(),
            responses: Vec::new(),
            subsidiary_triggers: BTreeSet::new(),
            withdrawn: false,
            locked: false,
            revision: 0,
            last_updated: None,
        }
    }

    /// The latest submitted claim.
    pub fn latest_claim(&self) -> Option<&C> {
        self.claims.last().map(|entry| &entry.value)
    }

    /// The latest owner response, whichever claim revision it answered.
    pub fn latest_response(&self) -> Option<&R> {
        self.responses.last().map(|entry| &entry.value)
    }

    /// The latest response if it answers the latest claim revision.
    pub fn current_response(&self) -> Option<&R> {
        match (self.claims.last(), self.responses.last()) {
            (Some(claim), Some(response)) if response.revision > claim.revision => {
                Some(&response.value)
            }
            _ => None,
        }
    }

    /// True once a claim has been submitted.
    pub fn is_submitted(&self) -> bool {
        !self.claims.is_empty()
    }

    /// True when the track holds at least one subsidiarity trigger.
    pub fn has_triggers(&self) -> bool {
        !self.subsidiary_triggers.is_empty()
    }

    /// Subsidiary iff it holds a trigger and the basis is not finally approved.
    pub fn is_subsidiary(&self, basis_approved: bool) -> bool {
        self.has_triggers() && !basis_approved
    }

    /// Store a working draft without submitting it.
    pub fn save_draft(&mut self, claim: C) {
        self.draft = Some(claim);
    }

    fn ensure_open(&self) -> EngineResult<()> {
        if self.locked || self.withdrawn {
            return Err(EngineError::TrackClosed(self.kind));
        }
        Ok(())
    }

    fn bump(&mut self, at: DateTime<Utc>) -> u32 {
        self.revision += 1;
        self.last_updated = Some(at);
        self.revision
    }

    /// Append a claim revision.
    pub fn submit(&mut self, claim: C, at: DateTime<Utc>) -> EngineResult<u32> {
        self.ensure_open()?;
        let revision = self.bump(at);
        self.draft = None;
        self.claims.push(Revision {
            revision,
            recorded_at: at,
            value: claim,
        });
        Ok(revision)
    }

    /// Mark the track withdrawn by the contractor.
    pub fn withdraw(&mut self, at: DateTime<Utc>) -> EngineResult<()> {
        self.ensure_open()?;
        self.withdrawn = true;
        self.bump(at);
        Ok(())
    }

    /// Lock the track after a change order has been issued.
    pub fn lock(&mut self, at: DateTime<Utc>) {
        if !self.locked {
            self.locked = true;
            self.bump(at);
        }
    }

    /// Clear every subsidiarity trigger, returning what was cleared.
    pub fn clear_triggers(&mut self) -> BTreeSet<SubsidiaryTrigger> {
        std::mem::take(&mut self.subsidiary_triggers)
    }
}

impl<C, R> Track<C, R>
where
    C: Claim<Response = R>,
    R: OwnerResponse,
{
    /// Derived status of the track.
    pub fn status(&self) -> TrackStatus {
        if self.locked {
            return TrackStatus::Locked;
        }
        if self.withdrawn {
            return TrackStatus::Withdrawn;
        }
        let claim = match self.claims.last() {
            Some(claim) => claim,
            None if self.draft.is_some() => return TrackStatus::Draft,
            None => return TrackStatus::NotApplicable,
        };
        match self.responses.last() {
            Some(response) if response.revision > claim.revision => {
                claim.value.answered_status(&response.value)
            }
            Some(_) => match claim.value.pending_status() {
                TrackStatus::Submitted => TrackStatus::UnderReview,
                other => other,
            },
            None => claim.value.pending_status(),
        }
    }

    /// Append an owner response to the latest claim revision.
    ///
    /// The response's subsidiarity triggers replace the track's current set.
    pub fn respond(&mut self, response: R, at: DateTime<Utc>) -> EngineResult<u32> {
        self.ensure_open()?;
        if self.claims.is_empty() {
            return Err(EngineError::NothingToAnswer(self.kind));
        }
        self.subsidiary_triggers = response.subsidiary_triggers();
        let revision = self.bump(at);
        self.responses.push(Revision {
            revision,
            recorded_at: at,
            value: response,
        });
        Ok(revision)
    }

    /// True if the latest response objects to `point`.
    pub fn objects_to(&self, point: NotificationPoint) -> bool {
        self.latest_response()
            .map_or(false, |response| response.objections().contains(&point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap()
    }

    fn time_claim(days: Option<u32>) -> TimeClaim {
        TimeClaim {
            days,
            neutral_notice: Notice::default(),
            itemized_notice: Notice::default(),
        }
    }

    fn time_response(verdict: TimeVerdict) -> TimeResponse {
        TimeResponse {
            verdict,
            approved_days: None,
            rationale: String::new(),
            objections: BTreeSet::new(),
            triggers: BTreeSet::new(),
        }
    }

    #[test]
    fn empty_track_is_not_applicable() {
        let track = TimeTrack::new(TrackKind::Time);
        assert_eq!(track.status(), TrackStatus::NotApplicable);
    }

    #[test]
    fn draft_track_is_draft() {
        let mut track = TimeTrack::new(TrackKind::Time);
        track.save_draft(time_claim(Some(5)));
        assert_eq!(track.status(), TrackStatus::Draft);
    }

    #[test]
    fn neutral_notice_only_awaits_specification() {
        let mut track = TimeTrack::new(TrackKind::Time);
        track.submit(time_claim(None), at(1)).unwrap();
        assert_eq!(track.status(), TrackStatus::AwaitingSpecification);
    }

    #[test]
    fn revised_claim_after_response_is_under_review() {
        let mut track = TimeTrack::new(TrackKind::Time);
        track.submit(time_claim(Some(10)), at(1)).unwrap();
        track.respond(time_response(TimeVerdict::Rejected), at(2)).unwrap();
        assert_eq!(track.status(), TrackStatus::Rejected);

        track.submit(time_claim(Some(8)), at(3)).unwrap();
        assert_eq!(track.status(), TrackStatus::UnderReview);
        assert!(track.current_response().is_none());
        assert_eq!(track.revision, 3);
        assert_eq!(track.last_updated, Some(at(3)));
    }

    #[test]
    fn responding_without_claim_fails() {
        let mut track = TimeTrack::new(TrackKind::Time);
        let err = track.respond(time_response(TimeVerdict::Approved), at(1)).unwrap_err();
        assert_eq!(err, EngineError::NothingToAnswer(TrackKind::Time));
        assert_eq!(track.revision, 0);
    }

    #[test]
    fn response_triggers_replace_previous_set() {
        let mut track = TimeTrack::new(TrackKind::Time);
        track.submit(time_claim(Some(10)), at(1)).unwrap();

        let mut first = time_response(TimeVerdict::Approved);
        first.triggers.insert(SubsidiaryTrigger::BasisRejected);
        track.respond(first, at(2)).unwrap();
        assert!(track.is_subsidiary(false));
        assert!(!track.is_subsidiary(true));

        track.respond(time_response(TimeVerdict::Approved), at(3)).unwrap();
        assert!(!track.has_triggers());
    }

    #[test]
    fn withdrawn_track_rejects_revisions() {
        let mut track = TimeTrack::new(TrackKind::Time);
        track.submit(time_claim(Some(10)), at(1)).unwrap();
        track.withdraw(at(2)).unwrap();
        assert_eq!(track.status(), TrackStatus::Withdrawn);
        assert_eq!(
            track.submit(time_claim(Some(3)), at(3)).unwrap_err(),
            EngineError::TrackClosed(TrackKind::Time)
        );
    }

    #[test]
    fn basis_approval_with_time_bar_is_rejected() {
        let claim = BasisClaim {
            category: Category::from_codes("ENDRING", &["IRREG"]),
            description: "Pålegg om endret fundamentering".into(),
            discovered_on: None,
            notice: Notice::default(),
        };
        let response = BasisResponse {
            verdict: BasisVerdict::Approved,
            rationale: String::new(),
            objections: [NotificationPoint::BasisNotice].into_iter().collect(),
        };
        assert_eq!(claim.answered_status(&response), TrackStatus::Rejected);

        let exempt = BasisClaim {
            category: Category::from_codes("SVIKT", &["MEDVIRK"]),
            ..claim
        };
        assert_eq!(exempt.answered_status(&response), TrackStatus::Approved);
    }

    #[test]
    fn basis_verdict_codes() {
        assert_eq!(BasisVerdict::from_code("avslått"), Some(BasisVerdict::Rejected));
        assert_eq!(BasisVerdict::from_code(" GODKJENT "), Some(BasisVerdict::Approved));
        assert_eq!(BasisVerdict::from_code("delvis"), None);
    }
}
