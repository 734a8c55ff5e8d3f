//! Case-level status aggregation and next-action routing.
//!
//! The aggregated status is a table lookup over the three track statuses.
//! [`CaseStatus`] is only partially ordered: `UnderReview` and
//! `UnderNegotiation` are both "open" and neither ranks above the other.
//! Under that order a track falling back from a terminal accepted state can
//! never raise the aggregated status.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::track::{TrackKind, TrackStatus};

/// Aggregated status of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Draft,
    UnderReview,
    UnderNegotiation,
    Agreed,
    ReadyForChangeOrder,
}

impl CaseStatus {
    fn rank(&self) -> u8 {
        match self {
            CaseStatus::Draft => 0,
            CaseStatus::UnderReview | CaseStatus::UnderNegotiation => 1,
            CaseStatus::Agreed => 2,
            CaseStatus::ReadyForChangeOrder => 3,
        }
    }

    /// Norwegian display label.
    pub fn label(&self) -> &'static str {
        match self {
            CaseStatus::Draft => "Utkast",
            CaseStatus::UnderReview => "Til behandling",
            CaseStatus::UnderNegotiation => "Under forhandling",
            CaseStatus::Agreed => "Omforent",
            CaseStatus::ReadyForChangeOrder => "Klar for endringsordre",
        }
    }
}

impl PartialOrd for CaseStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match self.rank().cmp(&other.rank()) {
            Ordering::Equal => None,
            ordering => Some(ordering),
        }
    }
}

/// Party that owns the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Contractor.
    #[serde(rename = "TE")]
    Te,
    /// Owner.
    #[serde(rename = "BH")]
    Bh,
}

/// The single next required action on a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextAction {
    pub role: Role,
    pub description: String,
    /// `None` for an action spanning several tracks.
    pub owning_track: Option<TrackKind>,
}

impl NextAction {
    fn new(role: Role, description: impl Into<String>, owning_track: Option<TrackKind>) -> Self {
        Self {
            role,
            description: description.into(),
            owning_track,
        }
    }
}

/// Status of each track, with the case facts the aggregation depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackStatuses {
    pub basis: TrackStatus,
    pub compensation: TrackStatus,
    pub time: TrackStatus,
    /// Compensation is excluded by the category (§33.3).
    pub force_majeure: bool,
    /// The contractor has withdrawn the whole claim.
    pub claim_withdrawn: bool,
}

impl TrackStatuses {
    pub fn new(basis: TrackStatus, compensation: TrackStatus, time: TrackStatus) -> Self {
        Self {
            basis,
            compensation,
            time,
            force_majeure: false,
            claim_withdrawn: false,
        }
    }

    pub fn with_force_majeure(mut self, force_majeure: bool) -> Self {
        self.force_majeure = force_majeure;
        self
    }

    pub fn with_claim_withdrawn(mut self, claim_withdrawn: bool) -> Self {
        self.claim_withdrawn = claim_withdrawn;
        self
    }

    pub fn get(&self, kind: TrackKind) -> TrackStatus {
        match kind {
            TrackKind::Basis => self.basis,
            TrackKind::Compensation => self.compensation,
            TrackKind::Time => self.time,
        }
    }

    /// True when the track counts as settled-in-agreement for a change order.
    ///
    /// Only approval counts, plus compensation under force majeure, which
    /// was never claimable. A dependent track the contractor has not claimed
    /// yet is still open.
    pub fn is_terminal_accepted(&self, kind: TrackKind) -> bool {
        match self.get(kind) {
            TrackStatus::Approved | TrackStatus::Locked => true,
            TrackStatus::NotApplicable => kind == TrackKind::Compensation && self.force_majeure,
            _ => false,
        }
    }

    /// A dependent track the contractor is expected to claim on an approved basis.
    pub fn awaits_claim(&self, kind: TrackKind) -> bool {
        kind != TrackKind::Basis
            && self.get(kind) == TrackStatus::NotApplicable
            && self.basis == TrackStatus::Approved
            && !self.is_terminal_accepted(kind)
    }

    fn is_settled(&self, kind: TrackKind) -> bool {
        match self.get(kind) {
            TrackStatus::Withdrawn => true,
            TrackStatus::NotApplicable => !self.awaits_claim(kind),
            _ => self.is_terminal_accepted(kind),
        }
    }

    pub fn aggregate(&self) -> CaseStatus {
        aggregate(self)
    }

    pub fn next_action(&self) -> Option<NextAction> {
        next_action(self)
    }
}

fn is_disputed(status: TrackStatus) -> bool {
    matches!(
        status,
        TrackStatus::Rejected | TrackStatus::PartiallyApproved | TrackStatus::AwaitingSpecification
    )
}

const TRACKS: [TrackKind; 3] = [TrackKind::Basis, TrackKind::Compensation, TrackKind::Time];

/// Combine the three track statuses into one case status.
///
/// `Agreed` means nothing is left in dispute but no change order can be
/// issued: a track was withdrawn, or the owner withdrew the instruction.
/// A claim the contractor withdraws in full also ends here, with no next
/// action.
pub fn aggregate(statuses: &TrackStatuses) -> CaseStatus {
    if matches!(statuses.basis, TrackStatus::Draft | TrackStatus::NotApplicable) {
        CaseStatus::Draft
    } else if TRACKS.iter().all(|kind| statuses.is_terminal_accepted(*kind)) {
        CaseStatus::ReadyForChangeOrder
    } else if TRACKS.iter().all(|kind| statuses.is_settled(*kind)) {
        CaseStatus::Agreed
    } else if TRACKS.iter().any(|kind| is_disputed(statuses.get(*kind))) {
        CaseStatus::UnderNegotiation
    } else {
        CaseStatus::UnderReview
    }
}

fn claim_noun(kind: TrackKind) -> &'static str {
    match kind {
        TrackKind::Basis => "grunnlaget",
        TrackKind::Compensation => "vederlagskravet",
        TrackKind::Time => "fristkravet",
    }
}

fn track_action(kind: TrackKind, status: TrackStatus) -> Option<NextAction> {
    let owning = Some(kind);
    let noun = claim_noun(kind);
    let action = match (kind, status) {
        (_, TrackStatus::Approved)
        | (_, TrackStatus::Locked)
        | (_, TrackStatus::Withdrawn)
        | (TrackKind::Compensation, TrackStatus::NotApplicable)
        | (TrackKind::Time, TrackStatus::NotApplicable) => return None,

        (TrackKind::Basis, TrackStatus::NotApplicable) | (TrackKind::Basis, TrackStatus::Draft) => {
            NextAction::new(Role::Te, "Send varsel om forholdet som gir grunnlag for kravet", owning)
        }
        (TrackKind::Basis, TrackStatus::Rejected) | (TrackKind::Basis, TrackStatus::PartiallyApproved) => {
            NextAction::new(
                Role::Te,
                "Avklar tvisten om grunnlaget: oppretthold, revider eller trekk kravet",
                None,
            )
        }
        (TrackKind::Basis, TrackStatus::AwaitingSpecification) => {
            NextAction::new(Role::Te, "Send utfyllende opplysninger om grunnlaget", owning)
        }

        (TrackKind::Compensation, TrackStatus::Draft) | (TrackKind::Time, TrackStatus::Draft) => {
            claim_action(kind)
        }
        (TrackKind::Compensation, TrackStatus::AwaitingSpecification) => {
            NextAction::new(Role::Te, "Send kostnadsoverslag (§30.2)", owning)
        }
        (TrackKind::Time, TrackStatus::AwaitingSpecification) => NextAction::new(
            Role::Te,
            "Send spesifisert krav om fristforlengelse (§33.6.1)",
            owning,
        ),
        (TrackKind::Time, TrackStatus::Rejected) | (TrackKind::Time, TrackStatus::PartiallyApproved) => {
            NextAction::new(
                Role::Te,
                "Ta stilling til BHs svar på fristkravet, eventuelt varsle forsering (§33.8)",
                owning,
            )
        }
        (_, TrackStatus::Rejected) | (_, TrackStatus::PartiallyApproved) => NextAction::new(
            Role::Te,
            format!("Ta stilling til BHs svar på {}", noun),
            owning,
        ),

        (_, TrackStatus::Submitted) => NextAction::new(Role::Bh, format!("Svar på {}", noun), owning),
        (_, TrackStatus::UnderReview) => {
            NextAction::new(Role::Bh, format!("Svar på revidert {}", noun), owning)
        }
    };
    Some(action)
}

fn claim_action(kind: TrackKind) -> NextAction {
    match kind {
        TrackKind::Compensation => {
            NextAction::new(Role::Te, "Send krav om vederlagsjustering", Some(kind))
        }
        _ => NextAction::new(Role::Te, "Send krav om fristforlengelse", Some(kind)),
    }
}

/// The first action required, scanning basis, compensation, then time.
pub fn next_action(statuses: &TrackStatuses) -> Option<NextAction> {
    if statuses.claim_withdrawn {
        return None;
    }
    let scanned = TRACKS.into_iter().find_map(|kind| {
        if statuses.awaits_claim(kind) {
            Some(claim_action(kind))
        } else {
            track_action(kind, statuses.get(kind))
        }
    });
    if scanned.is_some() {
        return scanned;
    }
    if aggregate(statuses) == CaseStatus::ReadyForChangeOrder && statuses.basis != TrackStatus::Locked {
        return Some(NextAction::new(Role::Bh, "Utsted endringsordre (§31.3)", None));
    }
    None
}
