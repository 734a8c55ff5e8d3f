//! Preclusion evaluation for the six notification points.
//!
//! Every case is evaluated against the same six points in the same order,
//! whether or not they apply to it:
//!
//! | # | Point | Clause |
//! |---|-------|--------|
//! | 1 | Basis notice | §32.2 |
//! | 2 | Neutral time notice | §33.4 |
//! | 3 | Itemized time claim | §33.6.1 |
//! | 4 | Compensation notice | §34.1.2 |
//! | 5 | Site overhead notice | §34.1.3 |
//! | 6 | Productivity notice | §34.1.3 |
//!
//! A point first passes its activation gate (the owning track is active);
//! a point that fails it is `NotApplicable`. Among applicable points the
//! status priority is `Objected` > `Sent` > `Missing`. An objected point keeps
//! the date the notice was sent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::case::Case;
use crate::track::{Notice, TrackKind};

// ============================================================================
// Notification points
// ============================================================================

/// A notice the contractor may be required to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPoint {
    BasisNotice,
    NeutralTimeNotice,
    ItemizedTimeNotice,
    MainClaimNotice,
    SiteOverheadNotice,
    ProductivityNotice,
}

impl NotificationPoint {
    /// The six points in evaluation order.
    pub const ALL: [NotificationPoint; 6] = [
        NotificationPoint::BasisNotice,
        NotificationPoint::NeutralTimeNotice,
        NotificationPoint::ItemizedTimeNotice,
        NotificationPoint::MainClaimNotice,
        NotificationPoint::SiteOverheadNotice,
        NotificationPoint::ProductivityNotice,
    ];

    /// Norwegian display label.
    pub fn label(&self) -> &'static str {
        match self {
            NotificationPoint::BasisNotice => "Varsel om endring",
            NotificationPoint::NeutralTimeNotice => "Nøytralt varsel om fristforlengelse",
            NotificationPoint::ItemizedTimeNotice => "Spesifisert krav om fristforlengelse",
            NotificationPoint::MainClaimNotice => "Varsel om vederlagsjustering",
            NotificationPoint::SiteOverheadNotice => "Særskilt varsel om rigg og drift",
            NotificationPoint::ProductivityNotice => "Særskilt varsel om produktivitetstap",
        }
    }

    /// Contract clause citation. Matched verbatim by downstream tooling.
    pub fn paragraph(&self) -> &'static str {
        match self {
            NotificationPoint::BasisNotice => "§32.2",
            NotificationPoint::NeutralTimeNotice => "§33.4",
            NotificationPoint::ItemizedTimeNotice => "§33.6.1",
            NotificationPoint::MainClaimNotice => "§34.1.2",
            NotificationPoint::SiteOverheadNotice => "§34.1.3",
            NotificationPoint::ProductivityNotice => "§34.1.3",
        }
    }

    /// The track the notice belongs to.
    pub fn owning_track(&self) -> TrackKind {
        match self {
            NotificationPoint::BasisNotice => TrackKind::Basis,
            NotificationPoint::NeutralTimeNotice | NotificationPoint::ItemizedTimeNotice => {
                TrackKind::Time
            }
            NotificationPoint::MainClaimNotice
            | NotificationPoint::SiteOverheadNotice
            | NotificationPoint::ProductivityNotice => TrackKind::Compensation,
        }
    }
}

/// Outcome for a single notification point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointStatus {
    Objected,
    Sent,
    Missing,
    NotApplicable,
}

impl PointStatus {
    /// Norwegian display label.
    pub fn label(&self) -> &'static str {
        match self {
            PointStatus::Objected => "Innsigelse",
            PointStatus::Sent => "Sendt",
            PointStatus::Missing => "Mangler",
            PointStatus::NotApplicable => "Ikke relevant",
        }
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Facts about one point, gathered from the case snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointFacts {
    /// The owning track passed its activation gate.
    pub applicable: bool,
    /// The notice, if the claim carries one for this point.
    pub notice: Option<Notice>,
    /// The owner has objected to the notice as late.
    pub objected: bool,
    /// Date the notice deadline runs from, when known.
    pub reference_date: Option<NaiveDate>,
}

/// Evaluated notification point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointEvaluation {
    pub point: NotificationPoint,
    pub label: String,
    pub paragraph: String,
    pub status: PointStatus,
    /// Date the notice was sent. Kept for objected points.
    pub date: Option<NaiveDate>,
    pub objection_text: Option<String>,
    /// Days from the reference date to the notice.
    pub elapsed_days: Option<i64>,
    /// Advisory: the notice came after the grace period.
    pub late: bool,
}

/// The six evaluated points in fixed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreclusionReport {
    pub points: [PointEvaluation; 6],
}

impl PreclusionReport {
    /// Evaluation for `point`.
    pub fn get(&self, point: NotificationPoint) -> &PointEvaluation {
        // `points` is built from `NotificationPoint::ALL`, so the index matches.
        &self.points[point as usize]
    }

    pub fn status(&self, point: NotificationPoint) -> PointStatus {
        self.get(point).status
    }

    pub fn is_objected(&self, point: NotificationPoint) -> bool {
        self.status(point) == PointStatus::Objected
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointEvaluation> {
        self.points.iter()
    }
}

/// Evaluate one point.
pub fn evaluate_point(point: NotificationPoint, facts: &PointFacts, grace_days: u32) -> PointEvaluation {
    let sent_on = facts.notice.as_ref().and_then(|notice| notice.sent_on);
    let elapsed_days = match (facts.reference_date, sent_on) {
        (Some(reference), Some(sent)) if facts.applicable => Some((sent - reference).num_days()),
        _ => None,
    };

    let status = if !facts.applicable {
        PointStatus::NotApplicable
    } else if facts.objected {
        PointStatus::Objected
    } else if sent_on.is_some() {
        PointStatus::Sent
    } else {
        PointStatus::Missing
    };

    let objection_text = (status == PointStatus::Objected).then(|| {
        format!(
            "BH gjør gjeldende at varselet kom for sent ({})",
            point.paragraph()
        )
    });

    PointEvaluation {
        point,
        label: point.label().to_string(),
        paragraph: point.paragraph().to_string(),
        status,
        date: if facts.applicable { sent_on } else { None },
        objection_text,
        elapsed_days,
        late: elapsed_days.map_or(false, |days| days > i64::from(grace_days)),
    }
}

/// Evaluate all six points from pre-gathered facts.
pub fn evaluate(facts: &[PointFacts; 6], grace_days: u32) -> PreclusionReport {
    let [basis, neutral, itemized, main, site, productivity] = NotificationPoint::ALL;
    PreclusionReport {
        points: [
            evaluate_point(basis, &facts[0], grace_days),
            evaluate_point(neutral, &facts[1], grace_days),
            evaluate_point(itemized, &facts[2], grace_days),
            evaluate_point(main, &facts[3], grace_days),
            evaluate_point(site, &facts[4], grace_days),
            evaluate_point(productivity, &facts[5], grace_days),
        ],
    }
}

/// Gather facts from a case snapshot, one entry per point in fixed order.
pub fn gather_facts(case: &Case) -> [PointFacts; 6] {
    let flags = case.flags();
    let basis_claim = case.basis.latest_claim();
    let basis_active = basis_claim.is_some() && !case.basis.withdrawn;
    let discovered_on = basis_claim.and_then(|claim| claim.discovered_on);

    let time_claim = case
        .time
        .latest_claim()
        .filter(|_| basis_active && !case.time.withdrawn);
    let compensation_claim = case
        .compensation
        .latest_claim()
        .filter(|_| basis_active && !case.compensation.withdrawn);

    let basis = PointFacts {
        applicable: basis_active && flags.basis_notice_required,
        notice: basis_claim.map(|claim| claim.notice.clone()),
        objected: case.basis.objects_to(NotificationPoint::BasisNotice),
        reference_date: discovered_on,
    };

    let neutral = PointFacts {
        applicable: time_claim.is_some(),
        notice: time_claim.map(|claim| claim.neutral_notice.clone()),
        objected: case.time.objects_to(NotificationPoint::NeutralTimeNotice),
        reference_date: discovered_on,
    };

    let itemized = PointFacts {
        applicable: time_claim.is_some(),
        notice: time_claim.map(|claim| claim.itemized_notice.clone()),
        objected: case.time.objects_to(NotificationPoint::ItemizedTimeNotice),
        reference_date: None,
    };

    let main = PointFacts {
        applicable: compensation_claim.is_some() && flags.compensation_notice_required,
        notice: compensation_claim.map(|claim| claim.main_notice.clone()),
        objected: case.compensation.objects_to(NotificationPoint::MainClaimNotice),
        reference_date: discovered_on,
    };

    let site = PointFacts {
        applicable: compensation_claim.map_or(false, |claim| claim.site_overhead.is_some()),
        notice: compensation_claim.map(|claim| claim.site_overhead_notice.clone()),
        objected: case.compensation.objects_to(NotificationPoint::SiteOverheadNotice),
        reference_date: None,
    };

    let productivity = PointFacts {
        applicable: compensation_claim.map_or(false, |claim| claim.productivity.is_some()),
        notice: compensation_claim.map(|claim| claim.productivity_notice.clone()),
        objected: case.compensation.objects_to(NotificationPoint::ProductivityNotice),
        reference_date: None,
    };

    [basis, neutral, itemized, main, site, productivity]
}

/// Evaluate a case snapshot.
pub fn evaluate_case(case: &Case, grace_days: u32) -> PreclusionReport {
    evaluate(&gather_facts(case), grace_days)
}
