//! Subsidiary promotion on basis reversal (snuoperasjon).
//!
//! When a previously rejected basis is approved, the conditional responses
//! on the dependent tracks become principal. The resolver only decides
//! *which* tracks to promote; [`Case::record_basis_response`] applies the
//! plan together with the basis update as one unit.
//!
//! ```
//! use koe_rules::{resolve_promotion, BasisVerdict, TrackKind};
//!
//! let plan = resolve_promotion(Some(BasisVerdict::Rejected), BasisVerdict::Approved, true, false);
//! assert!(plan.is_reversal);
//! assert_eq!(plan.promote.into_iter().collect::<Vec<_>>(), vec![TrackKind::Compensation]);
//! ```
//!
//! [`Case::record_basis_response`]: crate::Case::record_basis_response

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::track::{BasisVerdict, SubsidiaryTrigger, TrackKind};

/// Tracks to promote for a basis transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromotionPlan {
    pub is_reversal: bool,
    /// Empty unless `is_reversal`.
    pub promote: BTreeSet<TrackKind>,
}

impl PromotionPlan {
    pub fn is_empty(&self) -> bool {
        self.promote.is_empty()
    }
}

/// A reversal is a principal rejection followed by an approval.
pub fn is_reversal(previous: Option<BasisVerdict>, new: BasisVerdict) -> bool {
    matches!(
        (previous, new),
        (Some(BasisVerdict::Rejected), BasisVerdict::Approved)
    )
}

/// Decide which dependent tracks become principal.
pub fn resolve_promotion(
    previous: Option<BasisVerdict>,
    new: BasisVerdict,
    compensation_subsidiary: bool,
    time_subsidiary: bool,
) -> PromotionPlan {
    if !is_reversal(previous, new) {
        return PromotionPlan::default();
    }

    let promote: BTreeSet<TrackKind> = [
        (TrackKind::Compensation, compensation_subsidiary),
        (TrackKind::Time, time_subsidiary),
    ]
    .into_iter()
    .filter_map(|(kind, subsidiary)| subsidiary.then_some(kind))
    .collect();

    tracing::debug!(?previous, ?new, ?promote, "basis reversal");
    PromotionPlan {
        is_reversal: true,
        promote,
    }
}

/// Like [`resolve_promotion`], with the previous verdict as a stored code.
///
/// A code that is not a basis verdict means the stored snapshot is corrupt
/// and fails with [`EngineError::InvalidPriorVerdict`].
pub fn resolve_from_code(
    previous: Option<&str>,
    new: BasisVerdict,
    compensation_subsidiary: bool,
    time_subsidiary: bool,
) -> EngineResult<PromotionPlan> {
    let previous = match previous {
        Some(code) => match BasisVerdict::from_code(code) {
            Some(verdict) => Some(verdict),
            None => {
                tracing::warn!(code, "unrecognized prior basis verdict");
                return Err(EngineError::InvalidPriorVerdict(code.to_string()));
            }
        },
        None => None,
    };
    Ok(resolve_promotion(
        previous,
        new,
        compensation_subsidiary,
        time_subsidiary,
    ))
}

/// The basis update and its promotions, applied as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromotionBundle {
    pub plan: PromotionPlan,
    /// Revision the basis response was recorded under.
    pub basis_revision: u32,
    /// Triggers cleared from each promoted track.
    pub cleared: BTreeMap<TrackKind, BTreeSet<SubsidiaryTrigger>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use BasisVerdict::*;

    #[test]
    fn reversal_promotes_both_subsidiary_tracks() {
        let plan = resolve_promotion(Some(Rejected), Approved, true, true);
        assert!(plan.is_reversal);
        assert_eq!(
            plan.promote,
            [TrackKind::Compensation, TrackKind::Time].into_iter().collect()
        );
    }

    #[test]
    fn reversal_promotes_only_subsidiary_tracks() {
        let plan = resolve_promotion(Some(Rejected), Approved, true, false);
        assert_eq!(plan.promote, [TrackKind::Compensation].into_iter().collect());
    }

    #[test]
    fn approval_after_approval_is_not_a_reversal() {
        let plan = resolve_promotion(Some(Approved), Approved, true, true);
        assert!(!plan.is_reversal);
        assert!(plan.is_empty());
    }

    #[test]
    fn first_verdict_is_not_a_reversal() {
        assert!(!is_reversal(None, Approved));
        assert!(!is_reversal(Some(Approved), Rejected));
        assert!(!is_reversal(Some(Rejected), InstructionWithdrawn));
    }

    #[test]
    fn stored_codes() {
        let plan = resolve_from_code(Some("avslatt"), Approved, false, true).unwrap();
        assert_eq!(plan.promote, [TrackKind::Time].into_iter().collect());
        assert!(resolve_from_code(None, Approved, true, true).unwrap().is_empty());
    }

    #[test]
    fn corrupt_prior_code_fails() {
        assert_eq!(
            resolve_from_code(Some("delvis_godkjent"), Approved, true, true).unwrap_err(),
            EngineError::InvalidPriorVerdict("delvis_godkjent".into())
        );
    }
}
