//! Rule engine for change claims (krav om endring) under NS 8407.
//!
//! The contractor (TE) raises a claim with three tracks: the basis
//! (grunnlag), compensation (vederlag) and time (frist). The owner (BH)
//! answers each track. This crate derives everything that follows from the
//! contract rules, as pure functions over a [`Case`] snapshot:
//!
//! ## Derivations
//!
//! - [`Category::flags`] - Contract-flag predicates for the claim category
//! - [`preclusion`] - Status of the six notification points
//! - [`consequence`] - Severity and legal text for a proposed verdict
//! - [`promotion`] - Subsidiary promotion when a rejected basis is approved
//! - [`status`] - Aggregated case status and the next required action
//! - [`acceleration`] - The 30% ceiling for acceleration (forsering)
//! - [`ComplianceMatrix`] - Display view of the notification points
//!
//! [`assess_case`] runs all of them and returns one serializable
//! [`CaseAssessment`].
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use koe_rules::{
//!     assess_case, BasisClaim, BasisResponse, BasisVerdict, Case, CaseStatus, Category, Notice,
//!     ProjectConfig, Role, TrackKind,
//! };
//!
//! let at = Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap();
//! let mut case = Case::new("Endret fundamentering", at);
//! case.submit_basis_claim(
//!     BasisClaim {
//!         category: Category::from_codes("ENDRING", &["IRREG"]),
//!         description: "BH har pålagt endret fundamentering".into(),
//!         discovered_on: None,
//!         notice: Notice::default(),
//!     },
//!     at,
//! )
//! .unwrap();
//! case.record_basis_response(
//!     BasisResponse {
//!         verdict: BasisVerdict::Approved,
//!         rationale: String::new(),
//!         objections: Default::default(),
//!     },
//!     at,
//! )
//! .unwrap();
//!
//! let assessment = assess_case(&case, &ProjectConfig::default()).unwrap();
//! assert_eq!(assessment.status, CaseStatus::UnderReview);
//!
//! // The basis is settled; compensation and time are still to be claimed.
//! let next = assessment.next_action.unwrap();
//! assert_eq!(next.role, Role::Te);
//! assert_eq!(next.owning_track, Some(TrackKind::Compensation));
//! ```

mod assessment;
mod case;
mod category;
mod compliance;
mod config;
mod error;
mod format;
mod track;

pub mod acceleration;
pub mod consequence;
pub mod preclusion;
pub mod promotion;
pub mod status;

pub use acceleration::{Acceleration, AccelerationAssessment, AccelerationStage};
pub use assessment::{assess_case, CaseAssessment};
pub use case::Case;
pub use category::{Category, CategoryFlags, MainCategory, SubCategory};
pub use compliance::{ComplianceIndicator, ComplianceMatrix};
pub use config::ProjectConfig;
pub use consequence::{Consequence, Severity, SubsidiaryOutcome};
pub use error::{ConfigError, EngineError, EngineResult};
pub use format::{format_days, format_nok};
pub use preclusion::{NotificationPoint, PointEvaluation, PointStatus, PreclusionReport};
pub use promotion::{resolve_promotion, PromotionBundle, PromotionPlan};
pub use status::{CaseStatus, NextAction, Role, TrackStatuses};
pub use track::{
    BasisClaim, BasisResponse, BasisTrack, BasisVerdict, Claim, CompensationClaim,
    CompensationResponse, CompensationTrack, CompensationVerdict, Notice, NoticeMethod,
    OwnerResponse, Revision, SettlementMethod, SubsidiaryTrigger, TimeClaim, TimeResponse,
    TimeTrack, TimeVerdict, Track, TrackKind, TrackStatus,
};

#[cfg(test)]
mod tests {
    mod scenarios;
}
