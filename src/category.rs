//! Category classification for basis claims.
//!
//! A basis claim carries one [`MainCategory`] and zero or more
//! [`SubCategory`] tags. Every contractual predicate the rest of the engine
//! needs is read from a single [`CategoryFlags`] bundle, computed in one
//! place so the predicates cannot drift apart.
//!
//! # Example
//!
//! ```
//! use koe_rules::{Category, MainCategory, SubCategory};
//!
//! let category = Category::new(MainCategory::Change, vec![SubCategory::IrregularChange]);
//! let flags = category.flags();
//! assert!(flags.notice_timing_applies);
//! assert!(flags.is_instruction_type);
//! assert!(!flags.is_force_majeure);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Main categories
// ============================================================================

/// The legal ground a basis claim is raised under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MainCategory {
    /// Change to the contract work (NS 8407 chapter VI).
    #[serde(rename = "ENDRING")]
    Change,
    /// Deficiency or hindrance on the owner's side (svikt/medvirkning).
    #[serde(rename = "SVIKT")]
    Deficiency,
    /// Unforeseen site condition (grunnforhold, kulturminner).
    #[serde(rename = "UFORUTSETT")]
    UnforeseenCondition,
    /// Force majeure (§33.3).
    #[serde(rename = "FORCE_MAJEURE")]
    ForceMajeure,
    /// Other circumstances the owner carries the risk for.
    #[serde(rename = "ANDRE")]
    Other,
    /// A code the engine does not recognize. Every predicate is false.
    #[serde(rename = "UKJENT")]
    Unrecognized,
}

impl MainCategory {
    /// Parse a main-category code. Unknown codes map to [`MainCategory::Unrecognized`].
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "ENDRING" => MainCategory::Change,
            "SVIKT" => MainCategory::Deficiency,
            "UFORUTSETT" => MainCategory::UnforeseenCondition,
            "FORCE_MAJEURE" => MainCategory::ForceMajeure,
            "ANDRE" => MainCategory::Other,
            _ => MainCategory::Unrecognized,
        }
    }

    /// The wire code for this category.
    pub fn code(&self) -> &'static str {
        match self {
            MainCategory::Change => "ENDRING",
            MainCategory::Deficiency => "SVIKT",
            MainCategory::UnforeseenCondition => "UFORUTSETT",
            MainCategory::ForceMajeure => "FORCE_MAJEURE",
            MainCategory::Other => "ANDRE",
            MainCategory::Unrecognized => "UKJENT",
        }
    }

    /// Norwegian display label.
    pub fn label(&self) -> &'static str {
        match self {
            MainCategory::Change => "Endring",
            MainCategory::Deficiency => "Svikt eller medvirkning fra BH",
            MainCategory::UnforeseenCondition => "Uforutsette forhold",
            MainCategory::ForceMajeure => "Force majeure",
            MainCategory::Other => "Andre forhold BH har risikoen for",
            MainCategory::Unrecognized => "Ukjent kategori",
        }
    }
}

// ============================================================================
// Sub-categories
// ============================================================================

/// Sub-category tags, each anchored to a contract clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubCategory {
    /// Formal change order issued by the owner.
    #[serde(rename = "EO")]
    ChangeOrder,
    /// Instruction given without a change order.
    #[serde(rename = "IRREG")]
    IrregularChange,
    /// Owner restricting the contractor's right to choose.
    #[serde(rename = "VALGRETT")]
    RestrictedChoice,
    /// Change arising from the owner's answer to a notice.
    #[serde(rename = "SVAR_VARSEL")]
    AnswerToNotice,
    /// New statutory requirements for the contract object.
    #[serde(rename = "LOV_GJENSTAND")]
    StatutoryObject,
    /// New statutory requirements for the execution.
    #[serde(rename = "LOV_PROSESS")]
    StatutoryProcess,
    /// Changed public fees or charges.
    #[serde(rename = "GEBYR")]
    Fees,
    /// Coordination of side contractors.
    #[serde(rename = "SAMORD")]
    Coordination,
    /// Late or deficient owner contribution.
    #[serde(rename = "MEDVIRK")]
    OwnerContribution,
    /// Missing site access.
    #[serde(rename = "ADKOMST")]
    SiteAccess,
    /// Errors in the owner's design.
    #[serde(rename = "PROSJ_RISIKO")]
    DesignRisk,
    /// Unforeseen ground conditions.
    #[serde(rename = "GRUNN")]
    GroundConditions,
    /// Discovery of cultural heritage remains.
    #[serde(rename = "KULTURMINNER")]
    CulturalHeritage,
    /// Force majeure affecting the contractor.
    #[serde(rename = "FM_EGEN")]
    ForceMajeureOwn,
    /// Force majeure affecting a subcontractor.
    #[serde(rename = "FM_MEDHJELPER")]
    ForceMajeureSubcontractor,
    /// Owner refusing a nominated subcontractor.
    #[serde(rename = "NEKT_MH")]
    RefusedSubcontractor,
    /// Damage caused by the owner.
    #[serde(rename = "SKADE_BH")]
    OwnerDamage,
    /// Suspension after payment default.
    #[serde(rename = "STANS_BET")]
    SuspensionForNonPayment,
}

impl SubCategory {
    /// Every sub-category, in catalog order.
    pub const ALL: [SubCategory; 18] = [
        SubCategory::ChangeOrder,
        SubCategory::IrregularChange,
        SubCategory::RestrictedChoice,
        SubCategory::AnswerToNotice,
        SubCategory::StatutoryObject,
        SubCategory::StatutoryProcess,
        SubCategory::Fees,
        SubCategory::Coordination,
        SubCategory::OwnerContribution,
        SubCategory::SiteAccess,
        SubCategory::DesignRisk,
        SubCategory::GroundConditions,
        SubCategory::CulturalHeritage,
        SubCategory::ForceMajeureOwn,
        SubCategory::ForceMajeureSubcontractor,
        SubCategory::RefusedSubcontractor,
        SubCategory::OwnerDamage,
        SubCategory::SuspensionForNonPayment,
    ];

    /// Parse a sub-category code.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();
        Self::ALL.iter().copied().find(|sub| sub.code() == code)
    }

    /// The wire code for this tag.
    pub fn code(&self) -> &'static str {
        self.entry().0
    }

    /// Norwegian display label.
    pub fn label(&self) -> &'static str {
        self.entry().1
    }

    /// The NS 8407 clause the tag is anchored to.
    pub fn paragraph(&self) -> &'static str {
        self.entry().2
    }

    /// The main category this tag belongs under.
    pub fn main_category(&self) -> MainCategory {
        self.entry().3
    }

    /// True for the tags that denote a unilateral instruction from the owner.
    pub fn is_instruction(&self) -> bool {
        matches!(self, SubCategory::IrregularChange | SubCategory::RestrictedChoice)
    }

    fn entry(&self) -> (&'static str, &'static str, &'static str, MainCategory) {
        use MainCategory::*;
        match self {
            SubCategory::ChangeOrder => ("EO", "Formell endringsordre", "§31.3", Change),
            SubCategory::IrregularChange => {
                ("IRREG", "Irregulær endring (pålegg uten endringsordre)", "§32.1", Change)
            }
            SubCategory::RestrictedChoice => ("VALGRETT", "Begrensning av TEs valgrett", "§14.6", Change),
            SubCategory::AnswerToNotice => ("SVAR_VARSEL", "Endring via svar på varsel", "§24.2.2", Change),
            SubCategory::StatutoryObject => (
                "LOV_GJENSTAND",
                "Endring i lover og forskrifter (kontraktsgjenstanden)",
                "§14.4",
                Change,
            ),
            SubCategory::StatutoryProcess => (
                "LOV_PROSESS",
                "Endring i lover og forskrifter (utførelsen)",
                "§15.2",
                Change,
            ),
            SubCategory::Fees => ("GEBYR", "Endring i gebyrer og avgifter", "§26.3", Change),
            SubCategory::Coordination => ("SAMORD", "Samordning av sideentreprenører", "§21.4", Change),
            SubCategory::OwnerContribution => {
                ("MEDVIRK", "Forsinket eller mangelfull medvirkning fra BH", "§22", Deficiency)
            }
            SubCategory::SiteAccess => ("ADKOMST", "Manglende tilgang til byggeplassen", "§22.2", Deficiency),
            SubCategory::DesignRisk => ("PROSJ_RISIKO", "Feil i BHs prosjektering", "§24.1", Deficiency),
            SubCategory::GroundConditions => {
                ("GRUNN", "Uforutsette grunnforhold", "§23.1", UnforeseenCondition)
            }
            SubCategory::CulturalHeritage => {
                ("KULTURMINNER", "Funn av kulturminner", "§23.3", UnforeseenCondition)
            }
            SubCategory::ForceMajeureOwn => ("FM_EGEN", "Force majeure hos TE", "§33.3 første ledd", ForceMajeure),
            SubCategory::ForceMajeureSubcontractor => (
                "FM_MEDHJELPER",
                "Force majeure hos TEs kontraktsmedhjelper",
                "§33.3 annet ledd",
                ForceMajeure,
            ),
            SubCategory::RefusedSubcontractor => ("NEKT_MH", "Nektelse av kontraktsmedhjelper", "§10.2", Other),
            SubCategory::OwnerDamage => ("SKADE_BH", "Skade forårsaket av BH", "§19.1", Other),
            SubCategory::SuspensionForNonPayment => {
                ("STANS_BET", "Stans ved BHs betalingsmislighold", "§29.2", Other)
            }
        }
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Immutable classification attached to the basis claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// The main category.
    pub main: MainCategory,
    /// Sub-category tags. Tags belonging to another main category are ignored
    /// by the predicates.
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
}

/// Contract-flag predicates derived from a [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryFlags {
    /// §32.2 notice-timing rules apply (change category, not a formal change order).
    pub notice_timing_applies: bool,
    /// The owner gave a unilateral instruction, so it can be withdrawn (§32.3 c).
    pub is_instruction_type: bool,
    /// Force majeure: time extension only, no compensation.
    pub is_force_majeure: bool,
    /// The contractor must notify the circumstance itself.
    pub basis_notice_required: bool,
    /// The compensation claim must be notified separately (§34.1.2).
    pub compensation_notice_required: bool,
}

impl Category {
    /// Create a category from typed parts.
    pub fn new(main: MainCategory, sub_categories: Vec<SubCategory>) -> Self {
        Self {
            main,
            sub_categories,
        }
    }

    /// Build a category from wire codes. Unrecognized sub-category codes are dropped.
    pub fn from_codes(main: &str, subs: &[&str]) -> Self {
        Self {
            main: MainCategory::from_code(main),
            sub_categories: subs.iter().filter_map(|code| SubCategory::from_code(code)).collect(),
        }
    }

    /// Returns true if the category carries the given tag under its own main category.
    pub fn has(&self, sub: SubCategory) -> bool {
        sub.main_category() == self.main && self.sub_categories.contains(&sub)
    }

    /// Compute the full predicate bundle.
    pub fn flags(&self) -> CategoryFlags {
        let is_change_order = self.has(SubCategory::ChangeOrder);
        match self.main {
            MainCategory::Change => CategoryFlags {
                notice_timing_applies: !is_change_order,
                is_instruction_type: self
                    .sub_categories
                    .iter()
                    .any(|sub| sub.is_instruction() && self.has(*sub)),
                is_force_majeure: false,
                basis_notice_required: !is_change_order,
                compensation_notice_required: false,
            },
            MainCategory::Deficiency | MainCategory::UnforeseenCondition | MainCategory::Other => {
                CategoryFlags {
                    basis_notice_required: true,
                    compensation_notice_required: true,
                    ..CategoryFlags::default()
                }
            }
            MainCategory::ForceMajeure => CategoryFlags {
                is_force_majeure: true,
                basis_notice_required: true,
                ..CategoryFlags::default()
            },
            MainCategory::Unrecognized => CategoryFlags::default(),
        }
    }
}
