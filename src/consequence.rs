//! Legal consequence narration for a chosen verdict.
//!
//! Each track has its own rule. A rule takes the verdict the owner is about
//! to give plus the flags that shape its meaning, and returns a severity and
//! an explanatory text. The rules are decision tables keyed on
//! `(verdict, modifier)` so each row can be checked against the contract
//! text on its own.
//!
//! All rules return `None` when no verdict has been chosen yet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::CategoryFlags;
use crate::format::{format_days, format_nok};
use crate::track::{
    BasisVerdict, CompensationClaim, CompensationResponse, CompensationVerdict, SettlementMethod,
    TimeClaim, TimeResponse, TimeVerdict, TrackKind,
};

// ============================================================================
// Output types
// ============================================================================

/// How the consequence should be emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Danger,
    Info,
}

/// Narrated consequence of a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Consequence {
    pub severity: Severity,
    pub text: String,
    /// Appended explanation when the verdict reverses an earlier rejection.
    pub reversal_text: Option<String>,
}

impl Consequence {
    fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            reversal_text: None,
        }
    }
}

/// A dependent track currently answered conditionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubsidiaryOutcome {
    pub track: TrackKind,
    /// The conditional outcome, e.g. `godkjent med 120 000 kr`.
    pub outcome: String,
}

// ============================================================================
// Basis rule
// ============================================================================

/// Input to [`basis_consequence`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasisContext {
    pub verdict: Option<BasisVerdict>,
    pub flags: CategoryFlags,
    /// The owner holds the notice under §32.2 as late.
    pub precluded: bool,
    /// The verdict turns an earlier rejection into an approval.
    pub is_reversal: bool,
    /// Dependent tracks holding subsidiary responses.
    pub subsidiary_outcomes: Vec<SubsidiaryOutcome>,
}

/// The flag combination that selects a row in the basis table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BasisModifier {
    ForceMajeure,
    TimelyNotice,
    PrecludedNotice,
    NoNoticeTiming,
}

impl BasisModifier {
    fn from_flags(flags: &CategoryFlags, precluded: bool) -> Self {
        match (flags.is_force_majeure, flags.notice_timing_applies, precluded) {
            (true, _, _) => BasisModifier::ForceMajeure,
            (false, true, false) => BasisModifier::TimelyNotice,
            (false, true, true) => BasisModifier::PrecludedNotice,
            (false, false, _) => BasisModifier::NoNoticeTiming,
        }
    }
}

/// Consequence of a basis verdict.
pub fn basis_consequence(ctx: &BasisContext) -> Option<Consequence> {
    use BasisModifier::*;
    use BasisVerdict::*;
    use Severity::*;

    let verdict = ctx.verdict?;
    let modifier = BasisModifier::from_flags(&ctx.flags, ctx.precluded);

    let mut consequence = match (verdict, modifier) {
        (Approved, ForceMajeure) => Consequence::new(
            Success,
            "Forholdet godkjennes som force majeure (§33.3). TE har krav på fristforlengelse \
             for den tiden forholdet hindrer fremdriften, men har ikke krav på vederlagsjustering.",
        ),
        (Rejected, ForceMajeure) => Consequence::new(
            Warning,
            "Du avviser at forholdet er force majeure. TE får ikke fristforlengelse på dette \
             grunnlaget, og forholdet er omtvistet.",
        ),
        (Approved, TimelyNotice) => Consequence::new(
            Success,
            "Grunnlaget godkjennes, og pålegget anses som en endring (§32.1). Varselet er sendt \
             i tide, og TE har krav på å få behandlet vederlag og frist.",
        ),
        (Rejected, TimelyNotice) => Consequence::new(
            Warning,
            "Du bestrider at pålegget innebærer en endring. Grunnlaget er omtvistet, og krav om \
             vederlag og frist behandles subsidiært.",
        ),
        (Approved, PrecludedNotice) => Consequence::new(
            Success,
            "Du mener varselet etter §32.2 ble sendt for sent, og prinsipalt er kravet tapt. \
             Grunnlaget godkjennes likevel subsidiært, slik at forholdet anses som en endring \
             dersom preklusjonsinnsigelsen ikke fører frem.",
        ),
        (Rejected, PrecludedNotice) => Consequence::new(
            Danger,
            "Du avviser grunnlaget prinsipalt fordi varselet etter §32.2 ble sendt for sent, og \
             subsidiært fordi forholdet ikke anses som en endring. Både varslingen og realiteten \
             er omtvistet.",
        ),
        (Approved, NoNoticeTiming) => Consequence::new(
            Success,
            "Grunnlaget godkjennes. TE har krav på å få behandlet vederlag og frist for forholdet.",
        ),
        (Rejected, NoNoticeTiming) => Consequence::new(
            Warning,
            "Grunnlaget avvises. Forholdet er omtvistet, og krav om vederlag og frist behandles \
             subsidiært.",
        ),
        (InstructionWithdrawn, _) if ctx.flags.is_instruction_type => Consequence::new(
            Info,
            "Pålegget frafalles (§32.3 c). Arbeidet skal ikke utføres, og TE har krav på dekning \
             av nødvendige utgifter påløpt før frafallet.",
        ),
        (InstructionWithdrawn, _) => return None,
    };

    if ctx.is_reversal && !ctx.subsidiary_outcomes.is_empty() {
        consequence.reversal_text = Some(reversal_text(&ctx.subsidiary_outcomes));
    }
    Some(consequence)
}

fn reversal_text(outcomes: &[SubsidiaryOutcome]) -> String {
    let listed: Vec<String> = outcomes
        .iter()
        .map(|outcome| format!("{} ({})", outcome.track.label(), outcome.outcome))
        .collect();
    format!(
        "Snuoperasjon: grunnlaget var tidligere avvist. Når det nå godkjennes, blir de \
         subsidiære svarene prinsipale for {}.",
        listed.join(" og ")
    )
}

// ============================================================================
// Time rule
// ============================================================================

/// Input to [`time_consequence`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeContext {
    pub verdict: Option<TimeVerdict>,
    /// The owner holds the time notices (§33.4 / §33.6.1) as late.
    pub precluded: bool,
    /// The response is conditional on a disputed basis.
    pub subsidiary: bool,
    pub requested_days: Option<u32>,
    pub approved_days: Option<u32>,
}

fn days_or(days: Option<u32>, fallback: &str) -> String {
    days.map(format_days).unwrap_or_else(|| fallback.to_string())
}

/// Consequence of a time verdict.
pub fn time_consequence(ctx: &TimeContext) -> Option<Consequence> {
    use Severity::*;
    use TimeVerdict::*;

    let verdict = ctx.verdict?;
    let approved = days_or(ctx.approved_days.or(ctx.requested_days), "det krevde antallet dager");
    let requested = days_or(ctx.requested_days, "det krevde antallet dager");
    let remaining = match (ctx.requested_days, ctx.approved_days) {
        (Some(requested), Some(approved)) => format_days(requested.saturating_sub(approved)),
        _ => "de resterende dagene".to_string(),
    };

    let consequence = match (verdict, ctx.precluded, ctx.subsidiary) {
        (Approved, false, false) => {
            Consequence::new(Success, format!("Fristforlengelse på {} godkjennes.", approved))
        }
        (Approved, false, true) => Consequence::new(
            Info,
            format!(
                "Fristforlengelse på {} godkjennes subsidiært. Svaret gjelder bare dersom \
                 grunnlaget avklares i TEs favør.",
                approved
            ),
        ),
        (Approved, true, _) => Consequence::new(
            Warning,
            format!(
                "Du mener fristkravet ble varslet for sent (§33.4 / §33.6.1) og er tapt. \
                 Subsidiært godkjennes fristforlengelse på {}.",
                approved
            ),
        ),
        (PartiallyApproved, false, false) => Consequence::new(
            Warning,
            format!(
                "Du godkjenner {} av {}. For {} som avslås, kan TE velge å anse avslaget som et \
                 pålegg om forsering (§33.8).",
                approved, requested, remaining
            ),
        ),
        (PartiallyApproved, false, true) => Consequence::new(
            Warning,
            format!(
                "Subsidiært godkjennes {} av {}, forutsatt at grunnlaget avklares i TEs favør. \
                 For {} som avslås, kan TE velge forsering (§33.8).",
                approved, requested, remaining
            ),
        ),
        (PartiallyApproved, true, _) => Consequence::new(
            Warning,
            format!(
                "Du mener fristkravet ble varslet for sent og er tapt. Subsidiært godkjennes {} \
                 av {}. For {} som avslås, kan TE likevel velge forsering (§33.8).",
                approved, requested, remaining
            ),
        ),
        (Rejected, false, false) => Consequence::new(
            Danger,
            "Fristkravet avslås. Dersom avslaget er uberettiget, kan TE velge å anse det som et \
             pålegg om forsering (§33.8), begrenset av 30 %-regelen.",
        ),
        (Rejected, false, true) => Consequence::new(
            Danger,
            "Fristkravet avslås også subsidiært. Dersom avslaget er uberettiget, kan TE velge å \
             anse det som et pålegg om forsering (§33.8).",
        ),
        (Rejected, true, _) => Consequence::new(
            Danger,
            "Fristkravet avslås fordi det ble varslet for sent (§33.4 / §33.6.1). Selv om kravet \
             anses tapt, kan TE likevel ha rett til forsering (§33.8) dersom \
             preklusjonsinnsigelsen er uberettiget.",
        ),
    };
    Some(consequence)
}

// ============================================================================
// Compensation rule
// ============================================================================

/// Input to [`compensation_consequence`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompensationContext {
    pub verdict: Option<CompensationVerdict>,
    /// The owner approves under another settlement method than claimed.
    pub method_changed: bool,
    /// The response is conditional on a disputed basis or a preclusion objection.
    pub subsidiary: bool,
    pub requested_amount: Option<Decimal>,
    pub approved_amount: Option<Decimal>,
    pub approved_method: Option<SettlementMethod>,
}

/// Consequence of a compensation verdict.
pub fn compensation_consequence(ctx: &CompensationContext) -> Option<Consequence> {
    use CompensationVerdict::*;
    use Severity::*;

    let verdict = ctx.verdict?;
    let approved = ctx
        .approved_amount
        .or(ctx.requested_amount)
        .map(format_nok)
        .unwrap_or_else(|| "det krevde beløpet".to_string());
    let requested = ctx
        .requested_amount
        .map(format_nok)
        .unwrap_or_else(|| "det krevde beløpet".to_string());
    let method = ctx
        .approved_method
        .map(|method| method.label())
        .unwrap_or("en annen oppgjørsform");

    let consequence = match (verdict, ctx.method_changed, ctx.subsidiary) {
        (Approved, false, false) => {
            Consequence::new(Success, format!("Vederlagskravet godkjennes med {}.", approved))
        }
        (Approved, true, false) => Consequence::new(
            Warning,
            format!(
                "Beløpet godkjennes med {}, men oppgjør skal skje etter {} og ikke etter \
                 oppgjørsformen TE har krevd. Endringen av oppgjørsform kan bestrides.",
                approved, method
            ),
        ),
        (Approved, false, true) => Consequence::new(
            Info,
            format!(
                "Vederlag på {} godkjennes subsidiært, forutsatt at grunnlaget avklares i TEs \
                 favør.",
                approved
            ),
        ),
        (Approved, true, true) => Consequence::new(
            Warning,
            format!(
                "Vederlag på {} godkjennes subsidiært, men oppgjør skal skje etter {} og ikke \
                 etter oppgjørsformen TE har krevd.",
                approved, method
            ),
        ),
        (PartiallyApproved, changed, subsidiary) => {
            let mut text = if subsidiary {
                format!(
                    "Subsidiært godkjennes {} av krevd {}. Differansen er omtvistet.",
                    approved, requested
                )
            } else {
                format!("Du godkjenner {} av krevd {}. Differansen er omtvistet.", approved, requested)
            };
            if changed {
                text.push_str(&format!(" Oppgjør skal skje etter {}.", method));
            }
            Consequence::new(Warning, text)
        }
        (Rejected, _, false) => Consequence::new(
            Danger,
            "Vederlagskravet avslås. Uenigheten om vederlaget står uløst.",
        ),
        (Rejected, _, true) => Consequence::new(
            Danger,
            "Vederlagskravet avslås også subsidiært. TE får ikke vederlag selv om grunnlaget \
             avklares i TEs favør.",
        ),
        (Withheld, _, _) => Consequence::new(
            Info,
            "Du holder tilbake betaling inntil TE har levert kostnadsoverslag (§30.2). Kravet er \
             ikke avgjort.",
        ),
    };
    Some(consequence)
}

// ============================================================================
// Conditional outcomes
// ============================================================================

/// Describe a compensation response as a conditional outcome.
pub fn compensation_outcome(
    response: &CompensationResponse,
    claim: Option<&CompensationClaim>,
) -> String {
    let requested = claim.map(|claim| claim.amount);
    let approved = response.approved_amount.or(requested);
    match (response.verdict, approved, requested) {
        (CompensationVerdict::Approved, Some(amount), _) => {
            format!("godkjent med {}", format_nok(amount))
        }
        (CompensationVerdict::Approved, None, _) => "godkjent".to_string(),
        (CompensationVerdict::PartiallyApproved, Some(approved), Some(requested)) => format!(
            "delvis godkjent med {} av {}",
            format_nok(approved),
            format_nok(requested)
        ),
        (CompensationVerdict::PartiallyApproved, _, _) => "delvis godkjent".to_string(),
        (CompensationVerdict::Rejected, _, _) => "avslått".to_string(),
        (CompensationVerdict::Withheld, _, _) => "betaling holdt tilbake".to_string(),
    }
}

/// Describe a time response as a conditional outcome.
pub fn time_outcome(response: &TimeResponse, claim: Option<&TimeClaim>) -> String {
    let requested = claim.and_then(|claim| claim.days);
    let approved = response.approved_days.or(requested);
    match (response.verdict, approved, requested) {
        (TimeVerdict::Approved, Some(days), _) => format!("godkjent med {}", format_days(days)),
        (TimeVerdict::Approved, None, _) => "godkjent".to_string(),
        (TimeVerdict::PartiallyApproved, Some(approved), Some(requested)) => {
            format!("delvis godkjent med {} av {}", approved, format_days(requested))
        }
        (TimeVerdict::PartiallyApproved, _, _) => "delvis godkjent".to_string(),
        (TimeVerdict::Rejected, _, _) => "avslått".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    fn basis(verdict: BasisVerdict, main: &str, sub: &str, precluded: bool) -> Option<Consequence> {
        basis_consequence(&BasisContext {
            verdict: Some(verdict),
            flags: Category::from_codes(main, &[sub]).flags(),
            precluded,
            ..Default::default()
        })
    }

    #[test]
    fn no_verdict_gives_nothing() {
        assert_eq!(basis_consequence(&BasisContext::default()), None);
        assert_eq!(time_consequence(&TimeContext::default()), None);
        assert_eq!(compensation_consequence(&CompensationContext::default()), None);
    }

    #[test]
    fn time_barred_approval_is_subsidiary_success() {
        let consequence = basis(BasisVerdict::Approved, "ENDRING", "IRREG", true).unwrap();
        assert_eq!(consequence.severity, Severity::Success);
        assert!(consequence.text.contains("for sent"));
        assert!(consequence.text.contains("subsidiært"));
    }

    #[test]
    fn time_barred_rejection_is_danger() {
        let consequence = basis(BasisVerdict::Rejected, "ENDRING", "IRREG", true).unwrap();
        assert_eq!(consequence.severity, Severity::Danger);
        assert!(consequence.text.contains("§32.2"));
    }

    #[test]
    fn timely_change_rows() {
        let approved = basis(BasisVerdict::Approved, "ENDRING", "IRREG", false).unwrap();
        assert_eq!(approved.severity, Severity::Success);
        assert!(!approved.text.contains("for sent"));
        let rejected = basis(BasisVerdict::Rejected, "ENDRING", "IRREG", false).unwrap();
        assert_eq!(rejected.severity, Severity::Warning);
    }

    #[test]
    fn categories_without_notice_timing_ignore_preclusion() {
        let approved = basis(BasisVerdict::Approved, "SVIKT", "MEDVIRK", true).unwrap();
        assert_eq!(approved.severity, Severity::Success);
        assert!(!approved.text.contains("for sent"));
        let rejected = basis(BasisVerdict::Rejected, "ENDRING", "EO", true).unwrap();
        assert_eq!(rejected.severity, Severity::Warning);
        assert!(rejected.text.contains("omtvistet"));
    }

    #[test]
    fn force_majeure_approval_grants_time_only() {
        let consequence = basis(BasisVerdict::Approved, "FORCE_MAJEURE", "FM_EGEN", false).unwrap();
        assert_eq!(consequence.severity, Severity::Success);
        assert!(consequence.text.contains("krav på fristforlengelse"));
        assert!(consequence.text.contains("ikke krav på vederlagsjustering"));
    }

    #[test]
    fn withdrawing_instruction_requires_instruction_category() {
        let withdrawn = basis(BasisVerdict::InstructionWithdrawn, "ENDRING", "VALGRETT", false).unwrap();
        assert_eq!(withdrawn.severity, Severity::Info);
        assert!(withdrawn.text.contains("§32.3 c"));
        assert_eq!(basis(BasisVerdict::InstructionWithdrawn, "SVIKT", "MEDVIRK", false), None);
    }

    #[test]
    fn reversal_text_names_each_track() {
        let consequence = basis_consequence(&BasisContext {
            verdict: Some(BasisVerdict::Approved),
            flags: Category::from_codes("ENDRING", &["IRREG"]).flags(),
            precluded: false,
            is_reversal: true,
            subsidiary_outcomes: vec![
                SubsidiaryOutcome {
                    track: TrackKind::Compensation,
                    outcome: "godkjent med 120 000 kr".into(),
                },
                SubsidiaryOutcome {
                    track: TrackKind::Time,
                    outcome: "delvis godkjent med 5 av 10 dager".into(),
                },
            ],
        })
        .unwrap();
        insta::assert_snapshot!(consequence.reversal_text.unwrap(), @"Snuoperasjon: grunnlaget var tidligere avvist. Når det nå godkjennes, blir de subsidiære svarene prinsipale for vederlag (godkjent med 120 000 kr) og frist (delvis godkjent med 5 av 10 dager).");
    }

    #[test]
    fn reversal_without_subsidiary_tracks_adds_nothing() {
        let consequence = basis_consequence(&BasisContext {
            verdict: Some(BasisVerdict::Approved),
            flags: Category::from_codes("ENDRING", &["IRREG"]).flags(),
            is_reversal: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(consequence.reversal_text, None);
    }

    #[test]
    fn time_rejection_points_to_acceleration() {
        let plain = time_consequence(&TimeContext {
            verdict: Some(TimeVerdict::Rejected),
            requested_days: Some(20),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(plain.severity, Severity::Danger);
        assert!(plain.text.contains("forsering (§33.8)"));

        let precluded = time_consequence(&TimeContext {
            verdict: Some(TimeVerdict::Rejected),
            precluded: true,
            ..Default::default()
        })
        .unwrap();
        assert!(precluded.text.contains("for sent"));
        assert!(precluded.text.contains("likevel ha rett til forsering"));
    }

    #[test]
    fn partial_time_approval_counts_remaining_days() {
        let consequence = time_consequence(&TimeContext {
            verdict: Some(TimeVerdict::PartiallyApproved),
            requested_days: Some(20),
            approved_days: Some(12),
            ..Default::default()
        })
        .unwrap();
        insta::assert_snapshot!(consequence.text, @"Du godkjenner 12 dager av 20 dager. For 8 dager som avslås, kan TE velge å anse avslaget som et pålegg om forsering (§33.8).");
    }

    #[test]
    fn subsidiary_time_approval_is_info() {
        let consequence = time_consequence(&TimeContext {
            verdict: Some(TimeVerdict::Approved),
            subsidiary: true,
            requested_days: Some(1),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(consequence.severity, Severity::Info);
        assert!(consequence.text.starts_with("Fristforlengelse på 1 dag godkjennes subsidiært."));
    }

    #[test]
    fn changed_settlement_method_downgrades_approval() {
        let plain = compensation_consequence(&CompensationContext {
            verdict: Some(CompensationVerdict::Approved),
            requested_amount: Some(Decimal::new(150_000, 0)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(plain.severity, Severity::Success);
        assert_eq!(plain.text, "Vederlagskravet godkjennes med 150 000 kr.");

        let changed = compensation_consequence(&CompensationContext {
            verdict: Some(CompensationVerdict::Approved),
            method_changed: true,
            requested_amount: Some(Decimal::new(150_000, 0)),
            approved_method: Some(SettlementMethod::CostPlus),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(changed.severity, Severity::Warning);
        assert!(changed.text.contains("regningsarbeid"));
    }

    #[test]
    fn withheld_payment_is_info() {
        let consequence = compensation_consequence(&CompensationContext {
            verdict: Some(CompensationVerdict::Withheld),
            method_changed: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(consequence.severity, Severity::Info);
        assert!(consequence.text.contains("§30.2"));
    }

    #[test]
    fn partial_compensation_mentions_difference() {
        let consequence = compensation_consequence(&CompensationContext {
            verdict: Some(CompensationVerdict::PartiallyApproved),
            subsidiary: true,
            requested_amount: Some(Decimal::new(200_000, 0)),
            approved_amount: Some(Decimal::new(80_000, 0)),
            ..Default::default()
        })
        .unwrap();
        insta::assert_snapshot!(consequence.text, @"Subsidiært godkjennes 80 000 kr av krevd 200 000 kr. Differansen er omtvistet.");
    }

    #[test]
    fn outcome_descriptions() {
        let claim = TimeClaim {
            days: Some(10),
            neutral_notice: Default::default(),
            itemized_notice: Default::default(),
        };
        let response = TimeResponse {
            verdict: TimeVerdict::PartiallyApproved,
            approved_days: Some(5),
            rationale: String::new(),
            objections: Default::default(),
            triggers: Default::default(),
        };
        assert_eq!(time_outcome(&response, Some(&claim)), "delvis godkjent med 5 av 10 dager");
    }
}
