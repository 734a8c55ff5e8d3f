//! Scenario runner.
//!
//! [`run_fixture`] replays the steps on a fresh [`Case`] and assesses the
//! result; [`check_expectations`] compares the outcome with the fixture's
//! `[expect]` table.

use std::collections::BTreeMap;
use std::fmt::Debug;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use koe_rules::consequence::{basis_consequence, compensation_consequence, time_consequence};
use koe_rules::{
    assess_case, Acceleration, BasisClaim, BasisResponse, Case, CaseAssessment, Category,
    CompensationClaim, CompensationResponse, Consequence, EngineError, Notice, NoticeMethod,
    PromotionBundle, SettlementMethod, Severity, TimeClaim, TimeResponse, TrackKind,
};

use crate::errors::{SpecError, SpecResult};
use crate::fixture::{Expectations, ScenarioFixture, Step};

/// State after replaying a fixture.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub case: Case,
    pub assessment: CaseAssessment,
    /// Bundle returned by the last basis response.
    pub last_promotion: Option<PromotionBundle>,
    /// Errors from steps the fixture expected to fail, by step number.
    pub step_errors: BTreeMap<usize, EngineError>,
}

fn timestamp(on: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&on.and_time(NaiveTime::default()))
}

fn notice(sent_on: Option<NaiveDate>) -> Notice {
    match sent_on {
        Some(date) => Notice::sent(date, [NoticeMethod::Email]),
        None => Notice::absent(),
    }
}

fn apply_step(
    case: &mut Case,
    step: &Step,
    last_promotion: &mut Option<PromotionBundle>,
) -> Result<(), EngineError> {
    let at = timestamp(step.on());
    match step {
        Step::SubmitBasis {
            main,
            subs,
            description,
            discovered_on,
            notice_on,
            ..
        } => {
            let subs: Vec<&str> = subs.iter().map(String::as_str).collect();
            case.submit_basis_claim(
                BasisClaim {
                    category: Category::from_codes(main, &subs),
                    description: description.clone(),
                    discovered_on: *discovered_on,
                    notice: notice(*notice_on),
                },
                at,
            )?;
        }
        Step::SubmitCompensation {
            amount,
            method,
            site_overhead,
            productivity,
            main_notice_on,
            site_overhead_notice_on,
            productivity_notice_on,
            ..
        } => {
            case.submit_compensation_claim(
                CompensationClaim {
                    amount: *amount,
                    method: method.unwrap_or(SettlementMethod::UnitPrices),
                    site_overhead: *site_overhead,
                    productivity: *productivity,
                    main_notice: notice(*main_notice_on),
                    site_overhead_notice: notice(*site_overhead_notice_on),
                    productivity_notice: notice(*productivity_notice_on),
                },
                at,
            )?;
        }
        Step::SubmitTime {
            days,
            neutral_notice_on,
            itemized_notice_on,
            ..
        } => {
            case.submit_time_claim(
                TimeClaim {
                    days: *days,
                    neutral_notice: notice(*neutral_notice_on),
                    itemized_notice: notice(*itemized_notice_on),
                },
                at,
            )?;
        }
        Step::RespondBasis {
            verdict,
            objections,
            ..
        } => {
            let bundle = case.record_basis_response(
                BasisResponse {
                    verdict: *verdict,
                    rationale: String::new(),
                    objections: objections.iter().copied().collect(),
                },
                at,
            )?;
            *last_promotion = Some(bundle);
        }
        Step::RespondCompensation {
            verdict,
            approved_amount,
            method,
            objections,
            triggers,
            ..
        } => {
            case.record_compensation_response(
                CompensationResponse {
                    verdict: *verdict,
                    approved_amount: *approved_amount,
                    method: *method,
                    rationale: String::new(),
                    objections: objections.iter().copied().collect(),
                    triggers: triggers.iter().copied().collect(),
                },
                at,
            )?;
        }
        Step::RespondTime {
            verdict,
            approved_days,
            objections,
            triggers,
            ..
        } => {
            case.record_time_response(
                TimeResponse {
                    verdict: *verdict,
                    approved_days: *approved_days,
                    rationale: String::new(),
                    objections: objections.iter().copied().collect(),
                    triggers: triggers.iter().copied().collect(),
                },
                at,
            )?;
        }
        Step::Withdraw { track, .. } => case.withdraw(*track, at)?,
        Step::IssueChangeOrder { .. } => case.issue_change_order(at)?,
        Step::Accelerate { on, estimated_cost } => case.set_acceleration(
            Acceleration {
                declared: true,
                declared_on: Some(*on),
                estimated_cost: *estimated_cost,
                ..Default::default()
            },
            at,
        ),
    }
    Ok(())
}

/// Replay a fixture on a fresh case.
pub fn run_fixture(fixture: &ScenarioFixture) -> SpecResult<ScenarioRun> {
    let created_at = fixture
        .steps
        .first()
        .map(|step| timestamp(step.on()))
        .unwrap_or_else(Utc::now);
    let mut case = Case::new(fixture.title.clone(), created_at);
    let mut last_promotion = None;
    let mut step_errors = BTreeMap::new();

    for (index, step) in fixture.steps.iter().enumerate() {
        let number = index + 1;
        let expected = fixture
            .expect
            .step_errors
            .iter()
            .find(|expected| expected.step == number);
        match (apply_step(&mut case, step, &mut last_promotion), expected) {
            (Ok(()), None) => {}
            (Err(err), Some(expected)) if err.to_string().contains(&expected.contains) => {
                step_errors.insert(number, err);
            }
            (Err(err), None) => {
                return Err(SpecError::Step {
                    step: number,
                    action: step.action().to_string(),
                    source: err,
                });
            }
            (outcome, Some(expected)) => {
                return Err(SpecError::UnexpectedOutcome {
                    step: number,
                    action: step.action().to_string(),
                    expected: expected.contains.clone(),
                    actual: match outcome {
                        Ok(()) => "success".to_string(),
                        Err(err) => format!("`{}`", err),
                    },
                });
            }
        }
    }

    let assessment = assess_case(&case, &fixture.config).map_err(SpecError::Assess)?;
    Ok(ScenarioRun {
        case,
        assessment,
        last_promotion,
        step_errors,
    })
}

// ============================================================================
// Expectation checks
// ============================================================================

/// Outcome of one expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionOutcome {
    Passed,
    Mismatch { expected: String, actual: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    /// Dotted path of the expectation, e.g. `points.basis_notice.status`.
    pub name: String,
    pub outcome: AssertionOutcome,
}

/// All expectation outcomes for one fixture.
#[derive(Debug, Clone, Default)]
pub struct ScenarioResult {
    pub passed: Vec<AssertionResult>,
    pub failed: Vec<AssertionResult>,
}

impl ScenarioResult {
    pub fn new() -> Self {
        Self::default()
    }

    fn check<T: PartialEq + Debug>(&mut self, name: impl Into<String>, expected: &T, actual: &T) {
        let name = name.into();
        if expected == actual {
            self.passed.push(AssertionResult {
                name,
                outcome: AssertionOutcome::Passed,
            });
        } else {
            self.failed.push(AssertionResult {
                name,
                outcome: AssertionOutcome::Mismatch {
                    expected: format!("{:?}", expected),
                    actual: format!("{:?}", actual),
                },
            });
        }
    }

    fn check_consequence(
        &mut self,
        name: &str,
        consequence: Option<&Consequence>,
        severity: &Option<Severity>,
        contains: &[String],
    ) {
        let consequence = match consequence {
            Some(consequence) => consequence,
            None => {
                self.check(format!("{}.present", name), &true, &false);
                return;
            }
        };
        if let Some(severity) = severity {
            self.check(format!("{}.severity", name), severity, &consequence.severity);
        }
        for needle in contains {
            let found = consequence.text.contains(needle.as_str());
            self.check(format!("{}.contains({:?})", name, needle), &true, &found);
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "{} passed, {} failed",
            self.passed.len(),
            self.failed.len()
        )];
        for result in &self.failed {
            if let AssertionOutcome::Mismatch { expected, actual } = &result.outcome {
                lines.push(format!(
                    "  {}: expected {}, got {}",
                    result.name, expected, actual
                ));
            }
        }
        lines.join("\n")
    }
}

/// Compare a run with the fixture's expectations.
pub fn check_expectations(expect: &Expectations, run: &ScenarioRun) -> ScenarioResult {
    let mut result = ScenarioResult::new();
    let assessment = &run.assessment;

    if let Some(status) = &expect.status {
        result.check("status", status, &assessment.status);
    }
    if let Some(can_issue) = &expect.can_issue_change_order {
        result.check(
            "can_issue_change_order",
            can_issue,
            &assessment.can_issue_change_order,
        );
    }
    if let Some(tracks) = &expect.subsidiary_tracks {
        result.check("subsidiary_tracks", tracks, &assessment.subsidiary_tracks);
    }
    if let Some(promoted) = &expect.promoted {
        let actual: Vec<TrackKind> = run
            .last_promotion
            .as_ref()
            .map(|bundle| bundle.plan.promote.iter().copied().collect())
            .unwrap_or_default();
        result.check("promoted", promoted, &actual);
    }
    if let Some(days) = &expect.rejected_days {
        result.check("rejected_days", days, &run.case.rejected_days());
    }
    if let Some(ceiling) = &expect.acceleration_ceiling {
        let actual = assessment.acceleration.as_ref().map(|a| a.cost_ceiling);
        result.check("acceleration_ceiling", &Some(*ceiling), &actual);
    }
    if let Some(within) = &expect.within_ceiling {
        let actual = assessment.acceleration.as_ref().map(|a| a.within_ceiling);
        result.check("within_ceiling", &Some(*within), &actual);
    }
    if let Some(next) = &expect.next_action {
        match &assessment.next_action {
            None => result.check("next_action.none", &next.none, &true),
            Some(action) => {
                result.check("next_action.none", &next.none, &false);
                if let Some(role) = &next.role {
                    result.check("next_action.role", role, &action.role);
                }
                if next.track.is_some() {
                    result.check("next_action.track", &next.track, &action.owning_track);
                }
                if let Some(needle) = &next.contains {
                    let found = action.description.contains(needle.as_str());
                    result.check(format!("next_action.contains({:?})", needle), &true, &found);
                }
            }
        }
    }

    for point in &expect.points {
        let evaluation = assessment.preclusion.get(point.point);
        let name = format!("points.{:?}", point.point);
        result.check(format!("{}.status", name), &point.status, &evaluation.status);
        if let Some(late) = &point.late {
            result.check(format!("{}.late", name), late, &evaluation.late);
        }
    }

    for (i, basis) in expect.basis_consequence.iter().enumerate() {
        let proposed = BasisResponse {
            verdict: basis.verdict,
            rationale: String::new(),
            objections: basis.objections.iter().copied().collect(),
        };
        let consequence = basis_consequence(&run.case.basis_context(&proposed));
        let name = format!("basis_consequence[{}]", i);
        result.check_consequence(&name, consequence.as_ref(), &basis.severity, &basis.contains);
        if let (Some(reversal), Some(consequence)) = (&basis.reversal, &consequence) {
            result.check(
                format!("{}.reversal", name),
                reversal,
                &consequence.reversal_text.is_some(),
            );
        }
    }

    for (i, compensation) in expect.compensation_consequence.iter().enumerate() {
        let proposed = CompensationResponse {
            verdict: compensation.verdict,
            approved_amount: compensation.approved_amount,
            method: compensation.method,
            rationale: String::new(),
            objections: Default::default(),
            triggers: compensation.triggers.iter().copied().collect(),
        };
        let consequence = compensation_consequence(&run.case.compensation_context(&proposed));
        result.check_consequence(
            &format!("compensation_consequence[{}]", i),
            consequence.as_ref(),
            &compensation.severity,
            &compensation.contains,
        );
    }

    for (i, time) in expect.time_consequence.iter().enumerate() {
        let proposed = TimeResponse {
            verdict: time.verdict,
            approved_days: time.approved_days,
            rationale: String::new(),
            objections: time.objections.iter().copied().collect(),
            triggers: time.triggers.iter().copied().collect(),
        };
        let consequence = time_consequence(&run.case.time_context(&proposed));
        result.check_consequence(
            &format!("time_consequence[{}]", i),
            consequence.as_ref(),
            &time.severity,
            &time.contains,
        );
    }

    result
}

/// Replay a fixture and check its expectations.
pub fn run_and_check(fixture: &ScenarioFixture) -> SpecResult<ScenarioResult> {
    let run = run_fixture(fixture)?;
    Ok(check_expectations(&fixture.expect, &run))
}
