use crate::{
    check_expectations, load_all_fixtures, load_fixture, parse_fixture, run_and_check, run_fixture,
    AssertionOutcome, ScenarioFixture, SpecError,
};
use koe_rules::{CaseStatus, EngineError, TrackKind};
use std::path::Path;

fn fixture(name: &str) -> ScenarioFixture {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name);
    load_fixture(&path).unwrap()
}

#[test]
fn test_all_fixtures_pass() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    for (name, fixture) in load_all_fixtures(&dir).unwrap() {
        let result = run_and_check(&fixture).unwrap_or_else(|e| panic!("{}: {}", name, e));
        assert!(result.all_passed(), "{}\n{}", name, result.summary());
        assert!(!result.passed.is_empty(), "{} checks nothing", name);
    }
}

#[test]
fn test_time_barred_approval() {
    let fixture = fixture("time-barred-approval.toml");
    let run = run_fixture(&fixture).unwrap();
    assert_eq!(run.assessment.status, CaseStatus::UnderNegotiation);
    assert!(run.step_errors.is_empty());
    assert_eq!(run.case.event_count, 2);
}

#[test]
fn test_reversal_promotes_compensation_only() {
    let run = run_fixture(&fixture("reversal.toml")).unwrap();
    let bundle = run.last_promotion.unwrap();
    assert!(bundle.plan.is_reversal);
    assert_eq!(
        bundle.plan.promote.into_iter().collect::<Vec<_>>(),
        vec![TrackKind::Compensation]
    );
    assert!(bundle.cleared.contains_key(&TrackKind::Compensation));
}

#[test]
fn test_expected_step_errors_are_recorded() {
    let run = run_fixture(&fixture("force-majeure.toml")).unwrap();
    assert_eq!(run.step_errors.get(&2), Some(&EngineError::CompensationUnavailable));
    assert!(run.case.basis.locked);
}

#[test]
fn test_unexpected_step_error_aborts() {
    let fixture = parse_fixture(
        r#"
title = "Time claim without basis"

[[steps]]
action = "submit_time"
on = "2025-04-01"
days = 5
"#,
    )
    .unwrap();
    let err = run_fixture(&fixture).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"step 1 (submit_time) failed: the basis claim must be submitted before the time track can be claimed");
}

#[test]
fn test_expected_error_that_does_not_happen() {
    let fixture = parse_fixture(
        r#"
title = "Wrong expectation"

[[steps]]
action = "submit_basis"
on = "2025-04-01"
main = "ENDRING"
subs = ["IRREG"]

[[expect.step_errors]]
step = 1
contains = "category is fixed"
"#,
    )
    .unwrap();
    assert!(matches!(
        run_fixture(&fixture),
        Err(SpecError::UnexpectedOutcome { step: 1, .. })
    ));
}

#[test]
fn test_mismatch_summary() {
    let fixture = parse_fixture(
        r#"
title = "Mismatched expectations"

[[steps]]
action = "submit_basis"
on = "2025-04-01"
main = "ENDRING"
subs = ["IRREG"]
notice_on = "2025-04-01"

[expect]
status = "agreed"

[[expect.points]]
point = "basis_notice"
status = "sent"
"#,
    )
    .unwrap();
    let run = run_fixture(&fixture).unwrap();
    let result = check_expectations(&fixture.expect, &run);
    assert!(!result.all_passed());
    assert_eq!(result.passed.len(), 1);
    assert_eq!(
        result.failed[0].outcome,
        AssertionOutcome::Mismatch {
            expected: "Agreed".into(),
            actual: "UnderReview".into(),
        }
    );
    insta::assert_snapshot!(result.summary(), @r###"
    1 passed, 1 failed
      status: expected Agreed, got UnderReview
    "###);
}
