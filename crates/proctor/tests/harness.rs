//! Suite assembly, selection, and report rendering.

use pretty_assertions::assert_eq;
use proctor::{
    CheckResult, Outcome, RunReport, Subject, Suite, Verbosity, assert_calling, assert_no_loops,
    assert_not_calling, suite,
};

/// Grader-defined params: sources live in typed fields, not in a bag of
/// keyword arguments.
struct Params {
    total_source: String,
}

impl Params {
    fn total(&self) -> Subject {
        Subject::new("submission.total", self.total_source.as_str())
    }
}

fn uses_helper(p: &Params) -> CheckResult {
    assert_calling(&p.total(), &["add"])
}

fn avoids_builtin(p: &Params) -> CheckResult {
    assert_not_calling(&p.total(), &["sum"])
}

fn no_manual_loops(p: &Params) -> CheckResult {
    assert_no_loops(&p.total())
}

fn grading_suite() -> Suite<Params> {
    suite![uses_helper, avoids_builtin, no_manual_loops]
}

fn passing_params() -> Params {
    Params {
        total_source: "def total(xs):\n    return 0 if not xs else add(xs[0], total(xs[1:]))\n"
            .to_string(),
    }
}

fn looping_params() -> Params {
    Params {
        total_source: concat!(
            "def total(xs):\n",
            "    acc = 0\n",
            "    for x in xs:\n",
            "        acc = add(acc, x)\n",
            "    return acc\n",
        )
        .to_string(),
    }
}

fn unparseable_params() -> Params {
    Params {
        total_source: "def total(:\n".to_string(),
    }
}

#[test]
fn the_macro_names_cases_after_their_functions() {
    let suite = grading_suite();
    assert_eq!(suite.len(), 3);
    let names: Vec<&str> = suite.case_names().collect();
    assert_eq!(names, ["uses_helper", "avoids_builtin", "no_manual_loops"]);
}

#[test]
fn a_green_run_counts_every_pass() {
    let report = grading_suite().run(&passing_params());
    assert_eq!(report.run_count(), 3);
    assert_eq!(report.passed_count(), 3);
    assert_eq!(report.failure_count(), 0);
    assert_eq!(report.error_count(), 0);
    assert!(report.was_successful());
}

#[test]
fn failures_are_distinguished_from_passes() {
    let report = grading_suite().run(&looping_params());
    assert_eq!(report.passed_count(), 2);
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.error_count(), 0);
    assert!(!report.was_successful());
    let (name, failure) = report.failures().next().expect("one failed case");
    assert_eq!(name, "no_manual_loops");
    assert!(failure.to_string().contains("for loop"));
}

#[test]
fn analysis_errors_are_errored_cases_not_failures() {
    let report = grading_suite().run(&unparseable_params());
    assert_eq!(report.passed_count(), 0);
    assert_eq!(report.failure_count(), 0);
    assert_eq!(report.error_count(), 3);
    assert!(!report.was_successful());
    let (name, error) = report.errors().next().expect("an errored case");
    assert_eq!(name, "uses_helper");
    assert!(error.to_string().contains("cannot parse"));
}

#[test]
fn outcomes_carry_the_typed_failure() {
    let report = grading_suite().run(&looping_params());
    match &report.outcomes()[2].outcome {
        Outcome::Failed(failure) => assert_eq!(failure.function, "submission.total"),
        other => panic!("expected a failed case, got {other:?}"),
    }
}

#[test]
fn a_selection_runs_in_the_given_order() {
    let report = grading_suite()
        .run_named("no_manual_loops, uses_helper", &passing_params())
        .expect("both names are known");
    let names: Vec<&str> = report.outcomes().iter().map(|c| c.case.as_str()).collect();
    assert_eq!(names, ["no_manual_loops", "uses_helper"]);
}

#[test]
fn an_unknown_selection_fails_before_running_anything() {
    let err = grading_suite()
        .run_named("uses_helper,nope", &passing_params())
        .unwrap_err();
    assert_eq!(err.name, "nope");
    let message = err.to_string();
    assert!(message.contains("no check case named 'nope'"), "message: {message}");
    assert!(message.contains("uses_helper"), "message: {message}");
}

#[test]
fn empty_selection_entries_are_skipped() {
    let report = grading_suite()
        .run_named(" uses_helper , ", &passing_params())
        .expect("selection should resolve");
    assert_eq!(report.run_count(), 1);
}

#[test]
fn verbose_rendering_matches_the_classic_layout() {
    let report = grading_suite().run(&looping_params());
    let sep = "-".repeat(70);
    let expected = format!(
        "uses_helper ... ok\n\
         avoids_builtin ... ok\n\
         no_manual_loops ... FAIL\n\
         \n\
         FAIL: no_manual_loops\n\
         \x20   manual loops are not allowed inside 'submission.total': for loop at 3:5\n\
         \n\
         {sep}\n\
         Ran 3 checks: 2 passed, 1 failed, 0 errored\n"
    );
    assert_eq!(report.render(Verbosity::Verbose), expected);
}

#[test]
fn progress_rendering_uses_one_character_per_case() {
    let report = grading_suite().run(&looping_params());
    let text = report.render(Verbosity::Progress);
    assert!(text.starts_with("..F\n"), "rendered: {text}");
    assert!(text.ends_with("Ran 3 checks: 2 passed, 1 failed, 0 errored\n"));
}

#[test]
fn quiet_rendering_is_just_the_summary() {
    let report = grading_suite().run(&passing_params());
    assert_eq!(
        report.render(Verbosity::Quiet),
        "Ran 3 checks: 3 passed, 0 failed, 0 errored\n"
    );
}

#[test]
fn a_single_case_is_not_pluralized() {
    let report = grading_suite()
        .run_named("uses_helper", &passing_params())
        .expect("the case exists");
    assert_eq!(
        report.render(Verbosity::Quiet),
        "Ran 1 check: 1 passed, 0 failed, 0 errored\n"
    );
}

#[test]
fn eval_selects_runs_and_reports() {
    let report = proctor::eval(
        &grading_suite(),
        Some("uses_helper"),
        Verbosity::Quiet,
        &passing_params(),
    )
    .expect("selection should resolve");
    assert_eq!(report.run_count(), 1);
    assert!(report.was_successful());
}

#[test]
fn eval_rejects_unknown_selections() {
    let err = proctor::eval(
        &grading_suite(),
        Some("missing_case"),
        Verbosity::Quiet,
        &passing_params(),
    )
    .unwrap_err();
    assert_eq!(err.name, "missing_case");
}

#[test]
fn reports_round_trip_through_serde() {
    let report = grading_suite().run(&looping_params());
    let json = serde_json::to_string(&report).expect("report should serialize");
    let back: RunReport = serde_json::from_str(&json).expect("report should deserialize");
    assert_eq!(back, report);
}
