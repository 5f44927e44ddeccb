//! Thin orchestration: named check cases, suites, and the text report.
//!
//! The shape of a classic unit-test runner without owning one: a
//! [`Suite`] runs its cases in order (all of them, or a comma-separated
//! selection), maps each result onto passed/failed/errored, and renders
//! the familiar report. Cases are plain functions over a grader-defined
//! params type; the harness never reads the params itself.

use std::fmt;

use itertools::Itertools;

use crate::error::{AnalysisError, CheckError, CheckResult, Failure};

/// A single named structural check over caller-defined params.
pub struct Case<P> {
    name: &'static str,
    run: fn(&P) -> CheckResult,
}

impl<P> Case<P> {
    /// Creates a named case from a check function.
    #[must_use]
    pub const fn new(name: &'static str, run: fn(&P) -> CheckResult) -> Self {
        Self { name, run }
    }

    /// The case's name, as matched by [`Suite::run_named`] selections.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

// Function pointers are Copy for any `P`; the derives would demand
// `P: Copy` and `P: Clone`.
impl<P> Clone for Case<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Case<P> {}

impl<P> fmt::Debug for Case<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Builds a [`Suite`] from bare check-function names.
///
/// Each function becomes a case named after itself:
///
/// ```
/// use proctor::{CheckResult, Subject, assert_no_loops, suite};
///
/// struct Params {
///     source: String,
/// }
///
/// fn no_manual_loops(p: &Params) -> CheckResult {
///     assert_no_loops(&Subject::new("submission.f", p.source.as_str()))
/// }
///
/// let suite = suite![no_manual_loops];
/// assert_eq!(suite.len(), 1);
/// ```
#[macro_export]
macro_rules! suite {
    ($($case:ident),+ $(,)?) => {
        $crate::Suite::new([$($crate::Case::new(stringify!($case), $case)),+])
    };
}

/// An ordered collection of check cases sharing a params type.
pub struct Suite<P> {
    cases: Vec<Case<P>>,
}

impl<P> Suite<P> {
    /// Builds a suite from cases, run in the given order.
    #[must_use]
    pub fn new(cases: impl IntoIterator<Item = Case<P>>) -> Self {
        Self {
            cases: cases.into_iter().collect(),
        }
    }

    /// Number of registered cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Registered case names, in run order.
    pub fn case_names(&self) -> impl Iterator<Item = &'static str> {
        self.cases.iter().map(|case| case.name)
    }

    /// Runs every case, in registration order.
    #[must_use]
    pub fn run(&self, params: &P) -> RunReport {
        Self::run_cases(self.cases.iter().copied(), params)
    }

    /// Runs a comma-separated selection of cases, in the order given.
    ///
    /// Whitespace around entries is ignored and empty entries are
    /// skipped. Fails before running anything if an entry names no
    /// known case.
    pub fn run_named(&self, names: &str, params: &P) -> Result<RunReport, UnknownCase> {
        let mut selected = Vec::new();
        for entry in names.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            match self.cases.iter().find(|case| case.name == entry) {
                Some(case) => selected.push(*case),
                None => {
                    return Err(UnknownCase {
                        name: entry.to_string(),
                        known: self.case_names().map(ToString::to_string).collect(),
                    });
                }
            }
        }
        Ok(Self::run_cases(selected, params))
    }

    fn run_cases(cases: impl IntoIterator<Item = Case<P>>, params: &P) -> RunReport {
        let cases: Vec<Case<P>> = cases.into_iter().collect();
        tracing::debug!(cases = cases.len(), "running structural checks");
        let mut outcomes = Vec::with_capacity(cases.len());
        for case in cases {
            let outcome = Outcome::from_result((case.run)(params));
            tracing::debug!(case = case.name, outcome = outcome.label(), "check finished");
            outcomes.push(CaseOutcome {
                case: case.name.to_string(),
                outcome,
            });
        }
        RunReport { outcomes }
    }
}

// Manual for the same reason as Case: no `P` bounds.
impl<P> Clone for Suite<P> {
    fn clone(&self) -> Self {
        Self {
            cases: self.cases.clone(),
        }
    }
}

impl<P> fmt::Debug for Suite<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite").field("cases", &self.cases).finish()
    }
}

/// A [`Suite::run_named`] selection named a case that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCase {
    /// The unmatched selection entry.
    pub name: String,
    /// Every case name the suite actually has, in run order.
    pub known: Vec<String>,
}

impl fmt::Display for UnknownCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no check case named '{}'; known cases: {}",
            self.name,
            self.known.iter().join(", ")
        )
    }
}

impl std::error::Error for UnknownCase {}

/// What running one case produced.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Outcome {
    /// The structural requirement holds.
    Passed,
    /// The requirement is violated.
    Failed(Failure),
    /// The subject could not be analyzed.
    Errored(AnalysisError),
}

impl Outcome {
    fn from_result(result: CheckResult) -> Self {
        match result {
            Ok(()) => Self::Passed,
            Err(CheckError::Failure(failure)) => Self::Failed(failure),
            Err(CheckError::Analysis(error)) => Self::Errored(error),
        }
    }

    /// Status word used in verbose report lines.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "ok",
            Self::Failed(_) => "FAIL",
            Self::Errored(_) => "ERROR",
        }
    }

    fn progress_char(&self) -> char {
        match self {
            Self::Passed => '.',
            Self::Failed(_) => 'F',
            Self::Errored(_) => 'E',
        }
    }
}

/// One case's name and outcome within a [`RunReport`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaseOutcome {
    pub case: String,
    pub outcome: Outcome,
}

/// How much detail the rendered report carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Verbosity {
    /// Summary line only.
    Quiet,
    /// One character per case (`.`, `F`, `E`), then details and summary.
    Progress,
    /// One line per case, then details and summary.
    #[default]
    Verbose,
}

/// The aggregated result of one suite run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RunReport {
    outcomes: Vec<CaseOutcome>,
}

impl RunReport {
    /// Number of cases run.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Passed))
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Failed(_)))
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Errored(_)))
    }

    /// True when every case passed.
    #[must_use]
    pub fn was_successful(&self) -> bool {
        self.failure_count() == 0 && self.error_count() == 0
    }

    /// Per-case outcomes, in run order.
    #[must_use]
    pub fn outcomes(&self) -> &[CaseOutcome] {
        &self.outcomes
    }

    /// Names and failures of the failed cases, in run order.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Failure)> {
        self.outcomes.iter().filter_map(|case| match &case.outcome {
            Outcome::Failed(failure) => Some((case.case.as_str(), failure)),
            _ => None,
        })
    }

    /// Names and analysis errors of the errored cases, in run order.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &AnalysisError)> {
        self.outcomes.iter().filter_map(|case| match &case.outcome {
            Outcome::Errored(error) => Some((case.case.as_str(), error)),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|case| pred(&case.outcome))
            .count()
    }

    /// Renders the report in the classic text-runner format.
    #[must_use]
    pub fn render(&self, verbosity: Verbosity) -> String {
        let mut out = String::new();
        // fmt::Write into a String is infallible.
        let _ = self.render_to(&mut out, verbosity);
        out
    }

    /// Writes the report into any formatter-like sink.
    ///
    /// At [`Verbosity::Quiet`] only the summary line is written. The
    /// other two levels add per-case progress up front and one detail
    /// block per failed or errored case, in run order, before the
    /// summary.
    pub fn render_to(&self, out: &mut impl fmt::Write, verbosity: Verbosity) -> fmt::Result {
        match verbosity {
            Verbosity::Quiet => {}
            Verbosity::Progress => {
                for case in &self.outcomes {
                    out.write_char(case.outcome.progress_char())?;
                }
                out.write_char('\n')?;
            }
            Verbosity::Verbose => {
                for case in &self.outcomes {
                    writeln!(out, "{} ... {}", case.case, case.outcome.label())?;
                }
            }
        }
        if verbosity != Verbosity::Quiet {
            for case in &self.outcomes {
                match &case.outcome {
                    Outcome::Passed => {}
                    Outcome::Failed(failure) => {
                        writeln!(out, "\nFAIL: {}\n    {failure}", case.case)?;
                    }
                    Outcome::Errored(error) => {
                        writeln!(out, "\nERROR: {}\n    {error}", case.case)?;
                    }
                }
            }
            writeln!(out, "\n{}", "-".repeat(70))?;
        }
        let plural = if self.run_count() == 1 { "" } else { "s" };
        writeln!(
            out,
            "Ran {} check{plural}: {} passed, {} failed, {} errored",
            self.run_count(),
            self.passed_count(),
            self.failure_count(),
            self.error_count(),
        )
    }
}

/// The one-call grading entry point: selects, runs, prints the report to
/// stderr, and hands back the report for programmatic inspection.
///
/// `selection` is a comma-separated list of case names, or `None` to run
/// the whole suite.
///
/// # Errors
///
/// Fails without running anything if `selection` names an unknown case.
pub fn eval<P>(
    suite: &Suite<P>,
    selection: Option<&str>,
    verbosity: Verbosity,
    params: &P,
) -> Result<RunReport, UnknownCase> {
    let report = match selection {
        Some(names) => suite.run_named(names, params)?,
        None => suite.run(params),
    };
    eprint!("{}", report.render(verbosity));
    Ok(report)
}
