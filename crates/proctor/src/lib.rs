//! Structural grading checks for Python functions.
//!
//! Grading usually asserts what a submitted function *returns*. This
//! crate asserts how the result is *computed*: each check parses the
//! function's own source text into a syntax tree and walks it for the
//! structures an exercise requires or forbids.
//!
//! - [`assert_calling`] requires that named helpers are actually called.
//! - [`assert_not_calling`] forbids calling named functions, and also
//!   catches the classic dodge of aliasing one first (`s = sum`).
//! - [`assert_no_loops`] forbids manual iteration (`for`, `while`, list
//!   comprehensions, generator expressions) so that recursion is the
//!   only way to repeat.
//!
//! ```
//! use proctor::{Subject, assert_calling, assert_no_loops, assert_not_calling};
//!
//! let f = Subject::new(
//!     "submission.total",
//!     "def total(xs):\n    return 0 if not xs else xs[0] + total(xs[1:])\n",
//! );
//! assert_no_loops(&f).unwrap();
//! assert_not_calling(&f, &["sum"]).unwrap();
//! assert_calling(&f, &["total"]).unwrap();
//! ```
//!
//! Checks return [`CheckResult`] rather than panicking. A violated
//! requirement is a [`Failure`]; a subject the checker cannot understand
//! is an [`AnalysisError`]; the [`Suite`] harness reports the two
//! separately, the way a test runner separates failures from errors.
//!
//! Analysis is purely syntactic and stateless. Every check re-parses the
//! subject, nothing is executed, imports are not resolved, and aliases
//! are not followed beyond the assignment that creates them.

mod checks;
mod error;
mod harness;
mod inspect;
mod location;
mod subject;

pub use checks::{assert_calling, assert_no_loops, assert_not_calling};
pub use error::{AnalysisError, CheckError, CheckResult, Failure, FailureKind, LoopKind};
pub use harness::{Case, CaseOutcome, Outcome, RunReport, Suite, UnknownCase, Verbosity, eval};
pub use inspect::{CallTarget, call_targets};
pub use location::Location;
pub use subject::{Inspectable, Subject};
