//! The error taxonomy: analysis errors versus check failures.
//!
//! A check that fails and a subject that cannot be analyzed are different
//! outcomes. [`Failure`] is the expected result of a violated requirement;
//! [`AnalysisError`] means the checker could not understand the code at
//! all. The two never masquerade as each other, and the report layer
//! counts them separately the way a test runner separates failures from
//! errors.

use std::fmt;

use ruff_text_size::TextRange;

use crate::location::{LineIndex, Location};

/// Why a subject could not be analyzed at all.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnalysisError {
    /// The subject has no retrievable source text.
    SourceUnavailable {
        /// Qualified name of the subject.
        function: String,
    },
    /// The source text is not valid Python.
    Parse {
        function: String,
        /// The parser's own description of what went wrong.
        message: String,
        location: Location,
    },
    /// A call-target expression has a shape name extraction does not
    /// support, such as calling the result of another call or of a
    /// subscript.
    ///
    /// Never swallowed: skipping such a node could hide a forbidden or
    /// required call, so the walk stops and the error propagates.
    UnsupportedTarget {
        function: String,
        /// Short description of the offending expression shape.
        shape: String,
        location: Location,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnavailable { function } => {
                write!(f, "source for function '{function}' is not available")
            }
            Self::Parse {
                function,
                message,
                location,
            } => {
                write!(
                    f,
                    "cannot parse source for function '{function}' at {location}: {message}"
                )
            }
            Self::UnsupportedTarget {
                function,
                shape,
                location,
            } => {
                write!(
                    f,
                    "cannot extract a call-target name in function '{function}' at {location}: \
                     expected a name or attribute access, got {shape}"
                )
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

/// An unsupported target shape noticed mid-walk, before the subject's
/// name and line table are in scope.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UnsupportedShape {
    pub shape: &'static str,
    pub range: TextRange,
}

impl UnsupportedShape {
    pub(crate) fn into_error(self, function: &str, lines: &LineIndex) -> AnalysisError {
        AnalysisError::UnsupportedTarget {
            function: function.to_string(),
            shape: self.shape.to_string(),
            location: lines.location(self.range.start()),
        }
    }
}

/// The manual-iteration constructs [`assert_no_loops`] rejects.
///
/// [`assert_no_loops`]: crate::assert_no_loops
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, serde::Serialize, serde::Deserialize,
)]
pub enum LoopKind {
    /// A `for` statement, async included.
    #[strum(serialize = "for loop")]
    For,
    /// A `while` statement.
    #[strum(serialize = "while loop")]
    While,
    /// A list comprehension.
    #[strum(serialize = "list comprehension")]
    ListComp,
    /// A generator expression.
    #[strum(serialize = "generator expression")]
    Generator,
}

/// A violated structural requirement.
///
/// This is the expected outcome of a failing check, not an internal
/// error, and it carries enough detail to tell the author what to change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Failure {
    /// Qualified name of the subject that violated the requirement.
    pub function: String,
    /// What was violated, and where.
    pub kind: FailureKind,
}

/// The specific requirement a subject violated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FailureKind {
    /// A forbidden name is called directly.
    ForbiddenCall { name: String, location: Location },
    /// A forbidden name is bound to an alias by a plain assignment.
    ForbiddenAlias { name: String, location: Location },
    /// A required name is never called anywhere in the body.
    MissingCall { name: String },
    /// A manual iteration construct is present.
    ManualLoop { kind: LoopKind, location: Location },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let function = &self.function;
        match &self.kind {
            FailureKind::ForbiddenCall { name, location } => {
                write!(
                    f,
                    "function '{function}' calls forbidden name '{name}' at {location}"
                )
            }
            FailureKind::ForbiddenAlias { name, location } => {
                write!(
                    f,
                    "function '{function}' binds an alias to forbidden name '{name}' at {location}"
                )
            }
            FailureKind::MissingCall { name } => {
                write!(f, "function '{function}' should call '{name}'")
            }
            FailureKind::ManualLoop { kind, location } => {
                write!(
                    f,
                    "manual loops are not allowed inside '{function}': {kind} at {location}"
                )
            }
        }
    }
}

impl std::error::Error for Failure {}

/// What a check returns when it does not pass.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CheckError {
    /// The subject violates the structural requirement: a failed check.
    Failure(Failure),
    /// The subject could not be analyzed: an errored check.
    Analysis(AnalysisError),
}

/// The result of one structural check.
pub type CheckResult = Result<(), CheckError>;

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failure(failure) => failure.fmt(f),
            Self::Analysis(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for CheckError {}

impl From<Failure> for CheckError {
    fn from(failure: Failure) -> Self {
        Self::Failure(failure)
    }
}

impl From<AnalysisError> for CheckError {
    fn from(error: AnalysisError) -> Self {
        Self::Analysis(error)
    }
}
