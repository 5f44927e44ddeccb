//! The syntax extractor: source text to tree to structural facts.
//!
//! Everything here re-derives its data per call. A subject is re-parsed
//! on every check, so no state leaks between checks and repeated analysis
//! of the same source always agrees with itself.

use ruff_python_ast::visitor::{self, Visitor};
use ruff_python_ast::{Expr, ModModule, Stmt};
use ruff_text_size::Ranged;

use crate::error::{AnalysisError, UnsupportedShape};
use crate::location::{LineIndex, Location};
use crate::subject::Inspectable;

/// One call expression's target, reduced to its trailing name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CallTarget {
    /// The rightmost name of the called expression: `np.sum(x)` yields
    /// `sum`, discarding the receiver.
    pub name: String,
    /// Where the call appears in the subject's source.
    pub location: Location,
}

/// A subject's source parsed into a module tree, plus its line table.
pub(crate) struct ParsedSource {
    pub module: ModModule,
    pub lines: LineIndex,
}

/// Retrieves and parses a subject's source text.
pub(crate) fn parse_source(func: &impl Inspectable) -> Result<ParsedSource, AnalysisError> {
    let Some(source) = func.source_text() else {
        return Err(AnalysisError::SourceUnavailable {
            function: func.qualified_name().to_string(),
        });
    };
    let lines = LineIndex::new(source);
    match ruff_python_parser::parse_module(source) {
        Ok(parsed) => Ok(ParsedSource {
            module: parsed.into_syntax(),
            lines,
        }),
        Err(err) => Err(AnalysisError::Parse {
            function: func.qualified_name().to_string(),
            message: err.error.to_string(),
            location: lines.location(err.location.start()),
        }),
    }
}

/// Extracts the trailing name from a call-target or assignment-source
/// expression.
///
/// A plain name yields itself; an attribute access yields the final
/// attribute only. Any other shape is rejected rather than skipped,
/// since a silently dropped target could hide a forbidden or required
/// call.
pub(crate) fn extract_name(expr: &Expr) -> Result<&str, UnsupportedShape> {
    match expr {
        Expr::Name(name) => Ok(name.id.as_str()),
        Expr::Attribute(attribute) => Ok(attribute.attr.as_str()),
        other => Err(UnsupportedShape {
            shape: describe_expr(other),
            range: other.range(),
        }),
    }
}

/// Short human description of an expression shape the extractor rejects.
fn describe_expr(expr: &Expr) -> &'static str {
    match expr {
        Expr::Call(_) => "a call expression",
        Expr::Subscript(_) => "a subscript expression",
        Expr::Lambda(_) => "a lambda expression",
        Expr::Named(_) => "a named expression",
        Expr::BinOp(_) | Expr::BoolOp(_) | Expr::UnaryOp(_) | Expr::Compare(_) => {
            "an operator expression"
        }
        Expr::StringLiteral(_)
        | Expr::BytesLiteral(_)
        | Expr::NumberLiteral(_)
        | Expr::BooleanLiteral(_)
        | Expr::NoneLiteral(_)
        | Expr::EllipsisLiteral(_) => "a literal",
        _ => "an unsupported expression",
    }
}

/// Collects every call expression's target name in the subject's source.
///
/// Duplicates are preserved: a name called three times appears three
/// times. The walk covers the whole tree, so calls inside conditionals,
/// nested functions, comprehensions, decorators, and default arguments
/// are all included. Within straight-line code targets appear in source
/// order; callers must not rely on anything finer.
pub fn call_targets(func: &impl Inspectable) -> Result<Vec<CallTarget>, AnalysisError> {
    let parsed = parse_source(func)?;
    let mut collector = CallCollector {
        lines: &parsed.lines,
        targets: Vec::new(),
        stop: None,
    };
    for stmt in &parsed.module.body {
        collector.visit_stmt(stmt);
    }
    if let Some(unsupported) = collector.stop {
        return Err(unsupported.into_error(func.qualified_name(), &parsed.lines));
    }
    tracing::trace!(
        function = func.qualified_name(),
        targets = collector.targets.len(),
        "collected call targets"
    );
    Ok(collector.targets)
}

/// Pre-order walk recording each call's target name, stopping at the
/// first target shape name extraction cannot handle.
struct CallCollector<'a> {
    lines: &'a LineIndex,
    targets: Vec<CallTarget>,
    stop: Option<UnsupportedShape>,
}

impl<'ast> Visitor<'ast> for CallCollector<'_> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if self.stop.is_some() {
            return;
        }
        visitor::walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        if self.stop.is_some() {
            return;
        }
        if let Expr::Call(call) = expr {
            match extract_name(&call.func) {
                Ok(name) => self.targets.push(CallTarget {
                    name: name.to_string(),
                    location: self.lines.location(call.range().start()),
                }),
                Err(unsupported) => {
                    self.stop = Some(unsupported);
                    return;
                }
            }
        }
        visitor::walk_expr(self, expr);
    }
}
