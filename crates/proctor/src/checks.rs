//! The three structural assertions.
//!
//! Each check parses the subject's source fresh, walks the tree, and
//! reports the first violation it meets. A violated requirement comes
//! back as a [`Failure`]; a subject the checker cannot understand comes
//! back as an [`AnalysisError`] instead, never as a pass.
//!
//! [`AnalysisError`]: crate::AnalysisError

use ahash::AHashSet;
use ruff_python_ast::visitor::{self, Visitor};
use ruff_python_ast::{Expr, Stmt};
use ruff_text_size::Ranged;

use crate::error::{CheckResult, Failure, FailureKind, LoopKind, UnsupportedShape};
use crate::inspect::{call_targets, extract_name, parse_source};
use crate::location::{LineIndex, Location};
use crate::subject::Inspectable;

/// Asserts that `func` never calls any of `names`, directly or through a
/// one-hop alias.
///
/// Two shapes violate the requirement: a call whose target name is in
/// `names`, and a plain assignment whose right-hand side is a bare name
/// or attribute access ending in one of `names` (`s = sum` is flagged at
/// the assignment, before any call through `s`). An assignment with any
/// other right-hand side cannot create such an alias and is skipped;
/// annotated assignments and walrus bindings are not treated as aliases.
/// Aliases are not followed further, so a reference smuggled through a
/// wrapper call goes unnoticed.
///
/// Call targets are still resolved when `names` is empty, so a target
/// shape the extractor does not support reports an analysis error either
/// way.
pub fn assert_not_calling<S: AsRef<str>>(func: &impl Inspectable, names: &[S]) -> CheckResult {
    let parsed = parse_source(func)?;
    let forbidden: AHashSet<&str> = names.iter().map(AsRef::as_ref).collect();
    let mut walker = NotCallingWalker {
        lines: &parsed.lines,
        forbidden,
        stop: None,
    };
    for stmt in &parsed.module.body {
        walker.visit_stmt(stmt);
    }
    match walker.stop {
        Some(WalkStop::Violation(kind)) => Err(Failure {
            function: func.qualified_name().to_string(),
            kind,
        }
        .into()),
        Some(WalkStop::Unsupported(shape)) => {
            Err(shape.into_error(func.qualified_name(), &parsed.lines).into())
        }
        None => Ok(()),
    }
}

/// Asserts that `func` calls every name in `names` somewhere in its body.
///
/// Membership is checked against the full [`call_targets`] sequence, so a
/// call anywhere counts, whatever its nesting depth. `names` is checked
/// in the given order and the first missing one is reported.
pub fn assert_calling<S: AsRef<str>>(func: &impl Inspectable, names: &[S]) -> CheckResult {
    let targets = call_targets(func)?;
    let called: AHashSet<&str> = targets.iter().map(|target| target.name.as_str()).collect();
    for name in names {
        let name = name.as_ref();
        if !called.contains(name) {
            return Err(Failure {
                function: func.qualified_name().to_string(),
                kind: FailureKind::MissingCall {
                    name: name.to_string(),
                },
            }
            .into());
        }
    }
    Ok(())
}

/// Asserts that `func` contains no manual iteration construct.
///
/// `for` statements (async included), `while` statements, list
/// comprehensions, and generator expressions are rejected anywhere in
/// the tree. Set and dict comprehensions pass, and so does recursion.
/// The check is purely syntactic and never resolves call targets, so it
/// cannot report an unsupported-shape error.
pub fn assert_no_loops(func: &impl Inspectable) -> CheckResult {
    let parsed = parse_source(func)?;
    let mut finder = LoopFinder {
        lines: &parsed.lines,
        found: None,
    };
    for stmt in &parsed.module.body {
        finder.visit_stmt(stmt);
    }
    match finder.found {
        Some((kind, location)) => Err(Failure {
            function: func.qualified_name().to_string(),
            kind: FailureKind::ManualLoop { kind, location },
        }
        .into()),
        None => Ok(()),
    }
}

enum WalkStop {
    Violation(FailureKind),
    Unsupported(UnsupportedShape),
}

/// Walks the tree for the two shapes that violate [`assert_not_calling`],
/// stopping at the first one.
struct NotCallingWalker<'a> {
    lines: &'a LineIndex,
    forbidden: AHashSet<&'a str>,
    stop: Option<WalkStop>,
}

impl<'ast> Visitor<'ast> for NotCallingWalker<'_> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if self.stop.is_some() {
            return;
        }
        if let Stmt::Assign(assign) = stmt {
            let value = assign.value.as_ref();
            if matches!(value, Expr::Name(_) | Expr::Attribute(_)) {
                if let Ok(name) = extract_name(value) {
                    if self.forbidden.contains(name) {
                        self.stop = Some(WalkStop::Violation(FailureKind::ForbiddenAlias {
                            name: name.to_string(),
                            location: self.lines.location(stmt.range().start()),
                        }));
                        return;
                    }
                }
            }
        }
        visitor::walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        if self.stop.is_some() {
            return;
        }
        if let Expr::Call(call) = expr {
            match extract_name(&call.func) {
                Ok(name) if self.forbidden.contains(name) => {
                    self.stop = Some(WalkStop::Violation(FailureKind::ForbiddenCall {
                        name: name.to_string(),
                        location: self.lines.location(call.range().start()),
                    }));
                    return;
                }
                Ok(_) => {}
                Err(unsupported) => {
                    self.stop = Some(WalkStop::Unsupported(unsupported));
                    return;
                }
            }
        }
        visitor::walk_expr(self, expr);
    }
}

/// Finds the first for/while/list-comprehension/generator node.
struct LoopFinder<'a> {
    lines: &'a LineIndex,
    found: Option<(LoopKind, Location)>,
}

impl<'ast> Visitor<'ast> for LoopFinder<'_> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if self.found.is_some() {
            return;
        }
        let kind = match stmt {
            Stmt::For(_) => Some(LoopKind::For),
            Stmt::While(_) => Some(LoopKind::While),
            _ => None,
        };
        if let Some(kind) = kind {
            self.found = Some((kind, self.lines.location(stmt.range().start())));
            return;
        }
        visitor::walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        if self.found.is_some() {
            return;
        }
        let kind = match expr {
            Expr::ListComp(_) => Some(LoopKind::ListComp),
            Expr::Generator(_) => Some(LoopKind::Generator),
            _ => None,
        };
        if let Some(kind) = kind {
            self.found = Some((kind, self.lines.location(expr.range().start())));
            return;
        }
        visitor::walk_expr(self, expr);
    }
}
