//! Behavior of the call-target extractor.

use pretty_assertions::assert_eq;
use proctor::{AnalysisError, Location, Subject, call_targets};

fn names(source: &str) -> Vec<String> {
    let subject = Subject::new("m.f", source);
    call_targets(&subject)
        .expect("extraction should succeed")
        .into_iter()
        .map(|target| target.name)
        .collect()
}

fn sorted_names(source: &str) -> Vec<String> {
    let mut names = names(source);
    names.sort();
    names
}

#[test]
fn counts_every_call_including_duplicates() {
    let source = "def f(xs):\n    a = sum(xs)\n    b = sum(xs)\n    return sum([a, b])\n";
    assert_eq!(names(source), ["sum", "sum", "sum"]);
}

#[test]
fn strips_the_receiver_from_method_calls() {
    let source = "def f(x):\n    return np.linalg.norm(x) + math.sqrt(x)\n";
    assert_eq!(names(source), ["norm", "sqrt"]);
}

#[test]
fn straight_line_calls_come_back_in_source_order() {
    let source = "def f(x):\n    a = first(x)\n    b = second(a)\n    return third(b)\n";
    assert_eq!(names(source), ["first", "second", "third"]);
}

#[test]
fn nested_scopes_are_walked() {
    let source = concat!(
        "def outer(xs):\n",
        "    if check(xs):\n",
        "        def inner(y):\n",
        "            return transform(y)\n",
        "        return [inner(x) for x in prepare(xs)]\n",
        "    return fallback(xs)\n",
    );
    assert_eq!(
        sorted_names(source),
        ["check", "fallback", "inner", "prepare", "transform"]
    );
}

#[test]
fn decorators_and_default_arguments_are_walked() {
    let source = "@register(stage)\ndef f(x=seed()):\n    return x\n";
    assert_eq!(sorted_names(source), ["register", "seed"]);
}

#[test]
fn bare_references_are_not_calls() {
    let source = "def f(xs):\n    g = map\n    return xs\n";
    assert_eq!(names(source), Vec::<String>::new());
}

#[test]
fn locations_point_at_the_call() {
    let subject = Subject::new("m.f", "def f(x):\n    return helper(x)\n");
    let targets = call_targets(&subject).expect("extraction should succeed");
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].name, "helper");
    assert_eq!(targets[0].location, Location { line: 2, column: 12 });
}

#[test]
fn calling_a_call_result_is_unsupported() {
    let subject = Subject::new("m.f", "def f():\n    return factory()()\n");
    match call_targets(&subject) {
        Err(AnalysisError::UnsupportedTarget {
            function,
            shape,
            location,
        }) => {
            assert_eq!(function, "m.f");
            assert_eq!(shape, "a call expression");
            assert_eq!(location, Location { line: 2, column: 12 });
        }
        other => panic!("expected an unsupported-target error, got {other:?}"),
    }
}

#[test]
fn calling_a_subscript_is_unsupported() {
    let subject = Subject::new("m.f", "def f(fns):\n    return fns[0](1)\n");
    match call_targets(&subject) {
        Err(AnalysisError::UnsupportedTarget { shape, .. }) => {
            assert_eq!(shape, "a subscript expression");
        }
        other => panic!("expected an unsupported-target error, got {other:?}"),
    }
}

#[test]
fn missing_source_is_reported() {
    let subject = Subject::without_source("built.dynamically");
    match call_targets(&subject) {
        Err(AnalysisError::SourceUnavailable { function }) => {
            assert_eq!(function, "built.dynamically");
        }
        other => panic!("expected a source-unavailable error, got {other:?}"),
    }
}

#[test]
fn syntax_errors_are_reported_with_a_location() {
    let subject = Subject::new("m.f", "def f(:\n    pass\n");
    match call_targets(&subject) {
        Err(AnalysisError::Parse {
            function,
            message,
            location,
        }) => {
            assert_eq!(function, "m.f");
            assert!(!message.is_empty());
            assert_eq!(location.line, 1);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn indented_source_does_not_parse() {
    // Source captured from inside a class body keeps its indentation and
    // is not a valid module on its own.
    let subject = Subject::new("m.C.f", "    def f(self):\n        return 1\n");
    assert!(matches!(
        call_targets(&subject),
        Err(AnalysisError::Parse { .. })
    ));
}

#[test]
fn repeated_extraction_agrees_with_itself() {
    let subject = Subject::new("m.f", "def f(xs):\n    return wrap(sum(xs))\n");
    let first = call_targets(&subject).expect("extraction should succeed");
    let second = call_targets(&subject).expect("extraction should succeed");
    assert_eq!(first, second);
}
