//! The function under test: a qualified name plus retrievable source text.

/// A callable whose source structure can be analyzed.
///
/// The two capabilities every check needs: a dotted display name for
/// failure messages, and the function's own source text. Implement this
/// for your own carrier type when subjects come from somewhere richer
/// than a string, such as a store of graded submissions or an embedded
/// interpreter.
pub trait Inspectable {
    /// The dotted name identifying the function in messages.
    fn qualified_name(&self) -> &str;

    /// The function's source text, or `None` when no source is
    /// retrievable (a callable built at runtime, for example).
    fn source_text(&self) -> Option<&str>;
}

/// The stock [`Inspectable`]: a qualified name and an owned source string.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Subject {
    qualified_name: String,
    source: Option<String>,
}

impl Subject {
    /// Creates a subject from a qualified name and its source text.
    #[must_use]
    pub fn new(qualified_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            source: Some(source.into()),
        }
    }

    /// Creates a subject with no retrievable source.
    ///
    /// Every check on such a subject reports a source-unavailable
    /// analysis error rather than passing or failing.
    #[must_use]
    pub fn without_source(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            source: None,
        }
    }
}

impl Inspectable for Subject {
    fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    fn source_text(&self) -> Option<&str> {
        self.source.as_deref()
    }
}
