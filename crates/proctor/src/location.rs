//! Byte-offset to line/column conversion for diagnostics.

use std::fmt;

use ruff_text_size::TextSize;

/// A 1-based line and column in the analyzed source.
///
/// Columns count bytes within the line, matching Python's own
/// `col_offset` convention for non-ASCII source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start offset of every line in one source string, built once per parse.
#[derive(Debug, Clone)]
pub(crate) struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0u32)];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                let start = TextSize::try_from(i + 1).expect("source length exceeds u32");
                line_starts.push(start);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset into a 1-based line/column pair.
    ///
    /// Offsets past the end of the source map onto the last line.
    pub fn location(&self, offset: TextSize) -> Location {
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        Location {
            line: u32::try_from(line).expect("line count exceeds u32") + 1,
            column: (offset - self.line_starts[line]).to_u32() + 1,
        }
    }
}
