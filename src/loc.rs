//! Source locations, for diagnostics.

use crate::width::CharWidth;

/// An immutable position into a source buffer: the buffer itself, a byte
/// (unit) index, and the 0-based line number of that index.
///
/// Created once by the [`crate::scanner::Scanner`] per token and carried
/// verbatim on every [`crate::token::Token`] and every diagnostic that
/// points into source text.
#[derive(Debug, Clone, Copy)]
pub struct SourceLocation<'a, U> {
    source: &'a [U],
    index: usize,
    line: usize,
}

impl<'a, U: CharWidth> SourceLocation<'a, U> {
    /// Builds a location for `index` into `source`. `index` must be a unit
    /// offset into `source` (not a byte offset of some other buffer).
    pub fn new(source: &'a [U], index: usize) -> Self {
        let newline = U::from_ascii(b'\n');
        let line = source[..index].iter().filter(|&&u| u == newline).count();
        SourceLocation {
            source,
            index,
            line,
        }
    }

    /// The full source buffer this location points into.
    pub fn source(&self) -> &'a [U] {
        self.source
    }

    /// The 0-based unit index into the source buffer.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The 0-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The text of the source line containing this location, decoded for
    /// display.
    pub fn snippet(&self) -> String {
        let newline = U::from_ascii(b'\n');
        let begin = self.source[..self.index]
            .iter()
            .rposition(|&u| u == newline)
            .map(|p| p + 1)
            .unwrap_or(0);
        let end = self.source[self.index..]
            .iter()
            .position(|&u| u == newline)
            .map(|p| self.index + p)
            .unwrap_or(self.source.len());
        U::render(&self.source[begin..end])
    }

    /// The column (0-based, in units) of this location within its line.
    pub fn column(&self) -> usize {
        let newline = U::from_ascii(b'\n');
        let begin = self.source[..self.index]
            .iter()
            .rposition(|&u| u == newline)
            .map(|p| p + 1)
            .unwrap_or(0);
        self.index - begin
    }

    /// Renders a one-line `line | snippet` block with a caret under the
    /// offending column, the shape every diagnostic in this crate uses.
    pub fn render(&self) -> String {
        format!(
            "{} | {}\n{}^",
            self.line,
            self.snippet(),
            " ".repeat(self.line.to_string().len() + 3 + self.column())
        )
    }
}
