//! Best-effort identifier location used to place the cursor on a method.
//!
//! This is a text heuristic, not a parser. It sits behind
//! [`IdentifierLocator`] so a real symbol index can replace it without
//! touching the strategy code.

use regex::Regex;
use serde::Serialize;

/// Capability: find where `name` is declared or called in `text`.
pub trait IdentifierLocator {
    /// Character (not byte) offset of the first hit.
    fn locate_identifier(&self, text: &str, name: &str) -> Option<usize>;
}

/// First case-sensitive `\b<name>\s*(` occurrence.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexLocator;

impl IdentifierLocator for RegexLocator {
    fn locate_identifier(&self, text: &str, name: &str) -> Option<usize> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let re = Regex::new(&format!(r"\b{}\s*\(", regex::escape(name))).ok()?;
        let m = re.find(text)?;
        Some(text[..m.start()].chars().count())
    }
}

/// Cursor target handed to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reveal {
    pub char_offset: usize,
    /// 1-based.
    pub line: usize,
    /// 1-based, in characters.
    pub column: usize,
}

impl Reveal {
    pub fn at(text: &str, char_offset: usize) -> Self {
        let (line, column) = line_col_at(text, char_offset);
        Self {
            char_offset,
            line,
            column,
        }
    }
}

/// 1-based line/column of a character offset (clamped to the end of text).
pub fn line_col_at(text: &str, char_offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for c in text.chars().take(char_offset) {
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// Locate `method` in `text` and build a [`Reveal`] for it.
pub fn reveal_for<L: IdentifierLocator>(locator: &L, text: &str, method: &str) -> Option<Reveal> {
    locator
        .locate_identifier(text, method)
        .map(|off| Reveal::at(text, off))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = "public class Foo {\n    // runAll later\n    public void runAll (Integer x) {\n        runAllHelper(x);\n    }\n}\n";

    #[test]
    fn finds_declaration_with_space_before_paren() {
        let off = RegexLocator.locate_identifier(SRC, "runAll").unwrap();
        let (line, col) = line_col_at(SRC, off);
        assert_eq!(line, 3);
        assert_eq!(col, 17);
    }

    #[test]
    fn word_boundary_and_case_sensitive() {
        assert!(RegexLocator.locate_identifier(SRC, "AllHelper").is_none());
        assert!(RegexLocator.locate_identifier(SRC, "runall").is_none());
        assert!(RegexLocator.locate_identifier(SRC, "").is_none());
    }

    #[test]
    fn metacharacters_are_escaped() {
        assert!(RegexLocator.locate_identifier("a.b(", "a.b").is_some());
        assert!(RegexLocator.locate_identifier("axb(", "a.b").is_none());
    }

    #[test]
    fn offsets_count_characters() {
        let text = "// é\nfoo()";
        let off = RegexLocator.locate_identifier(text, "foo").unwrap();
        assert_eq!(off, 5);
        assert_eq!(Reveal::at(text, off).line, 2);
        assert_eq!(Reveal::at(text, off).column, 1);
    }
}
