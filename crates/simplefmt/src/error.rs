//! Errors reported while compiling a single format string.

use crate::{lexer::LexError, parser::SyntaxError, resolve::ResolutionError, syntax::Span};
use std::fmt;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

impl CompileError {
    /// The byte range of the offending input.
    pub fn span(&self) -> Span {
        match self {
            Self::Lex(err) => {
                Span::new(err.position, err.position + err.unexpected.len_utf8())
            }
            Self::Syntax(err) => Span::new(err.position, err.position),
            Self::Resolution(err) => err.span,
        }
    }

    /// Render the error against the source it was produced from, e.g.
    ///
    /// ```text
    /// error: unknown view: `s`
    ///   | v.centerX = s.centerX
    ///   |             ^
    /// ```
    pub fn diagnostic<'a>(&'a self, source: &'a str) -> Diagnostic<'a> {
        Diagnostic {
            error: self,
            source,
        }
    }
}

/// A [`CompileError`] rendered with a caret line under its source.
#[derive(Debug)]
pub struct Diagnostic<'a> {
    error: &'a CompileError,
    source: &'a str,
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self.source;
        let span = self.error.span();
        let start = floor_char_boundary(source, span.start);
        let end = floor_char_boundary(source, span.end.max(start));

        let column = source[..start].chars().count();
        let width = source[start..end].chars().count().max(1);

        writeln!(f, "error: {}", self.error)?;
        writeln!(f, "  | {}", source)?;
        write!(f, "  | {:column$}{:^<width$}", "", "")
    }
}

/// The largest char boundary of `s` not after `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ResolutionErrorKind;

    #[test]
    fn diagnostic_underlines_span() {
        let err = CompileError::from(ResolutionError {
            kind: ResolutionErrorKind::UnknownAttribute,
            name: "bogusAttr".into(),
            span: Span::new(2, 11),
        });
        assert_eq!(
            err.diagnostic("v.bogusAttr = 5").to_string(),
            "error: unknown attribute: `bogusAttr`\n  | v.bogusAttr = 5\n  |   ^^^^^^^^^"
        );
    }

    #[test]
    fn diagnostic_at_end_of_input() {
        let err = CompileError::from(crate::parser::SyntaxError {
            position: 9,
            expected: vec![crate::lexer::TokenKind::Number],
            found: crate::lexer::TokenKind::End,
        });
        let rendered = err.diagnostic("v.left = -").to_string();
        assert!(rendered.ends_with("\n  |          ^"), "{}", rendered);
    }

    #[test]
    fn lex_error_span() {
        let err = CompileError::from(LexError {
            position: 8,
            unexpected: '<',
        });
        assert_eq!(err.span(), Span::new(8, 9));
    }

    #[test]
    fn diagnostic_with_foreign_source() {
        // the span does not fall on a char boundary of this source.
        let err = CompileError::from(LexError {
            position: 2,
            unexpected: '<',
        });
        assert_eq!(
            err.diagnostic("aé").to_string(),
            "error: unexpected character '<' at offset 2\n  | aé\n  |  ^"
        );

        let err = CompileError::from(ResolutionError {
            kind: ResolutionErrorKind::UnknownView,
            name: "ü".into(),
            span: Span::new(1, 40),
        });
        let rendered = err.diagnostic("üv").to_string();
        assert!(rendered.ends_with("\n  | ^^"), "{}", rendered);
    }
}
