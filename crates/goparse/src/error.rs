use thiserror::Error;

/// Compact byte-span used across the crate.
///
/// Lexer and parser report `usize` locations; we store `u32` for
/// compactness. Inputs larger than 4GiB are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32, // exclusive
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        let s = if start > u32::MAX as usize {
            u32::MAX
        } else {
            start as u32
        };
        let e = if end > u32::MAX as usize {
            u32::MAX
        } else {
            end as u32
        };
        Self { start: s, end: e }
    }

    #[inline]
    pub const fn empty_at(pos: usize) -> Self {
        let p = if pos > u32::MAX as usize {
            u32::MAX
        } else {
            pos as u32
        };
        Self { start: p, end: p }
    }

    pub const fn from_range(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagKind {
    Lex,
    Parse,
}

/// One diagnostic produced while lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    pub kind: DiagKind,
    pub span: Span,
    pub message: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    #[error("invalid token")]
    InvalidToken,
    #[error("unterminated comment")]
    UnterminatedComment,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}: {span:?}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    #[inline]
    pub fn diag(&self) -> Diag {
        Diag {
            kind: DiagKind::Lex,
            span: self.span,
            message: self.kind.to_string(),
        }
    }
}

/// Failure of a whole parse run, with every collected diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub diags: Vec<Diag>,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.diags.first() {
            Some(d) => write!(
                f,
                "{} diagnostic(s); first at {}..{}: {}",
                self.diags.len(),
                d.span.start,
                d.span.end,
                d.message
            ),
            None => write!(f, "parse failed"),
        }
    }
}

impl std::error::Error for ParseFailure {}
