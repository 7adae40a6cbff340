//! Go lexer with automatic semicolon insertion.
//!
//! Built on a Logos DFA over a raw token enum; the public [`Lexer`]
//! wrapper injects semicolons per the Go rules and collects diagnostics.
//! Literal bodies are not validated beyond their token boundaries —
//! interface extraction never evaluates them.

use crate::error::{Diag, LexError, LexErrorKind};
use logos::{Lexer as LogosLexer, Logos};
use std::ops::Range;

#[inline]
fn first_newline_offset(s: &str) -> Option<usize> {
    s.bytes().position(|b| matches!(b, b'\n' | b'\r'))
}

/// Scan `/* ... */` manually; Logos regexes cannot express the
/// non-greedy close, and the comment body must be kept so the wrapper
/// can apply the newline-inside-comment semicolon rule.
fn lex_block_comment(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    use memchr::memchr;

    let rem = lex.remainder().as_bytes();
    let mut search_start = 0;

    while let Some(star_pos) = memchr(b'*', &rem[search_start..]) {
        let abs_pos = search_start + star_pos;
        if rem.get(abs_pos + 1) == Some(&b'/') {
            lex.bump(abs_pos + 2);
            return Ok(());
        }
        search_start = abs_pos + 1;
    }

    lex.bump(rem.len());
    Err(LexErrorKind::UnterminatedComment)
}

// =============================================================================
// Raw token definition (Logos DFA)
// =============================================================================

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t]+")]
#[rustfmt::skip]
enum RawTok {
    #[token("\u{FEFF}")] Bom,

    // Trivia
    #[regex(r"\r\n|\n|\r")] Newline,
    #[regex(r"//[^\n\r]*", logos::skip)] _LineComment,
    #[token("/*", lex_block_comment)]
    BlockComment,

    // Keywords (before Ident)
    #[token("break")] KwBreak,
    #[token("case")] KwCase,
    #[token("chan")] KwChan,
    #[token("const")] KwConst,
    #[token("continue")] KwContinue,
    #[token("default")] KwDefault,
    #[token("defer")] KwDefer,
    #[token("else")] KwElse,
    #[token("fallthrough")] KwFallthrough,
    #[token("for")] KwFor,
    #[token("func")] KwFunc,
    #[token("go")] KwGo,
    #[token("goto")] KwGoto,
    #[token("if")] KwIf,
    #[token("import")] KwImport,
    #[token("interface")] KwInterface,
    #[token("map")] KwMap,
    #[token("package")] KwPackage,
    #[token("range")] KwRange,
    #[token("return")] KwReturn,
    #[token("select")] KwSelect,
    #[token("struct")] KwStruct,
    #[token("switch")] KwSwitch,
    #[token("type")] KwType,
    #[token("var")] KwVar,

    // Identifiers
    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*")] Ident,

    // Numbers (imaginary before float/int so the `i` suffix wins)
    #[regex(r"([0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]+)?|\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?)i")] ImagLit,
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?|[0-9][0-9_]*[eE][+-]?[0-9_]+|\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?")] FloatLit,
    #[regex(r"0[xX][0-9a-fA-F_]+|0[oO][0-7_]+|0[bB][01_]+|[0-9][0-9_]*")] IntLit,

    // Strings / runes
    #[regex(r"`[^`]*`")] RawString,
    #[regex(r#""([^"\\\n\r]|\\.)*""#)] String,
    #[regex(r"'([^'\\\n\r]|\\.)+'")] Rune,

    // Operators
    #[token("...")] Ellipsis,
    #[token("<<=")] ShlAssign,
    #[token(">>=")] ShrAssign,
    #[token("&^=")] AndNotAssign,
    #[token("+=")] AddAssign,
    #[token("-=")] SubAssign,
    #[token("*=")] MulAssign,
    #[token("/=")] DivAssign,
    #[token("%=")] ModAssign,
    #[token("&=")] AndAssign,
    #[token("|=")] OrAssign,
    #[token("^=")] XorAssign,
    #[token("<<")] Shl,
    #[token(">>")] Shr,
    #[token("&^")] AndNot,
    #[token("&&")] LAnd,
    #[token("||")] LOr,
    #[token("==")] EqEq,
    #[token("!=")] NotEq,
    #[token("<=")] Le,
    #[token(">=")] Ge,
    #[token("++")] Inc,
    #[token("--")] Dec,
    #[token(":=")] Define,
    #[token("<-")] Arrow,
    #[token("=")] Assign,
    #[token("+")] Plus,
    #[token("-")] Minus,
    #[token("*")] Star,
    #[token("/")] Slash,
    #[token("%")] Percent,
    #[token("&")] Amp,
    #[token("|")] Pipe,
    #[token("^")] Caret,
    #[token("~")] Tilde,
    #[token("!")] Bang,
    #[token("<")] Lt,
    #[token(">")] Gt,

    // Delimiters
    #[token("(")] LParen,
    #[token(")")] RParen,
    #[token("[")] LBrack,
    #[token("]")] RBrack,
    #[token("{")] LBrace,
    #[token("}")] RBrace,
    #[token(",")] Comma,
    #[token(";")] Semi,
    #[token(":")] Colon,
    #[token(".")] Dot,

    // Catch-all (lowest priority)
    #[regex(r".", priority = 0)] Error,
}

impl RawTok {
    /// Go spec: a semicolon is inserted at a newline after an identifier,
    /// a literal, one of `break continue fallthrough return`, `++`/`--`,
    /// or a closing delimiter.
    #[inline]
    const fn can_insert_semicolon(self) -> bool {
        matches!(
            self,
            Self::Ident
                | Self::IntLit
                | Self::FloatLit
                | Self::ImagLit
                | Self::Rune
                | Self::String
                | Self::RawString
                | Self::KwBreak
                | Self::KwContinue
                | Self::KwFallthrough
                | Self::KwReturn
                | Self::Inc
                | Self::Dec
                | Self::RParen
                | Self::RBrack
                | Self::RBrace
        )
    }

    fn to_token<'src>(self, slice: &'src str) -> Tok<'src> {
        macro_rules! simple_tok {
            ($($raw:ident => $tok:ident),* $(,)?) => {
                match self {
                    Self::Ident => Tok::Ident(slice),
                    Self::IntLit => Tok::IntLit(slice),
                    Self::FloatLit => Tok::FloatLit(slice),
                    Self::ImagLit => Tok::ImagLit(slice),
                    Self::Rune => Tok::RuneLit(slice),
                    Self::String => Tok::StringLit(slice),
                    Self::RawString => Tok::RawStringLit(slice),
                    $(Self::$raw => Tok::$tok,)*
                    // Trivia and BOM are consumed by the wrapper.
                    Self::Newline | Self::_LineComment | Self::BlockComment | Self::Bom => {
                        unreachable!()
                    }
                }
            };
        }

        simple_tok! {
            KwBreak => KwBreak, KwCase => KwCase, KwChan => KwChan, KwConst => KwConst,
            KwContinue => KwContinue, KwDefault => KwDefault, KwDefer => KwDefer, KwElse => KwElse,
            KwFallthrough => KwFallthrough, KwFor => KwFor, KwFunc => KwFunc, KwGo => KwGo,
            KwGoto => KwGoto, KwIf => KwIf, KwImport => KwImport, KwInterface => KwInterface,
            KwMap => KwMap, KwPackage => KwPackage, KwRange => KwRange, KwReturn => KwReturn,
            KwSelect => KwSelect, KwStruct => KwStruct, KwSwitch => KwSwitch, KwType => KwType,
            KwVar => KwVar,

            Ellipsis => Ellipsis, ShlAssign => ShlAssign, ShrAssign => ShrAssign,
            AndNotAssign => AndNotAssign, AddAssign => AddAssign, SubAssign => SubAssign,
            MulAssign => MulAssign, DivAssign => DivAssign, ModAssign => ModAssign,
            AndAssign => AndAssign, OrAssign => OrAssign, XorAssign => XorAssign,
            Shl => Shl, Shr => Shr, AndNot => AndNot, LAnd => LAnd, LOr => LOr,
            EqEq => EqEq, NotEq => NotEq, Le => Le, Ge => Ge, Inc => Inc, Dec => Dec,
            Define => Define, Arrow => Arrow, Assign => Assign, Plus => Plus, Minus => Minus,
            Star => Star, Slash => Slash, Percent => Percent, Amp => Amp, Pipe => Pipe,
            Caret => Caret, Tilde => Tilde, Bang => Bang, Lt => Lt, Gt => Gt,

            LParen => LParen, RParen => RParen, LBrack => LBrack, RBrack => RBrack,
            LBrace => LBrace, RBrace => RBrace, Comma => Comma, Semi => Semi, Colon => Colon,
            Dot => Dot, Error => Error,
        }
    }
}

// =============================================================================
// Public token definition (zero-copy)
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Tok<'input> {
    Ident(&'input str),
    IntLit(&'input str),
    FloatLit(&'input str),
    ImagLit(&'input str),
    RuneLit(&'input str),
    StringLit(&'input str),
    RawStringLit(&'input str),

    // Keywords
    KwBreak,
    KwCase,
    KwChan,
    KwConst,
    KwContinue,
    KwDefault,
    KwDefer,
    KwElse,
    KwFallthrough,
    KwFor,
    KwFunc,
    KwGo,
    KwGoto,
    KwIf,
    KwImport,
    KwInterface,
    KwMap,
    KwPackage,
    KwRange,
    KwReturn,
    KwSelect,
    KwStruct,
    KwSwitch,
    KwType,
    KwVar,

    // Operators / Delimiters
    Ellipsis,
    ShlAssign,
    ShrAssign,
    AndNotAssign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    Shl,
    Shr,
    AndNot,
    LAnd,
    LOr,
    EqEq,
    NotEq,
    Le,
    Ge,
    Inc,
    Dec,
    Define,
    Arrow,
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Bang,
    Lt,
    Gt,
    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,
    Comma,
    Semi,
    Colon,
    Dot,

    Error,
}

impl std::fmt::Display for Tok<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

// =============================================================================
// Lexer wrapper: semicolon insertion + diags
// =============================================================================

pub struct Lexer<'src> {
    logos: LogosLexer<'src, RawTok>,
    pending: Option<(usize, Tok<'src>, usize)>,
    diags: Vec<Diag>,
    last_can_insert_semi: bool,
    src_len: usize,
    eof_done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src str) -> Self {
        Self {
            logos: RawTok::lexer(input),
            pending: None,
            diags: Vec::new(),
            last_can_insert_semi: false,
            src_len: input.len(),
            eof_done: false,
        }
    }

    pub fn take_diags(&mut self) -> Vec<Diag> {
        std::mem::take(&mut self.diags)
    }

    #[inline]
    fn push_lex_diag(&mut self, kind: LexErrorKind, span: Range<usize>) {
        let sp = crate::error::Span::from_range(span);
        self.diags.push(LexError { kind, span: sp }.diag());
    }

    /// Inserted semicolons are zero-width: start == end.
    #[inline]
    fn emit_semi_at(&mut self, pos: usize) {
        self.pending = Some((pos, Tok::Semi, pos));
    }

    #[inline]
    fn handle_eof(&mut self) {
        self.eof_done = true;
        if self.last_can_insert_semi {
            self.last_can_insert_semi = false;
            self.emit_semi_at(self.src_len);
        }
    }

    #[inline]
    fn handle_lex_error(&mut self, kind: LexErrorKind) -> Option<(usize, Tok<'src>, usize)> {
        let span = self.logos.span();
        self.push_lex_diag(kind, span.clone());
        self.last_can_insert_semi = false;
        Some((span.start, Tok::Error, span.end))
    }

    /// Returns `None` for trivia (the caller keeps looping) and
    /// `Some(item)` for a real token.
    fn handle_raw_token(&mut self, raw: RawTok) -> Option<(usize, Tok<'src>, usize)> {
        let span = self.logos.span();
        let slice = self.logos.slice();

        match raw {
            // BOM is only valid at the very start of the input.
            RawTok::Bom => {
                if span.start == 0 {
                    return None;
                }
                self.push_lex_diag(LexErrorKind::InvalidToken, span.clone());
                self.last_can_insert_semi = false;
                Some((span.start, Tok::Error, span.end))
            }
            RawTok::Newline => {
                if self.last_can_insert_semi {
                    self.last_can_insert_semi = false;
                    self.emit_semi_at(span.start);
                }
                None
            }
            RawTok::BlockComment => {
                if self.last_can_insert_semi {
                    if let Some(off) = first_newline_offset(slice) {
                        self.last_can_insert_semi = false;
                        self.emit_semi_at(span.start + off);
                    }
                }
                None
            }
            RawTok::Error => {
                self.push_lex_diag(LexErrorKind::InvalidToken, span.clone());
                self.last_can_insert_semi = false;
                Some((span.start, Tok::Error, span.end))
            }
            _ => {
                self.last_can_insert_semi = raw.can_insert_semicolon();
                Some((span.start, raw.to_token(slice), span.end))
            }
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = (usize, Tok<'src>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Emit a pending injected ';' first.
            if let Some(tok) = self.pending.take() {
                return Some(tok);
            }

            if self.eof_done {
                return None;
            }

            match self.logos.next() {
                None => {
                    // Don't return yet: a pending ';' may have been queued.
                    self.handle_eof();
                    continue;
                }
                Some(Err(kind)) => return self.handle_lex_error(kind),
                Some(Ok(raw)) => match self.handle_raw_token(raw) {
                    None => continue,
                    Some(item) => return Some(item),
                },
            }
        }
    }
}
