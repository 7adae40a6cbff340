//! Recursive-descent parser for the Go subset.
//!
//! Parses the package clause, import declarations, and type
//! declarations; every other top-level declaration is skipped by
//! balanced-delimiter scanning. The type grammar reachable from
//! interface method signatures is parsed in full.

use crate::ast::*;
use crate::error::{Diag, DiagKind, ParseFailure, Span};
use crate::lexer::{Lexer, Tok};

type ParseResult<T> = Result<T, ()>;

/// Parse a whole source file.
///
/// Any diagnostic — from the lexer or the parser — fails the parse;
/// partial output is never produced.
pub fn parse_file(src: &str) -> Result<SourceFile, ParseFailure> {
    let (toks, mut diags) = lex_all(src);
    let mut p = Parser::new(toks, src.len());
    let parsed = p.parse_source_file();
    diags.append(&mut p.diags);

    match parsed {
        Ok(file) if diags.is_empty() => Ok(file),
        _ => {
            if diags.is_empty() {
                diags.push(Diag {
                    kind: DiagKind::Parse,
                    span: Span::default(),
                    message: "parse failed".to_string(),
                });
            }
            Err(ParseFailure { diags })
        }
    }
}

/// Parse one standalone type expression.
pub fn parse_type_expr(src: &str) -> Result<Type, ParseFailure> {
    let (toks, mut diags) = lex_all(src);
    let mut p = Parser::new(toks, src.len());
    let parsed = p.parse_type();
    if parsed.is_ok() {
        p.skip_semis();
        if p.cur().is_some() {
            p.error_expected("end of input");
        }
    }
    diags.append(&mut p.diags);

    match parsed {
        Ok(typ) if diags.is_empty() => Ok(typ),
        _ => {
            if diags.is_empty() {
                diags.push(Diag {
                    kind: DiagKind::Parse,
                    span: Span::default(),
                    message: "parse failed".to_string(),
                });
            }
            Err(ParseFailure { diags })
        }
    }
}

fn lex_all(src: &str) -> (Vec<(usize, Tok<'_>, usize)>, Vec<Diag>) {
    let mut lexer = Lexer::new(src);
    let toks: Vec<_> = lexer.by_ref().collect();
    (toks, lexer.take_diags())
}

/// Parameter-list entry before name resolution: `a`, `a T`, or `T`.
struct RawParam {
    names: Vec<String>,
    typ: Option<Type>,
}

/// Resolve a parsed parameter list the way the language groups it:
/// bare names accumulate until an entry carrying a type collects them
/// (`a, b int` becomes one field named `a, b`); if no entry carries a
/// type, the bare names were types all along.
fn resolve_param_list(raw: Vec<RawParam>) -> Vec<Field> {
    let mut out = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for param in raw {
        match param.typ {
            Some(typ) => {
                let mut names = std::mem::take(&mut pending);
                names.extend(param.names);
                out.push(Field {
                    names,
                    typ,
                    tag: None,
                });
            }
            None => pending.extend(param.names),
        }
    }

    for name in pending {
        out.push(Field {
            names: Vec::new(),
            typ: Type::Named {
                pkg: None,
                name,
                args: Vec::new(),
            },
            tag: None,
        });
    }

    out
}

fn is_type_start(t: &Tok<'_>) -> bool {
    matches!(
        t,
        Tok::Ident(_)
            | Tok::LBrack
            | Tok::KwMap
            | Tok::KwChan
            | Tok::Arrow
            | Tok::KwFunc
            | Tok::KwStruct
            | Tok::Star
            | Tok::KwInterface
            | Tok::LParen
            | Tok::Ellipsis
    )
}

struct Parser<'src> {
    toks: Vec<(usize, Tok<'src>, usize)>,
    pos: usize,
    src_len: usize,
    diags: Vec<Diag>,
}

impl<'src> Parser<'src> {
    fn new(toks: Vec<(usize, Tok<'src>, usize)>, src_len: usize) -> Self {
        Self {
            toks,
            pos: 0,
            src_len,
            diags: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------

    fn cur(&self) -> Option<Tok<'src>> {
        self.toks.get(self.pos).map(|(_, t, _)| t.clone())
    }

    fn peek(&self, n: usize) -> Option<Tok<'src>> {
        self.toks.get(self.pos + n).map(|(_, t, _)| t.clone())
    }

    fn cur_span(&self) -> Span {
        match self.toks.get(self.pos) {
            Some(&(l, _, r)) => Span::new(l, r),
            None => Span::empty_at(self.src_len),
        }
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, want: &Tok<'src>) -> bool {
        if self.cur().as_ref() == Some(want) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, want: Tok<'src>, what: &str) -> ParseResult<()> {
        if self.eat(&want) {
            Ok(())
        } else {
            self.error_expected(what);
            Err(())
        }
    }

    fn expect_ident(&mut self, what: &str) -> ParseResult<String> {
        match self.cur() {
            Some(Tok::Ident(s)) => {
                self.bump();
                Ok(s.to_string())
            }
            _ => {
                self.error_expected(what);
                Err(())
            }
        }
    }

    fn skip_semis(&mut self) {
        while matches!(self.cur(), Some(Tok::Semi)) {
            self.bump();
        }
    }

    fn error_expected(&mut self, what: &str) {
        let span = self.cur_span();
        let found = match self.cur() {
            Some(t) => t.to_string(),
            None => "end of file".to_string(),
        };
        self.diags.push(Diag {
            kind: DiagKind::Parse,
            span,
            message: format!("expected {what}, found {found}"),
        });
    }

    fn type_start_at(&self, n: usize) -> bool {
        self.peek(n).as_ref().is_some_and(is_type_start)
    }

    // ------------------------------------------------------------------
    // File structure
    // ------------------------------------------------------------------

    fn parse_source_file(&mut self) -> ParseResult<SourceFile> {
        self.skip_semis();
        self.expect(Tok::KwPackage, "package clause")?;
        let package = self.expect_ident("package name")?;
        self.skip_semis();

        let mut imports = Vec::new();
        let mut types = Vec::new();

        while let Some(tok) = self.cur() {
            match tok {
                Tok::KwImport => self.parse_import_decl(&mut imports)?,
                Tok::KwType => self.parse_type_decl(&mut types)?,
                // func/const/var and anything unexpected: not our
                // business, skip the whole declaration.
                _ => self.skip_decl(),
            }
            self.skip_semis();
        }

        Ok(SourceFile {
            package,
            imports,
            types,
        })
    }

    fn parse_import_decl(&mut self, imports: &mut Vec<ImportSpec>) -> ParseResult<()> {
        self.bump(); // import
        if self.eat(&Tok::LParen) {
            self.skip_semis();
            while !matches!(self.cur(), Some(Tok::RParen) | None) {
                let spec = self.parse_import_spec()?;
                imports.push(spec);
                self.skip_semis();
            }
            self.expect(Tok::RParen, "closing ')' of import block")?;
        } else {
            imports.push(self.parse_import_spec()?);
        }
        Ok(())
    }

    fn parse_import_spec(&mut self) -> ParseResult<ImportSpec> {
        let name = match self.cur() {
            Some(Tok::Dot) => {
                self.bump();
                Some(ImportName::Dot)
            }
            Some(Tok::Ident(s)) => {
                let name = if s == "_" {
                    ImportName::Blank
                } else {
                    ImportName::Name(s.to_string())
                };
                self.bump();
                Some(name)
            }
            _ => None,
        };

        match self.cur() {
            Some(Tok::StringLit(s) | Tok::RawStringLit(s)) => {
                self.bump();
                Ok(ImportSpec {
                    name,
                    path: s.to_string(),
                })
            }
            _ => {
                self.error_expected("import path");
                Err(())
            }
        }
    }

    fn parse_type_decl(&mut self, types: &mut Vec<TypeDecl>) -> ParseResult<()> {
        self.bump(); // type
        if self.eat(&Tok::LParen) {
            self.skip_semis();
            while !matches!(self.cur(), Some(Tok::RParen) | None) {
                self.parse_type_spec(types)?;
                self.skip_semis();
            }
            self.expect(Tok::RParen, "closing ')' of type block")?;
        } else {
            self.parse_type_spec(types)?;
        }
        Ok(())
    }

    fn parse_type_spec(&mut self, types: &mut Vec<TypeDecl>) -> ParseResult<()> {
        let name = self.expect_ident("type name")?;

        // `type L[T any] ...` declares type parameters; `type A [3]int`
        // starts an array type. Decide by the token after the name's
        // bracket: a parameter list opens with an identifier followed by
        // more names, a comma, or a constraint.
        if matches!(self.cur(), Some(Tok::LBrack)) && self.starts_type_params() {
            self.skip_balanced(&Tok::LBrack, &Tok::RBrack);
        }

        self.eat(&Tok::Assign); // alias declaration

        let typ = self.parse_type()?;
        types.push(TypeDecl { name, typ });
        Ok(())
    }

    fn starts_type_params(&self) -> bool {
        if !matches!(self.peek(1), Some(Tok::Ident(_))) {
            return false;
        }
        matches!(
            self.peek(2),
            Some(
                Tok::Ident(_)
                    | Tok::Comma
                    | Tok::KwInterface
                    | Tok::KwMap
                    | Tok::KwChan
                    | Tok::KwFunc
                    | Tok::KwStruct
                    | Tok::Tilde
            )
        )
    }

    fn skip_balanced(&mut self, open: &Tok<'src>, close: &Tok<'src>) {
        let mut depth = 0i32;
        while let Some(t) = self.cur() {
            if &t == open {
                depth += 1;
            } else if &t == close {
                depth -= 1;
                if depth == 0 {
                    self.bump();
                    return;
                }
            }
            self.bump();
        }
    }

    /// Skip a whole declaration: everything up to (and including) the
    /// first semicolon at zero delimiter depth. Handles function bodies,
    /// grouped const/var blocks, and composite-literal initializers.
    fn skip_decl(&mut self) {
        let mut parens = 0i32;
        let mut bracks = 0i32;
        let mut braces = 0i32;
        while let Some(t) = self.cur() {
            match t {
                Tok::LParen => parens += 1,
                Tok::RParen => parens -= 1,
                Tok::LBrack => bracks += 1,
                Tok::RBrack => bracks -= 1,
                Tok::LBrace => braces += 1,
                Tok::RBrace => braces -= 1,
                Tok::Semi if parens <= 0 && bracks <= 0 && braces <= 0 => {
                    self.bump();
                    return;
                }
                _ => {}
            }
            self.bump();
        }
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    fn parse_type(&mut self) -> ParseResult<Type> {
        match self.cur() {
            Some(Tok::Ident(_)) => self.parse_named_type(),
            Some(Tok::LBrack) => {
                self.bump();
                if self.eat(&Tok::RBrack) {
                    let elem = self.parse_type()?;
                    Ok(Type::Slice {
                        elem: Box::new(elem),
                    })
                } else {
                    let len = self.parse_len_expr(0)?;
                    self.expect(Tok::RBrack, "closing ']' of array length")?;
                    let elem = self.parse_type()?;
                    Ok(Type::Array {
                        len,
                        elem: Box::new(elem),
                    })
                }
            }
            Some(Tok::KwMap) => {
                self.bump();
                self.expect(Tok::LBrack, "'[' after map")?;
                let key = self.parse_type()?;
                self.expect(Tok::RBrack, "']' after map key type")?;
                let value = self.parse_type()?;
                Ok(Type::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            Some(Tok::KwChan) => {
                self.bump();
                let dir = if self.eat(&Tok::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = self.parse_type()?;
                Ok(Type::Chan {
                    dir,
                    elem: Box::new(elem),
                })
            }
            Some(Tok::Arrow) => {
                self.bump();
                self.expect(Tok::KwChan, "'chan' after '<-'")?;
                let elem = self.parse_type()?;
                Ok(Type::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(elem),
                })
            }
            Some(Tok::KwFunc) => {
                self.bump();
                let sig = self.parse_signature()?;
                Ok(Type::Func { sig })
            }
            Some(Tok::KwStruct) => {
                self.bump();
                self.parse_struct_body()
            }
            Some(Tok::KwInterface) => {
                self.bump();
                self.parse_interface_body()
            }
            Some(Tok::Star) => {
                self.bump();
                let elem = self.parse_type()?;
                Ok(Type::Pointer {
                    elem: Box::new(elem),
                })
            }
            Some(Tok::Ellipsis) => {
                self.bump();
                let elem = self.parse_type()?;
                Ok(Type::Variadic {
                    elem: Box::new(elem),
                })
            }
            Some(Tok::LParen) => {
                self.bump();
                let inner = self.parse_type()?;
                self.expect(Tok::RParen, "closing ')' of parenthesized type")?;
                Ok(Type::Paren {
                    inner: Box::new(inner),
                })
            }
            _ => {
                self.error_expected("type");
                Err(())
            }
        }
    }

    fn parse_named_type(&mut self) -> ParseResult<Type> {
        let first = self.expect_ident("type name")?;
        let (pkg, name) = if self.eat(&Tok::Dot) {
            (Some(first), self.expect_ident("qualified type name")?)
        } else {
            (None, first)
        };

        // After a complete type name, '[' can only open generic
        // instantiation arguments.
        let mut args = Vec::new();
        if matches!(self.cur(), Some(Tok::LBrack)) {
            self.bump();
            loop {
                args.push(self.parse_type()?);
                if !self.eat(&Tok::Comma) {
                    break;
                }
                if matches!(self.cur(), Some(Tok::RBrack)) {
                    break; // trailing comma
                }
            }
            self.expect(Tok::RBrack, "closing ']' of type arguments")?;
        }

        Ok(Type::Named { pkg, name, args })
    }

    // Array lengths are constant expressions; precedence climbing over
    // the Go binary operators keeps the reconstructed tree faithful.
    fn parse_len_expr(&mut self, min_prec: u8) -> ParseResult<LenExpr> {
        let mut left = self.parse_len_operand()?;
        while let Some((op, prec)) = self.len_op() {
            if prec < min_prec {
                break;
            }
            self.bump();
            let right = self.parse_len_expr(prec + 1)?;
            left = LenExpr::Binary {
                left: Box::new(left),
                op: op.to_string(),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn len_op(&self) -> Option<(&'static str, u8)> {
        Some(match self.cur()? {
            Tok::Star => ("*", 5),
            Tok::Slash => ("/", 5),
            Tok::Percent => ("%", 5),
            Tok::Shl => ("<<", 5),
            Tok::Shr => (">>", 5),
            Tok::Amp => ("&", 5),
            Tok::AndNot => ("&^", 5),
            Tok::Plus => ("+", 4),
            Tok::Minus => ("-", 4),
            Tok::Pipe => ("|", 4),
            Tok::Caret => ("^", 4),
            _ => return None,
        })
    }

    fn parse_len_operand(&mut self) -> ParseResult<LenExpr> {
        match self.cur() {
            Some(Tok::IntLit(s) | Tok::RuneLit(s)) => {
                self.bump();
                Ok(LenExpr::Lit(s.to_string()))
            }
            Some(Tok::Ident(s)) => {
                self.bump();
                let mut name = s.to_string();
                if self.eat(&Tok::Dot) {
                    let sel = self.expect_ident("selector in array length")?;
                    name = format!("{name}.{sel}");
                }
                Ok(LenExpr::Named(name))
            }
            Some(Tok::LParen) => {
                self.bump();
                let inner = self.parse_len_expr(0)?;
                self.expect(Tok::RParen, "closing ')' in array length")?;
                Ok(LenExpr::Paren(Box::new(inner)))
            }
            _ => {
                self.error_expected("array length expression");
                Err(())
            }
        }
    }

    // ------------------------------------------------------------------
    // Signatures and field lists
    // ------------------------------------------------------------------

    fn parse_signature(&mut self) -> ParseResult<Signature> {
        self.expect(Tok::LParen, "'(' of parameter list")?;
        let params = self.parse_field_list()?;

        let results = if self.eat(&Tok::LParen) {
            self.parse_field_list()?
        } else if self.cur().as_ref().is_some_and(is_type_start) {
            vec![Field {
                names: Vec::new(),
                typ: self.parse_type()?,
                tag: None,
            }]
        } else {
            Vec::new()
        };

        Ok(Signature { params, results })
    }

    /// Parse entries up to and including the closing ')'.
    fn parse_field_list(&mut self) -> ParseResult<Vec<Field>> {
        let mut raw = Vec::new();
        while !matches!(self.cur(), Some(Tok::RParen) | None) {
            raw.push(self.parse_param_entry()?);
            if !self.eat(&Tok::Comma) {
                break;
            }
        }
        self.expect(Tok::RParen, "closing ')' of parameter list")?;
        Ok(resolve_param_list(raw))
    }

    fn parse_param_entry(&mut self) -> ParseResult<RawParam> {
        if let Some(Tok::Ident(s)) = self.cur() {
            let name = s.to_string();
            match self.peek(1) {
                // Bare name: either a grouped parameter name or a type;
                // resolve_param_list decides.
                Some(Tok::Comma | Tok::RParen) | None => {
                    self.bump();
                    return Ok(RawParam {
                        names: vec![name],
                        typ: None,
                    });
                }
                // Qualified type, unnamed entry.
                Some(Tok::Dot) => {
                    return Ok(RawParam {
                        names: Vec::new(),
                        typ: Some(self.parse_type()?),
                    });
                }
                // `x [3]int` (named, array type) vs `Foo[T]`
                // (instantiated type): decided by what follows the
                // matching bracket.
                Some(Tok::LBrack) => {
                    if self.instantiation_ahead() {
                        return Ok(RawParam {
                            names: Vec::new(),
                            typ: Some(self.parse_type()?),
                        });
                    }
                    self.bump();
                    return Ok(RawParam {
                        names: vec![name],
                        typ: Some(self.parse_type()?),
                    });
                }
                _ => {}
            }

            if self.type_start_at(1) {
                self.bump();
                return Ok(RawParam {
                    names: vec![name],
                    typ: Some(self.parse_type()?),
                });
            }
        }

        Ok(RawParam {
            names: Vec::new(),
            typ: Some(self.parse_type()?),
        })
    }

    /// With the cursor on `Ident` and the next token `[`: true when the
    /// bracket closes into a comma/paren (generic instantiation), false
    /// when a type follows it (`x [3]int`, a named array parameter).
    fn instantiation_ahead(&self) -> bool {
        let mut i = self.pos + 1;
        let mut depth = 0i32;
        while let Some((_, t, _)) = self.toks.get(i) {
            match t {
                Tok::LBrack => depth += 1,
                Tok::RBrack => {
                    depth -= 1;
                    if depth == 0 {
                        return !self
                            .toks
                            .get(i + 1)
                            .map(|(_, t, _)| is_type_start(t))
                            .unwrap_or(false);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        false
    }

    // ------------------------------------------------------------------
    // Struct and interface bodies
    // ------------------------------------------------------------------

    fn parse_struct_body(&mut self) -> ParseResult<Type> {
        self.expect(Tok::LBrace, "'{' of struct body")?;
        self.skip_semis();
        let mut fields = Vec::new();
        while !matches!(self.cur(), Some(Tok::RBrace) | None) {
            fields.push(self.parse_struct_field()?);
            self.skip_semis();
        }
        self.expect(Tok::RBrace, "closing '}' of struct body")?;
        Ok(Type::Struct { fields })
    }

    fn parse_struct_field(&mut self) -> ParseResult<Field> {
        let named = match self.cur() {
            Some(Tok::Ident(_)) => match self.peek(1) {
                Some(Tok::Comma) => true,
                Some(Tok::LBrack) => !self.instantiation_ahead(),
                Some(ref t) if is_type_start(t) => true,
                _ => false,
            },
            _ => false,
        };

        if named {
            let mut names = vec![self.expect_ident("field name")?];
            while self.eat(&Tok::Comma) {
                names.push(self.expect_ident("field name")?);
            }
            let typ = self.parse_type()?;
            let tag = self.parse_tag();
            Ok(Field { names, typ, tag })
        } else {
            // Embedded field: `Foo`, `pkg.Foo`, `*Foo`.
            let typ = self.parse_type()?;
            let tag = self.parse_tag();
            Ok(Field {
                names: Vec::new(),
                typ,
                tag,
            })
        }
    }

    fn parse_tag(&mut self) -> Option<String> {
        match self.cur() {
            Some(Tok::StringLit(s) | Tok::RawStringLit(s)) => {
                self.bump();
                Some(s.to_string())
            }
            _ => None,
        }
    }

    fn parse_interface_body(&mut self) -> ParseResult<Type> {
        self.expect(Tok::LBrace, "'{' of interface body")?;
        self.skip_semis();
        let mut elems = Vec::new();
        while !matches!(self.cur(), Some(Tok::RBrace) | None) {
            if matches!(self.cur(), Some(Tok::Ident(_)))
                && matches!(self.peek(1), Some(Tok::LParen))
            {
                let name = self.expect_ident("method name")?;
                let sig = self.parse_signature()?;
                elems.push(InterfaceElem::Method(Method { name, sig }));
            } else {
                // Embedded interface or constraint element
                // (`io.Reader`, `~int | ~string`); recorded only so
                // extraction can skip it.
                self.eat(&Tok::Tilde);
                elems.push(InterfaceElem::Embedded(self.parse_type()?));
                while self.eat(&Tok::Pipe) {
                    self.eat(&Tok::Tilde);
                    elems.push(InterfaceElem::Embedded(self.parse_type()?));
                }
            }
            self.skip_semis();
        }
        self.expect(Tok::RBrace, "closing '}' of interface body")?;
        Ok(Type::Interface { elems })
    }
}
