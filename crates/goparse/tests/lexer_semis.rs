use goparse::lexer::{Lexer, Tok};

/// Byte offsets of inserted (zero-width) semicolons.
fn injected_semis(input: &str) -> Vec<usize> {
    let mut lx = Lexer::new(input);
    let toks: Vec<_> = lx.by_ref().collect();
    toks.into_iter()
        .filter_map(|(s, t, e)| {
            if matches!(t, Tok::Semi) && s == e {
                Some(s)
            } else {
                None
            }
        })
        .collect()
}

fn tok_name(t: &Tok<'_>) -> &'static str {
    match t {
        Tok::Ident(_) => "IDENT",
        Tok::IntLit(_) => "INT",
        Tok::FloatLit(_) => "FLOAT",
        Tok::ImagLit(_) => "IMAG",
        Tok::RuneLit(_) => "CHAR",
        Tok::StringLit(_) | Tok::RawStringLit(_) => "STRING",
        Tok::Semi => ";",
        Tok::KwPackage => "package",
        Tok::KwType => "type",
        Tok::KwInterface => "interface",
        Tok::KwFunc => "func",
        Tok::KwMap => "map",
        Tok::KwChan => "chan",
        Tok::KwReturn => "return",
        Tok::Arrow => "<-",
        Tok::Ellipsis => "...",
        Tok::LParen => "(",
        Tok::RParen => ")",
        Tok::LBrack => "[",
        Tok::RBrack => "]",
        Tok::LBrace => "{",
        Tok::RBrace => "}",
        Tok::Comma => ",",
        Tok::Dot => ".",
        Tok::Star => "*",
        Tok::Plus => "+",
        _ => "OTHER",
    }
}

fn lex_names(input: &str) -> Vec<&'static str> {
    Lexer::new(input).map(|(_s, t, _e)| tok_name(&t)).collect()
}

#[test]
fn semi_after_ident_at_newline() {
    assert_eq!(injected_semis("x\n"), vec![1]);
}

#[test]
fn semi_after_closing_delims() {
    assert_eq!(injected_semis(")\n"), vec![1]);
    assert_eq!(injected_semis("}\n"), vec![1]);
    assert_eq!(injected_semis("]\n"), vec![1]);
}

#[test]
fn no_semi_after_operators_or_comma() {
    assert_eq!(injected_semis("x +\ny\n"), vec![src_pos("x +\ny\n", 1)]);
    assert_eq!(injected_semis("x,\ny\n"), vec![src_pos("x,\ny\n", 1)]);
}

/// Position of the byte just after the n-th newline-terminated token
/// run; helper keeps expectations readable.
fn src_pos(src: &str, nth_newline_from_end: usize) -> usize {
    let newlines: Vec<usize> = src
        .bytes()
        .enumerate()
        .filter_map(|(i, b)| (b == b'\n').then_some(i))
        .collect();
    newlines[newlines.len() - nth_newline_from_end]
}

#[test]
fn semi_at_eof_without_trailing_newline() {
    assert_eq!(injected_semis("x"), vec![1]);
}

#[test]
fn semi_inside_block_comment_newline() {
    // A newline inside a block comment also triggers insertion, at the
    // newline's position.
    let src = "x /*a\nb*/ y\n";
    let semis = injected_semis(src);
    assert_eq!(semis.len(), 2);
    assert_eq!(semis[0], src.find('\n').unwrap());
}

#[test]
fn no_semi_for_single_line_block_comment() {
    let semis: Vec<usize> = injected_semis("x /* c */ +\n");
    assert!(semis.is_empty());
}

#[test]
fn line_comments_do_not_eat_newlines() {
    assert_eq!(lex_names("x // trailing\ny\n"), vec!["IDENT", ";", "IDENT", ";"]);
}

#[test]
fn token_stream_of_type_decl() {
    assert_eq!(
        lex_names("package p\ntype T interface {\nM(a int) *U\n}\n"),
        vec![
            "package", "IDENT", ";", "type", "IDENT", "interface", "{", "IDENT", "(", "IDENT",
            "IDENT", ")", "*", "IDENT", ";", "}", ";",
        ]
    );
}

#[test]
fn channel_and_variadic_tokens() {
    assert_eq!(
        lex_names("chan<- int"),
        vec!["chan", "<-", "IDENT", ";"]
    );
    assert_eq!(
        lex_names("...interface{}"),
        vec!["...", "interface", "{", "}", ";"]
    );
}

#[test]
fn numeric_literals() {
    assert_eq!(lex_names("3 + 2"), vec!["INT", "+", "INT", ";"]);
    assert_eq!(lex_names("0x1F 1_000 3.5 2i"), vec!["INT", "INT", "FLOAT", "IMAG", ";"]);
}

#[test]
fn strings_and_runes() {
    assert_eq!(
        lex_names(r#""a\"b" `raw` 'c'"#),
        vec!["STRING", "STRING", "CHAR", ";"]
    );
}
