//! Token definitions for the record format
//!
//! The tokens are defined using the logos derive macro. Constructor names (`Symbol`,
//! `Apply`, `List`, `Regenerable`, ...) are plain identifiers at this level; their exact
//! spelling is checked where values are interpreted.
use logos::Logos;
use std::fmt;

/// All possible tokens in a document file
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // Keywords
    #[token("import")]
    Import,
    #[token("define")]
    Define,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(",")]
    Comma,
    #[token("=")]
    Equals,

    // Literals
    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape_string(lex.slice()))]
    Str(String),
    #[regex(r"-?[0-9]+(\.[0-9]+)?([eE][+\-]?[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),

    // Names (record names, constructor names, field names)
    #[regex(r"[A-Za-z_][A-Za-z0-9_\-]*", |lex| lex.slice().to_string())]
    Ident(String),

    /// Input the lexer could not classify
    Unknown(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Import => write!(f, "import"),
            Token::Define => write!(f, "define"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::OpenBracket => write!(f, "["),
            Token::CloseBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Equals => write!(f, "="),
            Token::Str(text) => write!(f, "{}", escape_string(text)),
            Token::Number(raw) | Token::Ident(raw) | Token::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/// Quote and escape a string for the record format.
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Strip the surrounding quotes of a string literal and resolve its escapes.
///
/// Unknown escapes keep the escaped character.
pub fn unescape_string(literal: &str) -> String {
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
