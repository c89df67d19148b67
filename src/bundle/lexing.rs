//! Lexer module for the record format
//!
//! This module contains the tokenization logic for document files, including token
//! definitions and the lexer entry points.
//!
//! The format is a flat sequence of `define <name> = <value>` records preceded by
//! `import "<path>"` declarations. Values are built from constructor applications,
//! string / number / boolean literals and lists, so the token set is small. All the
//! nesting is handled later by the grammar in [`crate::bundle::parsing`]; the lexer is a
//! vanilla logos lexer with no custom state.

pub mod tokens;

pub use tokens::{escape_string, unescape_string, Token};

use logos::Logos;
use std::ops::Range;

/// Token paired with the byte range it was read from
pub type TokenLocation = (Token, Range<usize>);

/// Tokenize a source string, keeping the location of every token.
///
/// Input logos cannot classify becomes [`Token::Unknown`] so the grammar rejects it instead
/// of silently reading around it.
pub fn tokenize(source: &str) -> Vec<TokenLocation> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let token = match result {
            Ok(token) => token,
            Err(()) => Token::Unknown(lexer.slice().to_string()),
        };
        tokens.push((token, lexer.span()));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_record_header() {
        assert_eq!(
            kinds("define meta_title = \"T\""),
            vec![
                Token::Define,
                Token::Ident("meta_title".to_string()),
                Token::Equals,
                Token::Str("T".to_string()),
            ]
        );
    }

    #[test]
    fn test_locations_point_into_source() {
        let source = "import \"types.kleis\"";
        let tokens = tokenize(source);
        assert_eq!(tokens[0].1, 0..6);
        assert_eq!(&source[tokens[1].1.clone()], "\"types.kleis\"");
    }

    #[test]
    fn test_unknown_characters_are_kept() {
        let tokens = kinds("define f = a + b");
        assert!(tokens.contains(&Token::Unknown("+".to_string())));
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("// header\ndefine x = 1 // trailing"),
            vec![
                Token::Define,
                Token::Ident("x".to_string()),
                Token::Equals,
                Token::Number("1".to_string()),
            ]
        );
    }
}
