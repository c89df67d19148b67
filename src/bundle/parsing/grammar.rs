//! Parser combinators for the constructor grammar.
//!
//! ```text
//! value       := string | number | true | false | list | constructor
//! list        := "[" (value ("," value)* ","?)? "]"
//! constructor := ident ( "(" (argument ("," argument)* ","?)? ")" )?
//! argument    := ident "=" value | value
//! ```
//!
//! `List(...)` is an ordinary constructor at this level and is folded into [`Value::List`]
//! once its arguments are known. Nesting depth is tracked by the recursive parser itself,
//! so a comma only separates arguments of the innermost open constructor.
//!
//! Parsing stops after the first complete value; anything that follows is ignored.

use chumsky::prelude::*;

use super::value::{Constructor, Value, LIST};
use crate::bundle::lexing::{tokenize, Token, TokenLocation};

/// Type alias for parser error
pub(crate) type ParserError = Simple<TokenLocation>;

/// Deepest bracket nesting the parser will descend into. Deeper input is refused
/// before parsing starts.
pub const MAX_NESTING: usize = 256;

/// Deepest `(`/`[` nesting of a token stream
pub(crate) fn nesting(tokens: &[TokenLocation]) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    for (tok, _) in tokens {
        match tok {
            Token::OpenParen | Token::OpenBracket => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            Token::CloseParen | Token::CloseBracket => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

enum Argument {
    Positional(Value),
    Named(String, Value),
}

/// Helper: match a specific token type, ignoring the location
pub(crate) fn token(expected: Token) -> impl Parser<TokenLocation, (), Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenLocation| tok == &expected).ignored()
}

/// Parse an identifier, returning its text
pub(crate) fn ident() -> impl Parser<TokenLocation, String, Error = ParserError> + Clone {
    filter_map(|span, (tok, location): TokenLocation| match tok {
        Token::Ident(name) => Ok(name),
        other => Err(Simple::expected_input_found(
            span,
            Vec::new(),
            Some((other, location)),
        )),
    })
}

fn scalar() -> impl Parser<TokenLocation, Value, Error = ParserError> + Clone {
    filter_map(|span, (tok, location): TokenLocation| match tok {
        Token::Str(text) => Ok(Value::Str(text)),
        Token::Number(raw) => Ok(Value::Number(raw)),
        Token::True => Ok(Value::Bool(true)),
        Token::False => Ok(Value::Bool(false)),
        other => Err(Simple::expected_input_found(
            span,
            Vec::new(),
            Some((other, location)),
        )),
    })
}

fn build_constructor(name: String, arguments: Option<Vec<Argument>>) -> Value {
    let arguments = arguments.unwrap_or_default();
    if name == LIST {
        return Value::List(
            arguments
                .into_iter()
                .map(|argument| match argument {
                    Argument::Positional(value) | Argument::Named(_, value) => value,
                })
                .collect(),
        );
    }

    let mut constructor = Constructor::new(name);
    for argument in arguments {
        match argument {
            Argument::Positional(value) => constructor.positional.push(value),
            Argument::Named(field, value) => constructor.fields.push((field, value)),
        }
    }
    Value::Constructor(constructor)
}

/// Build the recursive value parser
pub(crate) fn value() -> impl Parser<TokenLocation, Value, Error = ParserError> + Clone {
    recursive(|value| {
        let argument = ident()
            .then_ignore(token(Token::Equals))
            .then(value.clone())
            .map(|(name, v)| Argument::Named(name, v))
            .or(value.clone().map(Argument::Positional));

        let arguments = argument
            .separated_by(token(Token::Comma))
            .allow_trailing()
            .delimited_by(token(Token::OpenParen), token(Token::CloseParen));

        let bracket_list = value
            .clone()
            .separated_by(token(Token::Comma))
            .allow_trailing()
            .delimited_by(token(Token::OpenBracket), token(Token::CloseBracket))
            .map(Value::List);

        let constructor = ident()
            .then(arguments.or_not())
            .map(|(name, arguments)| build_constructor(name, arguments));

        choice((scalar(), bracket_list, constructor))
    })
}

/// Parse the body of a record: `name = value`
pub(crate) fn record() -> impl Parser<TokenLocation, (String, Value), Error = ParserError> + Clone {
    ident().then_ignore(token(Token::Equals)).then(value())
}

/// Describe the first parser error in words
pub(crate) fn describe(errors: &[ParserError]) -> String {
    match errors.first().map(|e| e.found()) {
        Some(Some((token, location))) => {
            format!("unexpected `{}` at {}..{}", token, location.start, location.end)
        }
        Some(None) => "unexpected end of record".to_string(),
        None => "unparseable record".to_string(),
    }
}

/// Parse a single value from source text.
///
/// Returns `None` when no value can be read at the start of the text. Text after the first
/// complete value is ignored.
pub fn parse_value(source: &str) -> Option<Value> {
    let tokens = tokenize(source);
    if tokens.is_empty() || nesting(&tokens) > MAX_NESTING {
        return None;
    }
    value().parse(tokens).ok()
}
