//! Record splitting
//!
//! A document file is a sequence of `import "<path>"` declarations and
//! `define <name> = <value>` records. The token stream is cut at every `import` and
//! `define` keyword and each piece is parsed on its own. Strings are single tokens, so a
//! keyword inside quoted text never starts a new piece.
//!
//! A piece that does not parse is reported as a [`SkippedRecord`] and the scan carries on
//! with the next one.

use chumsky::Parser;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

use super::grammar::{describe, nesting, record, MAX_NESTING};
use super::value::Value;
use crate::bundle::lexing::{tokenize, Token, TokenLocation};

/// A successfully parsed `define` record
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub value: Value,
    pub location: Range<usize>,
}

/// Why a record did not make it into the document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
pub enum SkipReason {
    /// The record text does not follow the grammar
    Syntax(String),
    /// The record name carries no known family prefix
    UnknownFamily,
    /// The record's constructor is not the one its family expects
    WrongConstructor { expected: String, found: String },
    /// The record has no label to be keyed by
    MissingLabel,
    /// The value has a shape the family cannot hold
    UnsupportedValue,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Syntax(msg) => write!(f, "syntax error: {}", msg),
            SkipReason::UnknownFamily => write!(f, "unknown record family"),
            SkipReason::WrongConstructor { expected, found } => {
                write!(f, "expected constructor {}, found {}", expected, found)
            }
            SkipReason::MissingLabel => write!(f, "record has no label"),
            SkipReason::UnsupportedValue => write!(f, "unsupported value shape"),
        }
    }
}

/// A record that was skipped while loading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub name: Option<String>,
    pub location: Range<usize>,
    pub reason: SkipReason,
}

impl SkippedRecord {
    pub fn new(name: Option<String>, location: Range<usize>, reason: SkipReason) -> Self {
        Self {
            name,
            location,
            reason,
        }
    }

    /// Skip an already parsed record
    pub fn of(record: &Record, reason: SkipReason) -> Self {
        Self::new(Some(record.name.clone()), record.location.clone(), reason)
    }
}

impl fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(
                f,
                "record `{}` at {}..{}: {}",
                name, self.location.start, self.location.end, self.reason
            ),
            None => write!(
                f,
                "record at {}..{}: {}",
                self.location.start, self.location.end, self.reason
            ),
        }
    }
}

/// The raw content of a document file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFile {
    pub imports: Vec<String>,
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedRecord>,
}

impl SourceFile {
    /// First record with the given name
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }
}

fn span_of(piece: &[TokenLocation]) -> Range<usize> {
    match (piece.first(), piece.last()) {
        (Some((_, first)), Some((_, last))) => first.start..last.end,
        _ => 0..0,
    }
}

/// Split source text into imports and records.
pub fn scan(source: &str) -> SourceFile {
    let tokens = tokenize(source);
    let mut file = SourceFile::default();

    let starts: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, (tok, _))| matches!(tok, Token::Define | Token::Import))
        .map(|(i, _)| i)
        .collect();

    if let Some(&first) = starts.first() {
        if first > 0 {
            log::debug!(
                "ignoring {} tokens before the first declaration",
                first
            );
        }
    }

    for (n, &start) in starts.iter().enumerate() {
        let end = starts.get(n + 1).copied().unwrap_or(tokens.len());
        let piece = &tokens[start..end];
        let location = span_of(piece);
        let body = &piece[1..];

        match piece[0].0 {
            Token::Import => match body.first() {
                Some((Token::Str(path), _)) => file.imports.push(path.clone()),
                _ => log::debug!("ignoring malformed import at {:?}", location),
            },
            _ => {
                let name = match body.first() {
                    Some((Token::Ident(name), _)) => Some(name.clone()),
                    _ => None,
                };
                if nesting(body) > MAX_NESTING {
                    log::debug!("record at {:?} is nested too deeply to parse", location);
                    file.skipped.push(SkippedRecord::new(
                        name,
                        location,
                        SkipReason::UnsupportedValue,
                    ));
                    continue;
                }
                match record().parse(body.to_vec()) {
                    Ok((name, value)) => file.records.push(Record {
                        name,
                        value,
                        location,
                    }),
                    Err(errors) => file.skipped.push(SkippedRecord::new(
                        name,
                        location,
                        SkipReason::Syntax(describe(&errors)),
                    )),
                }
            }
        }
    }

    file
}
