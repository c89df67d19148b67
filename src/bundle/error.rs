//! Error types
//!
//! Conditions a caller can live with (a skipped record, a dangling reference, a renderer
//! that is not available) are reported as values. The types here are for operations that
//! cannot complete.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::bundle::parsing::SkippedRecord;

/// Failure to load a document
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unsupported format version {found} (supported: {supported})")]
    UnsupportedVersion { found: String, supported: i64 },
    #[error("{} record(s) could not be read", .0.len())]
    SkippedRecords(Vec<SkippedRecord>),
}

/// Failure to save a document
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A document operation that cannot be applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("invalid key '{0}'")]
    InvalidKey(String),
    #[error("'{0}' is not a finite number")]
    NonFiniteNumber(String),
    #[error("no section at {0}")]
    SectionNotFound(String),
    #[error("invalid section level {0}")]
    InvalidLevel(u32),
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),
    #[error("no figure labelled '{0}'")]
    FigureNotFound(String),
    #[error("figure '{0}' is not regenerable")]
    NotRegenerable(String),
    #[error("figure generation failed: {0}")]
    Generation(String),
}

/// Failure to find or read a style definition
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("style '{0}' not found")]
    NotFound(String),
    #[error("invalid style definition '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failure to produce a final artifact from rendered markup
#[derive(Debug, Error)]
pub enum TypesetError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error("typesetter failed: {0}")]
    Compiler(String),
}
