//! Main module for the document bundle engine
//!
//!     Load path: source text -> tokens -> records -> typed records (expression trees decoded
//!     on the way) -> nested sections -> [`Document`].
//!
//!     Save path: [`Document`] -> flattened sections -> typed records -> `Value` trees -> text.
//!
//!     Rendering a document under a visual style is independent of both and lives in
//!     [`render`] and [`styles`].

pub mod config;
pub mod error;
pub mod expression;
pub mod extraction;
pub mod lexing;
pub mod library;
pub mod model;
pub mod overview;
pub mod parsing;
pub mod persistence;
pub mod render;
pub mod structure;
pub mod styles;
pub mod templates;
pub mod testing;
pub mod validation;

pub use error::{DocumentError, LoadError, SaveError, StyleError};
pub use expression::ExpressionNode;
pub use model::{
    Algorithm, Author, BibEntry, ContentBlock, ContentItem, CrossRef, CrossRefKind, Document,
    DocumentState, Equation, Figure, FigureSource, MetadataValue, Section, SectionPath, Table,
    Theorem,
};
pub use persistence::{LoadOptions, Loaded, WriteOptions};
