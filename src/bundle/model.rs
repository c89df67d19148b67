//! The in-memory document aggregate
//!
//! Sections refer to equations, figures and the other labelled items by label only. The
//! items themselves are owned by the [`Document`] maps, so removing an item never touches
//! section content; a reference left behind is reported by validation.

pub mod bibliography;
pub mod crossref;
pub mod document;
pub mod equation;
pub mod figure;
pub mod items;
pub mod metadata;
pub mod section;

pub use bibliography::BibEntry;
pub use crossref::{CrossRef, CrossRefKind};
pub use document::{Document, DocumentState};
pub use equation::Equation;
pub use figure::{cache_key, CachedFragment, Figure, FigureSource};
pub use items::{Algorithm, Table, Theorem};
pub use metadata::{Author, ContentBlock, MetadataValue};
pub use section::{ContentItem, Section, SectionPath};
