//! Visual styles
//!
//! A style is data: a set of named text bodies (page setup, preamble, title page, abstract
//! box, closing) written in the output markup and sprinkled with upper-case placeholder
//! tokens such as `TITLE` or `DEGREE_NAME`. Rendering a document under a style expands
//! those tokens from the document's metadata and content blocks, so a new style needs no
//! code.

pub mod definition;
pub mod registry;
pub mod substitution;

pub use definition::{StyleDefinition, SECTION_ORDER};
pub use registry::StyleRegistry;
pub use substitution::{candidate_keys, resolve, substitute, Namespaces};
