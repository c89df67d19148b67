//! Loading and saving documents
//!
//! A saved document looks like this:
//!
//! ```text
//! import "examples/documents/kleisdoc_types.kleis"
//! import "stdlib/templates/mit_thesis.kleis"
//!
//! define format_version = 1
//!
//! define meta_title = "T"
//!
//! define eq_0 = Equation(
//!     id = "eq_0",
//!     label = "eq:e1",
//!     latex = "",
//!     typst = "",
//!     ast = Apply("equals", List(Symbol("x"), Literal("1"))),
//!     numbered = true,
//!     verified = false
//! )
//! ```
//!
//! Reads and writes are whole-file. Loading either returns a complete document or an
//! error; a half-populated document is never handed out.

pub mod loader;
pub mod writer;

use std::fs;
use std::path::Path;

pub use loader::{load_str, LoadOptions, Loaded, FORMAT_VERSION};
pub use writer::{to_text, WriteOptions};

use crate::bundle::error::{LoadError, SaveError};
use crate::bundle::model::Document;

/// Read and parse a document file
pub fn load_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Loaded, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = load_str(&source, options)?;
    log::info!(
        "loaded {} ({} sections, {} equations, {} skipped records)",
        path.display(),
        loaded.document.sections().len(),
        loaded.document.equations().len(),
        loaded.skipped.len()
    );
    Ok(loaded)
}

/// Serialize a document and write it to `path`
pub fn save_path(
    document: &mut Document,
    path: impl AsRef<Path>,
    options: &WriteOptions,
) -> Result<(), SaveError> {
    let path = path.as_ref();
    fs::write(path, to_text(document, options)).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    document.mark_saved();
    log::info!("saved {}", path.display());
    Ok(())
}

impl Document {
    /// Parse a document with default options; skipped records are logged and dropped
    pub fn from_text(source: &str) -> Result<Document, LoadError> {
        load_str(source, &LoadOptions::default()).map(|loaded| loaded.document)
    }

    /// Load a document file with default options
    pub fn load(path: impl AsRef<Path>) -> Result<Document, LoadError> {
        load_path(path, &LoadOptions::default()).map(|loaded| loaded.document)
    }

    /// Serialize with default options
    pub fn to_text(&self) -> String {
        to_text(self, &WriteOptions::default())
    }

    /// Save with default options
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        save_path(self, path, &WriteOptions::default())
    }
}
