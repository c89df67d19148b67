//! Rendering documents to markup, and the seams to external tools
//!
//! Expression rendering, figure generation and typesetting are done by collaborators
//! behind the traits in [`collaborators`]. Their failures never corrupt the document:
//! a missing render falls back to stored text and a failed generation keeps the old
//! fragment.

pub mod collaborators;
pub mod export;
pub mod format;
pub mod typst;

pub use collaborators::{ExpressionRenderer, FigureGenerator, Typesetter};
pub use export::{export, style_for};
pub use format::RenderFormat;
pub use typst::{render_body, render_document};
