//! # docbundle
//!
//! A persistence engine for structured technical documents (theses, papers).
//!
//! Documents bundle prose, numbered equations carrying re-editable expression trees,
//! figures, tables, theorems, algorithms and a bibliography, all addressed by stable
//! labels. They persist to a human-readable text format of `define` records that can be
//! parsed back without losing the embedded expression trees.
//!
//! File Layout
//!
//! src/bundle
//!   ├── lexing        logos tokens for the record format
//!   ├── parsing       chumsky grammar producing the generic `Value` tree, record splitting
//!   ├── expression    expression trees and their codec
//!   ├── model         the in-memory document aggregate
//!   ├── extraction    typed records recovered from `Value` trees
//!   ├── structure     flat <-> nested section conversion, table of contents
//!   ├── persistence   load / save
//!   ├── styles        style definitions and placeholder substitution
//!   └── render        markup rendering and external collaborator seams
//!
//! For testing helpers, see the [testing module](bundle::testing).

pub mod bundle;
