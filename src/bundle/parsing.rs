//! Parsing module for the record format
//!
//!     Parsing happens in two layers. The grammar in [`grammar`] turns tokens into a generic
//!     [`Value`] tree that knows nothing about documents: strings, numbers, booleans, lists
//!     and constructor applications with positional and named arguments. [`records`] splits a
//!     whole file into its `import` declarations and `define` records and parses each record
//!     independently, so one malformed record never takes its neighbours down with it.
//!
//!     Giving meaning to the values (which constructor is an equation, which field is a
//!     label) is the job of [`crate::bundle::extraction`].

pub mod grammar;
pub mod records;
pub mod value;

pub use grammar::{parse_value, MAX_NESTING};
pub use records::{scan, Record, SkipReason, SkippedRecord, SourceFile};
pub use value::{Constructor, Value};
