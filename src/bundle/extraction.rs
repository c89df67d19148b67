//! Typed records recovered from parsed `define` records
//!
//! Every record is handled on its own. The family prefix of its name decides what it
//! becomes:
//!
//! | prefix      | constructor   | becomes                  |
//! |-------------|---------------|--------------------------|
//! | `meta_`     | (value)       | metadata entry           |
//! | `block_`    | (value)       | content block            |
//! | `eq_`       | `Equation`    | equation                 |
//! | `fig_`      | `Figure`      | figure                   |
//! | `table_`    | `Table`       | table                    |
//! | `thm_`      | `Theorem`     | theorem                  |
//! | `alg_`      | `Algorithm`   | algorithm                |
//! | `bib_`      | `BibEntry`    | bibliography entry       |
//! | `crossref_` | `CrossRef`    | cross-reference          |
//! | `section_`  | `Section`     | flat section             |
//!
//! Fields are looked up by name, so their order does not matter and a missing field takes a
//! default. A record that cannot become its family's type is rejected with a
//! [`SkipReason`](crate::bundle::parsing::SkipReason).

pub mod family;
pub mod fields;
pub mod metadata;
pub mod typed;

pub use family::{Family, LEGACY_METADATA};
pub use fields::Fields;
pub use metadata::{content_block, metadata_value};
pub use typed::{
    algorithm, bib_entry, cross_ref, equation, figure, legacy_metadata, section, table, theorem,
};
