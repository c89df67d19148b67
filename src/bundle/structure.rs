//! Section structure: flat <-> nested conversion and the table of contents

pub mod section_tree;
pub mod toc;

pub use section_tree::{flatten, reconstruct, FlatItem, FlatSection, SectionTreeBuilder};
pub use toc::{table_of_contents, TocEntry};
