//! Section Tree Builder for Flat <-> Nested Conversions
//!
//! Sections are saved as a flat, level-tagged list in pre-order:
//!
//! ```text
//! section_0 = Section(level = 1, title = "A", content = List(Text("..."), Subsection))
//! section_1 = Section(level = 2, title = "B", ...)
//! section_2 = Section(level = 1, title = "C", ...)
//! ```
//!
//! A `Subsection` marker records where a child section sat among its parent's content, so
//! prose written after a subsection stays after it.
//!
//! # Reconstruction
//!
//! [`SectionTreeBuilder`] keeps a stack of open sections. An incoming section closes every
//! open section at the same or a deeper level. A closed section is attached to the section
//! below it on the stack (filling that section's next `Subsection` slot) or becomes a root
//! when nothing is below it. Level jumps are accepted as they come: a level-3 section
//! right after a level-1 section is a child of that level-1 section.

use crate::bundle::model::{ContentItem, Section};

/// Content of a flattened section
#[derive(Debug, Clone, PartialEq)]
pub enum FlatItem {
    /// Any content item except a nested section
    Item(ContentItem),
    /// Where a child section goes
    Subsection,
}

/// A section without its children
#[derive(Debug, Clone, PartialEq)]
pub struct FlatSection {
    pub level: u32,
    pub title: String,
    pub items: Vec<FlatItem>,
}

impl FlatSection {
    pub fn new(level: u32, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            items: Vec::new(),
        }
    }
}

/// Flatten a section tree in pre-order: each parent right before its children, siblings in
/// content order.
pub fn flatten(roots: &[Section]) -> Vec<FlatSection> {
    fn visit(section: &Section, out: &mut Vec<FlatSection>) {
        let items = section
            .content
            .iter()
            .map(|item| match item {
                ContentItem::Section(_) => FlatItem::Subsection,
                other => FlatItem::Item(other.clone()),
            })
            .collect();
        out.push(FlatSection {
            level: section.level,
            title: section.title.clone(),
            items,
        });
        for child in section.subsections() {
            visit(child, out);
        }
    }

    let mut out = Vec::new();
    for root in roots {
        visit(root, &mut out);
    }
    out
}

/// A section still open on the builder stack
#[derive(Debug)]
struct Open {
    level: u32,
    title: String,
    slots: Vec<Option<ContentItem>>,
}

impl Open {
    fn new(flat: FlatSection) -> Self {
        let slots = flat
            .items
            .into_iter()
            .map(|item| match item {
                FlatItem::Item(item) => Some(item),
                FlatItem::Subsection => None,
            })
            .collect();
        Self {
            level: flat.level,
            title: flat.title,
            slots,
        }
    }

    fn attach(&mut self, child: Section) {
        let item = ContentItem::Section(child);
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => *slot = Some(item),
            None => self.slots.push(Some(item)),
        }
    }

    /// Unfilled slots are dropped.
    fn close(self) -> Section {
        Section {
            level: self.level,
            title: self.title,
            content: self.slots.into_iter().flatten().collect(),
        }
    }
}

/// Rebuilds nesting from a flat, level-tagged section sequence
#[derive(Debug, Default)]
pub struct SectionTreeBuilder {
    stack: Vec<Open>,
    roots: Vec<Section>,
}

impl SectionTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process the next section in file order
    pub fn push(&mut self, section: FlatSection) {
        while self
            .stack
            .last()
            .is_some_and(|open| open.level >= section.level)
        {
            self.close_top();
        }
        self.stack.push(Open::new(section));
    }

    fn close_top(&mut self) {
        if let Some(open) = self.stack.pop() {
            let section = open.close();
            match self.stack.last_mut() {
                Some(parent) => parent.attach(section),
                None => self.roots.push(section),
            }
        }
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Close every open section and return the roots
    pub fn finish(mut self) -> Vec<Section> {
        while !self.stack.is_empty() {
            self.close_top();
        }
        self.roots
    }
}

/// Rebuild the section tree from its flattened form
pub fn reconstruct(flat: impl IntoIterator<Item = FlatSection>) -> Vec<Section> {
    let mut builder = SectionTreeBuilder::new();
    for section in flat {
        builder.push(section);
    }
    builder.finish()
}
