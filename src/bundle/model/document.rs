use std::collections::BTreeMap;

use super::bibliography::BibEntry;
use super::crossref::CrossRef;
use super::equation::Equation;
use super::figure::{Figure, FigureSource};
use super::items::{Algorithm, Table, Theorem};
use super::metadata::{Author, ContentBlock, MetadataValue};
use super::section::{resolve, resolve_mut, ContentItem, Section, SectionPath};
use crate::bundle::error::DocumentError;

/// Where a document is in its load / edit / save cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// Created in memory, never loaded or saved
    Fresh,
    /// Freshly parsed from text
    Loaded,
    /// Changed since it was created, loaded or saved
    Dirty,
    /// Written out; matches what is on disk
    Saved,
}

/// A structured technical document
///
/// Labelled collections are ordered maps, so iteration and saving are deterministic.
/// Section order is reading order.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) metadata: BTreeMap<String, MetadataValue>,
    pub(crate) content_blocks: BTreeMap<String, ContentBlock>,
    pub(crate) style: Option<String>,
    pub(crate) sections: Vec<Section>,
    pub(crate) equations: BTreeMap<String, Equation>,
    pub(crate) figures: BTreeMap<String, Figure>,
    pub(crate) tables: BTreeMap<String, Table>,
    pub(crate) theorems: BTreeMap<String, Theorem>,
    pub(crate) algorithms: BTreeMap<String, Algorithm>,
    pub(crate) bibliography: BTreeMap<String, BibEntry>,
    pub(crate) cross_refs: Vec<CrossRef>,
    pub(crate) state: DocumentState,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys become part of record names, so they are restricted to name characters.
fn check_key(key: &str) -> Result<(), DocumentError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(DocumentError::InvalidKey(key.to_string()))
    }
}

/// Smallest `<prefix>_<n>` not already taken
fn next_id<'a>(prefix: &str, taken: impl Iterator<Item = &'a str> + Clone) -> String {
    (0..)
        .map(|n| format!("{}_{}", prefix, n))
        .find(|candidate| !taken.clone().any(|id| id == candidate))
        .unwrap_or_default()
}

/// Apply `f` to the entry under `label`, keeping it under that label
fn update_entry<T>(
    map: &mut BTreeMap<String, T>,
    label: &str,
    relabel: impl Fn(&mut T, &str),
    f: impl FnOnce(&mut T),
) -> bool {
    match map.get_mut(label) {
        Some(entry) => {
            f(entry);
            relabel(entry, label);
            true
        }
        None => false,
    }
}

/// A subsection sits below its parent and no deeper than the subsection before it.
/// Sections are stored flat with their levels, and any other shape would read back
/// nested differently.
fn check_nesting(
    parent_level: u32,
    previous: Option<&Section>,
    child: &Section,
) -> Result<(), DocumentError> {
    let too_deep = previous.map_or(false, |previous| child.level > previous.level);
    if child.level <= parent_level || too_deep {
        return Err(DocumentError::InvalidLevel(child.level));
    }
    let mut previous = None;
    for grandchild in child.subsections() {
        check_nesting(child.level, previous, grandchild)?;
        previous = Some(grandchild);
    }
    Ok(())
}

fn remove_titled(content: &mut Vec<ContentItem>, title: &str) -> bool {
    if let Some(index) = content
        .iter()
        .position(|item| matches!(item, ContentItem::Section(s) if s.title == title))
    {
        content.remove(index);
        return true;
    }
    content.iter_mut().any(|item| match item {
        ContentItem::Section(section) => remove_titled(&mut section.content, title),
        _ => false,
    })
}

impl Document {
    pub fn new() -> Self {
        Self {
            metadata: BTreeMap::new(),
            content_blocks: BTreeMap::new(),
            style: None,
            sections: Vec::new(),
            equations: BTreeMap::new(),
            figures: BTreeMap::new(),
            tables: BTreeMap::new(),
            theorems: BTreeMap::new(),
            algorithms: BTreeMap::new(),
            bibliography: BTreeMap::new(),
            cross_refs: Vec::new(),
            state: DocumentState::Fresh,
        }
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == DocumentState::Dirty
    }

    pub(crate) fn touch(&mut self) {
        self.state = DocumentState::Dirty;
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.state = DocumentState::Loaded;
    }

    pub(crate) fn mark_saved(&mut self) {
        self.state = DocumentState::Saved;
    }

    // Metadata

    pub fn metadata(&self) -> &BTreeMap<String, MetadataValue> {
        &self.metadata
    }

    pub fn metadata_value(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata.get(key)
    }

    pub fn set_metadata(
        &mut self,
        key: &str,
        value: impl Into<MetadataValue>,
    ) -> Result<(), DocumentError> {
        check_key(key)?;
        let value = match value.into() {
            MetadataValue::Number(n) if !n.is_finite() => {
                return Err(DocumentError::NonFiniteNumber(key.to_string()))
            }
            // An empty author list reads back as an empty list of strings
            MetadataValue::Authors(authors) if authors.is_empty() => {
                MetadataValue::TextList(Vec::new())
            }
            value => value,
        };
        self.metadata.insert(key.to_string(), value);
        self.touch();
        Ok(())
    }

    pub fn remove_metadata(&mut self, key: &str) -> Option<MetadataValue> {
        let removed = self.metadata.remove(key);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(MetadataValue::as_text)
    }

    /// Author names from the `authors` or `author` entry
    pub fn author_names(&self) -> Vec<String> {
        let value = match self.metadata.get("authors").or_else(|| self.metadata.get("author")) {
            Some(value) => value,
            None => return Vec::new(),
        };
        match value {
            MetadataValue::Text(name) => vec![name.clone()],
            other => {
                let authors: Vec<&Author> = other.authors();
                if authors.is_empty() {
                    other.items().unwrap_or_default()
                } else {
                    authors.into_iter().map(|a| a.name.clone()).collect()
                }
            }
        }
    }

    // Content blocks

    pub fn content_blocks(&self) -> &BTreeMap<String, ContentBlock> {
        &self.content_blocks
    }

    pub fn content_block(&self, key: &str) -> Option<&ContentBlock> {
        self.content_blocks.get(key)
    }

    pub fn set_content_block(
        &mut self,
        key: &str,
        value: impl Into<ContentBlock>,
    ) -> Result<(), DocumentError> {
        check_key(key)?;
        self.content_blocks.insert(key.to_string(), value.into());
        self.touch();
        Ok(())
    }

    pub fn remove_content_block(&mut self, key: &str) -> Option<ContentBlock> {
        let removed = self.content_blocks.remove(key);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    // Style

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn set_style(&mut self, style: impl Into<String>) {
        self.style = Some(style.into());
        self.touch();
    }

    pub fn clear_style(&mut self) {
        if self.style.take().is_some() {
            self.touch();
        }
    }

    // Sections

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, path: &SectionPath) -> Option<&Section> {
        resolve(&self.sections, path)
    }

    /// Append a chapter (level 1) at the end of the document
    pub fn add_section(&mut self, title: impl Into<String>) -> SectionPath {
        self.sections.push(Section::new(1, title));
        self.touch();
        SectionPath::root(self.sections.len() - 1)
    }

    /// Append a section of the given level after everything else in the document.
    ///
    /// The section nests under the last section of a lower level, following the same rule
    /// used when reading sections back from a file.
    pub fn add_section_with_level(
        &mut self,
        title: impl Into<String>,
        level: u32,
    ) -> Result<SectionPath, DocumentError> {
        if level == 0 {
            return Err(DocumentError::InvalidLevel(level));
        }
        let section = Section::new(level, title);

        let mut path = match self.sections.last() {
            Some(last) if last.level < level => SectionPath::root(self.sections.len() - 1),
            _ => {
                self.sections.push(section);
                self.touch();
                return Ok(SectionPath::root(self.sections.len() - 1));
            }
        };
        while let Some(index) = self.section(&path).and_then(|parent| {
            parent
                .subsections()
                .enumerate()
                .last()
                .filter(|(_, child)| child.level < level)
                .map(|(index, _)| index)
        }) {
            path = path.child(index);
        }

        let parent = resolve_mut(&mut self.sections, &path)
            .ok_or_else(|| DocumentError::SectionNotFound(path.to_string()))?;
        let index = parent.subsections().count();
        parent.content.push(ContentItem::Section(section));
        self.touch();
        Ok(path.child(index))
    }

    /// Append a subsection one level below `parent`
    pub fn add_subsection(
        &mut self,
        parent: &SectionPath,
        title: impl Into<String>,
    ) -> Result<SectionPath, DocumentError> {
        let section = resolve_mut(&mut self.sections, parent)
            .ok_or_else(|| DocumentError::SectionNotFound(parent.to_string()))?;
        let index = section.subsections().count();
        let level = section.level + 1;
        section.content.push(ContentItem::Section(Section::new(level, title)));
        self.touch();
        Ok(parent.child(index))
    }

    /// First section with the given title, in reading order
    pub fn find_section(&self, title: &str) -> Option<SectionPath> {
        self.walk_sections()
            .into_iter()
            .find(|(_, section)| section.title == title)
            .map(|(path, _)| path)
    }

    pub fn add_text(&mut self, path: &SectionPath, text: impl Into<String>) -> Result<(), DocumentError> {
        self.push_content(path, ContentItem::Text(text.into()))
    }

    /// Append an item to a section's content
    pub fn push_content(&mut self, path: &SectionPath, item: ContentItem) -> Result<(), DocumentError> {
        let section = resolve_mut(&mut self.sections, path)
            .ok_or_else(|| DocumentError::SectionNotFound(path.to_string()))?;
        if let ContentItem::Section(child) = &item {
            check_nesting(section.level, section.subsections().last(), child)?;
        }
        section.content.push(item);
        self.touch();
        Ok(())
    }

    /// Retitle a section and/or replace its leading text. Returns whether it was found.
    pub fn update_section(&mut self, title: &str, new_title: Option<&str>, text: Option<&str>) -> bool {
        let path = match self.find_section(title) {
            Some(path) => path,
            None => return false,
        };
        let section = match resolve_mut(&mut self.sections, &path) {
            Some(section) => section,
            None => return false,
        };
        if let Some(new_title) = new_title {
            section.title = new_title.to_string();
        }
        if let Some(text) = text {
            match section
                .content
                .iter_mut()
                .find(|item| matches!(item, ContentItem::Text(_)))
            {
                Some(slot) => *slot = ContentItem::Text(text.to_string()),
                None => section.content.insert(0, ContentItem::Text(text.to_string())),
            }
        }
        self.touch();
        true
    }

    /// Remove the first section with the given title, subsections included
    pub fn remove_section(&mut self, title: &str) -> bool {
        let removed = match self.sections.iter().position(|s| s.title == title) {
            Some(index) => {
                self.sections.remove(index);
                true
            }
            None => self
                .sections
                .iter_mut()
                .any(|section| remove_titled(&mut section.content, title)),
        };
        if removed {
            self.touch();
        }
        removed
    }

    /// Every section in reading order, with its path
    pub fn walk_sections(&self) -> Vec<(SectionPath, &Section)> {
        fn walk<'a>(
            section: &'a Section,
            path: SectionPath,
            out: &mut Vec<(SectionPath, &'a Section)>,
        ) {
            out.push((path.clone(), section));
            for (index, child) in section.subsections().enumerate() {
                walk(child, path.child(index), out);
            }
        }
        let mut out = Vec::new();
        for (index, section) in self.sections.iter().enumerate() {
            walk(section, SectionPath::root(index), &mut out);
        }
        out
    }

    // Equations

    pub fn equations(&self) -> &BTreeMap<String, Equation> {
        &self.equations
    }

    pub fn equation(&self, label: &str) -> Option<&Equation> {
        self.equations.get(label)
    }

    /// Add an equation, replacing one with the same label. Returns the equation id.
    pub fn add_equation(&mut self, mut equation: Equation) -> String {
        equation.id = match self.equations.get(&equation.label) {
            Some(existing) => existing.id.clone(),
            None => next_id("eq", self.equations.values().map(|e| e.id.as_str())),
        };
        let id = equation.id.clone();
        self.equations.insert(equation.label.clone(), equation);
        self.touch();
        id
    }

    /// Edit an equation in place. Renders derived from a replaced tree are dropped.
    pub fn update_equation(&mut self, label: &str, f: impl FnOnce(&mut Equation)) -> bool {
        let before = match self.equations.get(label) {
            Some(equation) => equation.clone(),
            None => return false,
        };
        let updated = update_entry(
            &mut self.equations,
            label,
            |eq, label| eq.label = label.to_string(),
            |eq| {
                f(eq);
                eq.id = before.id.clone();
                eq.invalidate_renders(&before);
            },
        );
        self.touch();
        updated
    }

    pub fn remove_equation(&mut self, label: &str) -> bool {
        let removed = self.equations.remove(label).is_some();
        if removed {
            self.touch();
        }
        removed
    }

    // Figures

    pub fn figures(&self) -> &BTreeMap<String, Figure> {
        &self.figures
    }

    pub fn figure(&self, label: &str) -> Option<&Figure> {
        self.figures.get(label)
    }

    pub(crate) fn figure_mut(&mut self, label: &str) -> Option<&mut Figure> {
        self.figures.get_mut(label)
    }

    /// Add a figure, replacing one with the same label. Returns the figure id.
    pub fn add_figure(&mut self, mut figure: Figure) -> String {
        figure.id = match self.figures.get(&figure.label) {
            Some(existing) => existing.id.clone(),
            None => next_id("fig", self.figures.values().map(|f| f.id.as_str())),
        };
        let id = figure.id.clone();
        self.figures.insert(figure.label.clone(), figure);
        self.touch();
        id
    }

    /// Edit a figure in place. Changing its code drops the cached fragment and image.
    pub fn update_figure(&mut self, label: &str, f: impl FnOnce(&mut Figure)) -> bool {
        let (id, code) = match self.figures.get(label) {
            Some(figure) => (figure.id.clone(), figure.code().map(str::to_string)),
            None => return false,
        };
        let updated = update_entry(
            &mut self.figures,
            label,
            |fig, label| fig.label = label.to_string(),
            |fig| {
                f(fig);
                fig.id = id;
                if fig.code().map(str::to_string) != code {
                    if let FigureSource::Regenerable { cached, .. } = &mut fig.source {
                        *cached = None;
                    }
                    fig.svg = None;
                }
            },
        );
        self.touch();
        updated
    }

    pub fn remove_figure(&mut self, label: &str) -> bool {
        let removed = self.figures.remove(label).is_some();
        if removed {
            self.touch();
        }
        removed
    }

    // Tables, theorems, algorithms

    pub fn tables(&self) -> &BTreeMap<String, Table> {
        &self.tables
    }

    pub fn table(&self, label: &str) -> Option<&Table> {
        self.tables.get(label)
    }

    pub fn add_table(&mut self, table: Table) {
        self.tables.insert(table.label.clone(), table);
        self.touch();
    }

    pub fn update_table(&mut self, label: &str, f: impl FnOnce(&mut Table)) -> bool {
        let updated = update_entry(&mut self.tables, label, |t, l| t.label = l.to_string(), f);
        if updated {
            self.touch();
        }
        updated
    }

    pub fn remove_table(&mut self, label: &str) -> bool {
        let removed = self.tables.remove(label).is_some();
        if removed {
            self.touch();
        }
        removed
    }

    pub fn theorems(&self) -> &BTreeMap<String, Theorem> {
        &self.theorems
    }

    pub fn theorem(&self, label: &str) -> Option<&Theorem> {
        self.theorems.get(label)
    }

    pub fn add_theorem(&mut self, theorem: Theorem) {
        self.theorems.insert(theorem.label.clone(), theorem);
        self.touch();
    }

    pub fn update_theorem(&mut self, label: &str, f: impl FnOnce(&mut Theorem)) -> bool {
        let updated = update_entry(&mut self.theorems, label, |t, l| t.label = l.to_string(), f);
        if updated {
            self.touch();
        }
        updated
    }

    pub fn remove_theorem(&mut self, label: &str) -> bool {
        let removed = self.theorems.remove(label).is_some();
        if removed {
            self.touch();
        }
        removed
    }

    pub fn algorithms(&self) -> &BTreeMap<String, Algorithm> {
        &self.algorithms
    }

    pub fn algorithm(&self, label: &str) -> Option<&Algorithm> {
        self.algorithms.get(label)
    }

    pub fn add_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithms.insert(algorithm.label.clone(), algorithm);
        self.touch();
    }

    pub fn update_algorithm(&mut self, label: &str, f: impl FnOnce(&mut Algorithm)) -> bool {
        let updated = update_entry(&mut self.algorithms, label, |a, l| a.label = l.to_string(), f);
        if updated {
            self.touch();
        }
        updated
    }

    pub fn remove_algorithm(&mut self, label: &str) -> bool {
        let removed = self.algorithms.remove(label).is_some();
        if removed {
            self.touch();
        }
        removed
    }

    // Bibliography

    pub fn bibliography(&self) -> &BTreeMap<String, BibEntry> {
        &self.bibliography
    }

    pub fn bib_entry(&self, key: &str) -> Option<&BibEntry> {
        self.bibliography.get(key)
    }

    pub fn add_bib_entry(&mut self, entry: BibEntry) {
        self.bibliography.insert(entry.key.clone(), entry);
        self.touch();
    }

    pub fn update_bib_entry(&mut self, key: &str, f: impl FnOnce(&mut BibEntry)) -> bool {
        let updated = update_entry(&mut self.bibliography, key, |b, k| b.key = k.to_string(), f);
        if updated {
            self.touch();
        }
        updated
    }

    pub fn remove_bib_entry(&mut self, key: &str) -> bool {
        let removed = self.bibliography.remove(key).is_some();
        if removed {
            self.touch();
        }
        removed
    }

    /// All entries as BibTeX, in key order
    pub fn export_bibtex(&self) -> String {
        self.bibliography
            .values()
            .map(BibEntry::to_bibtex)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    // Cross-references

    pub fn cross_refs(&self) -> &[CrossRef] {
        &self.cross_refs
    }

    pub fn add_cross_ref(&mut self, cross_ref: CrossRef) {
        self.cross_refs.push(cross_ref);
        self.touch();
    }

    /// Remove every cross-reference to `target`. Returns how many were removed.
    pub fn remove_cross_refs_to(&mut self, target: &str) -> usize {
        let before = self.cross_refs.len();
        self.cross_refs.retain(|r| r.target != target);
        let removed = before - self.cross_refs.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::expression::ExpressionNode;
    use crate::bundle::model::CrossRefKind;

    #[test]
    fn test_new_document_is_fresh_and_empty() {
        let doc = Document::new();
        assert_eq!(doc.state(), DocumentState::Fresh);
        assert!(doc.sections().is_empty());
        assert_eq!(doc.title(), None);
    }

    #[test]
    fn test_mutation_marks_dirty() {
        let mut doc = Document::new();
        doc.set_metadata("title", "T").unwrap();
        assert_eq!(doc.state(), DocumentState::Dirty);
        assert_eq!(doc.title(), Some("T"));
    }

    #[test]
    fn test_invalid_metadata_key() {
        let mut doc = Document::new();
        assert_eq!(
            doc.set_metadata("bad key", "x"),
            Err(DocumentError::InvalidKey("bad key".to_string()))
        );
        assert!(doc.set_content_block("", "x").is_err());
    }

    #[test]
    fn test_overwriting_a_label_keeps_size_and_id() {
        let mut doc = Document::new();
        let first = doc.add_equation(Equation::new("eq:a").with_latex("a"));
        let second = doc.add_equation(Equation::new("eq:b").with_latex("b"));
        assert_eq!(first, "eq_0");
        assert_eq!(second, "eq_1");

        let again = doc.add_equation(Equation::new("eq:a").with_latex("a2"));
        assert_eq!(again, "eq_0");
        assert_eq!(doc.equations().len(), 2);
        assert_eq!(doc.equation("eq:a").unwrap().latex, "a2");
    }

    #[test]
    fn test_ids_fill_gaps() {
        let mut doc = Document::new();
        doc.add_figure(Figure::new("f:a", "", FigureSource::Static));
        doc.add_figure(Figure::new("f:b", "", FigureSource::Static));
        assert!(doc.remove_figure("f:a"));
        assert_eq!(doc.add_figure(Figure::new("f:c", "", FigureSource::Static)), "fig_0");
    }

    #[test]
    fn test_update_equation_clears_derived_renders() {
        let mut doc = Document::new();
        doc.add_equation(
            Equation::new("eq:a")
                .with_typst("x")
                .with_ast(ExpressionNode::symbol("x")),
        );
        assert!(doc.update_equation("eq:a", |eq| {
            eq.ast = Some(ExpressionNode::symbol("y"));
            eq.label = "renamed".into();
        }));
        let eq = doc.equation("eq:a").unwrap();
        assert_eq!(eq.typst, "");
        assert_eq!(eq.label, "eq:a");
        assert!(!doc.update_equation("missing", |_| {}));
    }

    #[test]
    fn test_update_figure_code_drops_cache() {
        let mut doc = Document::new();
        let mut figure = Figure::new("fig:a", "A", FigureSource::regenerable("a()"));
        if let FigureSource::Regenerable { cached, .. } = &mut figure.source {
            *cached = Some(crate::bundle::model::CachedFragment::for_code("a()", "#x"));
        }
        figure.svg = Some("<svg/>".into());
        doc.add_figure(figure);

        doc.update_figure("fig:a", |f| f.caption = "New".into());
        assert!(doc.figure("fig:a").unwrap().has_image());

        doc.update_figure("fig:a", |f| f.source = FigureSource::regenerable("b()"));
        let figure = doc.figure("fig:a").unwrap();
        assert_eq!(figure.fragment(), None);
        assert_eq!(figure.svg, None);
    }

    #[test]
    fn test_removing_equation_keeps_section_reference() {
        let mut doc = Document::new();
        let intro = doc.add_section("Intro");
        doc.add_equation(Equation::new("eq:a"));
        doc.push_content(&intro, ContentItem::EquationRef("eq:a".into()))
            .unwrap();
        assert!(doc.remove_equation("eq:a"));
        assert!(!doc.remove_equation("eq:a"));
        assert_eq!(
            doc.section(&intro).unwrap().content,
            vec![ContentItem::EquationRef("eq:a".into())]
        );
    }

    #[test]
    fn test_add_section_with_level_nests_under_last_lower_level() {
        let mut doc = Document::new();
        doc.add_section_with_level("Introduction", 1).unwrap();
        let background = doc.add_section_with_level("Background", 2).unwrap();
        let detail = doc.add_section_with_level("Detail", 3).unwrap();
        let motivation = doc.add_section_with_level("Motivation", 2).unwrap();
        let methods = doc.add_section_with_level("Methods", 1).unwrap();

        assert_eq!(background, SectionPath::from(vec![0, 0]));
        assert_eq!(detail, SectionPath::from(vec![0, 0, 0]));
        assert_eq!(motivation, SectionPath::from(vec![0, 1]));
        assert_eq!(methods, SectionPath::root(1));
        assert_eq!(doc.sections().len(), 2);
        assert_eq!(
            doc.add_section_with_level("Nope", 0),
            Err(DocumentError::InvalidLevel(0))
        );
    }

    #[test]
    fn test_subsections_and_find() {
        let mut doc = Document::new();
        let ch = doc.add_section("Chapter");
        let sub = doc.add_subsection(&ch, "Part").unwrap();
        assert_eq!(doc.section(&sub).unwrap().level, 2);
        assert_eq!(doc.find_section("Part"), Some(sub.clone()));
        assert_eq!(doc.find_section("Missing"), None);
        assert!(doc
            .push_content(&sub, ContentItem::Section(Section::new(2, "Same level")))
            .is_err());
        assert!(doc
            .add_subsection(&SectionPath::root(5), "Nowhere")
            .is_err());
    }

    #[test]
    fn test_push_content_rejects_shapes_a_file_cannot_hold() {
        let mut doc = Document::new();
        let a = doc.add_section("A");
        doc.add_subsection(&a, "B").unwrap();

        // After a level-2 subsection, a level-3 one would read back under B
        assert_eq!(
            doc.push_content(&a, ContentItem::Section(Section::new(3, "C"))),
            Err(DocumentError::InvalidLevel(3))
        );
        // A pushed subtree is checked all the way down
        let flat_child = Section::new(2, "D").with_item(ContentItem::Section(Section::new(2, "E")));
        assert_eq!(
            doc.push_content(&a, ContentItem::Section(flat_child)),
            Err(DocumentError::InvalidLevel(2))
        );
        let rising = Section::new(2, "F")
            .with_item(ContentItem::Section(Section::new(3, "G")))
            .with_item(ContentItem::Section(Section::new(4, "H")));
        assert_eq!(
            doc.push_content(&a, ContentItem::Section(rising)),
            Err(DocumentError::InvalidLevel(4))
        );
        assert_eq!(doc.section(&a).unwrap().subsections().count(), 1);

        let falling = Section::new(2, "I")
            .with_item(ContentItem::Section(Section::new(4, "J")))
            .with_item(ContentItem::Section(Section::new(3, "K")));
        doc.push_content(&a, ContentItem::Section(falling)).unwrap();
        assert_eq!(doc.section(&a).unwrap().subsections().count(), 2);
    }

    #[test]
    fn test_update_and_remove_section() {
        let mut doc = Document::new();
        let intro = doc.add_section("Introduction");
        doc.add_text(&intro, "This is the intro.").unwrap();
        assert!(doc.update_section("Introduction", None, Some("This is the REVISED intro.")));
        assert_eq!(doc.section(&intro).unwrap().text(), "This is the REVISED intro.");

        assert!(doc.update_section("Introduction", Some("Chapter 1: Introduction"), None));
        assert!(doc.find_section("Chapter 1: Introduction").is_some());

        let ch2 = doc.add_section("Chapter 2");
        doc.add_subsection(&ch2, "Nested").unwrap();
        doc.add_section("Chapter 3");
        assert!(doc.remove_section("Nested"));
        assert!(doc.remove_section("Chapter 2"));
        assert!(!doc.remove_section("nonexistent"));
        let titles: Vec<_> = doc.sections().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Chapter 1: Introduction", "Chapter 3"]);
    }

    #[test]
    fn test_walk_sections_is_preorder() {
        let mut doc = Document::new();
        let a = doc.add_section("A");
        doc.add_subsection(&a, "B").unwrap();
        doc.add_section("C");
        let titles: Vec<_> = doc
            .walk_sections()
            .into_iter()
            .map(|(_, s)| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_metadata_values_that_cannot_be_written() {
        let mut doc = Document::new();
        assert_eq!(
            doc.set_metadata("x", f64::NAN),
            Err(DocumentError::NonFiniteNumber("x".to_string()))
        );
        assert!(doc.set_metadata("y", f64::INFINITY).is_err());
        assert!(doc.metadata_value("x").is_none());

        doc.set_metadata("authors", Vec::<Author>::new()).unwrap();
        assert_eq!(
            doc.metadata_value("authors"),
            Some(&MetadataValue::TextList(Vec::new()))
        );
    }

    #[test]
    fn test_author_names() {
        let mut doc = Document::new();
        assert!(doc.author_names().is_empty());
        doc.set_metadata("author", "Jane Smith").unwrap();
        assert_eq!(doc.author_names(), vec!["Jane Smith"]);
        doc.set_metadata("authors", vec![Author::new("Ada"), Author::new("Grace")])
            .unwrap();
        assert_eq!(doc.author_names(), vec!["Ada", "Grace"]);
    }

    #[test]
    fn test_bibtex_export_in_key_order() {
        let mut doc = Document::new();
        doc.add_bib_entry(BibEntry::new("zeta", "misc"));
        doc.add_bib_entry(BibEntry::new("alpha", "book").with_field("year", "2001"));
        assert_eq!(
            doc.export_bibtex(),
            "@book{alpha,\n  year = {2001},\n}\n\n@misc{zeta,\n}"
        );
    }

    #[test]
    fn test_cross_refs() {
        let mut doc = Document::new();
        doc.add_cross_ref(CrossRef::new(CrossRefKind::Equation, "eq:a"));
        doc.add_cross_ref(CrossRef::new(CrossRefKind::Figure, "fig:a"));
        assert_eq!(doc.remove_cross_refs_to("eq:a"), 1);
        assert_eq!(doc.cross_refs().len(), 1);
    }
}
