use serde::Serialize;
use std::fmt;

/// One item of section content, in reading order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContentItem {
    Text(String),
    EquationRef(String),
    FigureRef(String),
    TableRef(String),
    TheoremRef(String),
    AlgorithmRef(String),
    Section(Section),
}

impl ContentItem {
    /// The label this item refers to, for reference items
    pub fn reference(&self) -> Option<&str> {
        match self {
            ContentItem::EquationRef(label)
            | ContentItem::FigureRef(label)
            | ContentItem::TableRef(label)
            | ContentItem::TheoremRef(label)
            | ContentItem::AlgorithmRef(label) => Some(label),
            _ => None,
        }
    }
}

/// A chapter, section or subsection. Level 1 is the outermost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub level: u32,
    pub title: String,
    pub content: Vec<ContentItem>,
}

impl Section {
    pub fn new(level: u32, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            content: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(ContentItem::Text(text.into()));
        self
    }

    pub fn with_item(mut self, item: ContentItem) -> Self {
        self.content.push(item);
        self
    }

    pub fn subsections(&self) -> impl Iterator<Item = &Section> {
        self.content.iter().filter_map(|item| match item {
            ContentItem::Section(section) => Some(section),
            _ => None,
        })
    }

    pub fn subsections_mut(&mut self) -> impl Iterator<Item = &mut Section> {
        self.content.iter_mut().filter_map(|item| match item {
            ContentItem::Section(section) => Some(section),
            _ => None,
        })
    }

    /// Concatenated text items of this section (not of its subsections)
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|item| match item {
                ContentItem::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Number of sections in this subtree, this one included
    pub fn count(&self) -> usize {
        1 + self.subsections().map(Section::count).sum::<usize>()
    }
}

/// Address of a section: index among the roots, then index among each parent's
/// subsections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SectionPath(Vec<usize>);

impl SectionPath {
    pub fn root(index: usize) -> Self {
        SectionPath(vec![index])
    }

    /// Path of the `index`th subsection of this section
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        SectionPath(indices)
    }

    pub fn parent(&self) -> Option<SectionPath> {
        (self.0.len() > 1).then(|| SectionPath(self.0[..self.0.len() - 1].to_vec()))
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<usize>> for SectionPath {
    fn from(indices: Vec<usize>) -> Self {
        SectionPath(indices)
    }
}

impl fmt::Display for SectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("/"))
    }
}

/// Resolve a path against a list of root sections
pub fn resolve<'a>(roots: &'a [Section], path: &SectionPath) -> Option<&'a Section> {
    let (first, rest) = path.indices().split_first()?;
    let mut section = roots.get(*first)?;
    for index in rest {
        section = section.subsections().nth(*index)?;
    }
    Some(section)
}

pub fn resolve_mut<'a>(roots: &'a mut [Section], path: &SectionPath) -> Option<&'a mut Section> {
    let (first, rest) = path.indices().split_first()?;
    let mut section = roots.get_mut(*first)?;
    for index in rest {
        section = section.subsections_mut().nth(*index)?;
    }
    Some(section)
}
