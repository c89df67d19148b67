//! Reference checking
//!
//! Section content and cross-references point at items by label. Nothing stops an item
//! from being removed while references to it remain, so [`Document::validate`] lists
//! every reference whose target is gone. Validation never fails a load or a save.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::bundle::model::{ContentItem, CrossRefKind, Document};

/// Where a reference was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "in", content = "title", rename_all = "snake_case")]
pub enum ReferenceOrigin {
    CrossRef,
    Section(String),
}

/// A reference whose target does not exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub kind: &'static str,
    pub target: String,
    pub origin: ReferenceOrigin,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            ReferenceOrigin::CrossRef => {
                write!(f, "cross-reference to missing {} '{}'", self.kind, self.target)
            }
            ReferenceOrigin::Section(title) => write!(
                f,
                "section '{}' refers to missing {} '{}'",
                title, self.kind, self.target
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub dangling: Vec<DanglingReference>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.dangling.is_empty()
    }
}

impl Document {
    fn has_target(&self, kind: CrossRefKind, target: &str, titles: &BTreeSet<&str>) -> bool {
        match kind {
            CrossRefKind::Equation => self.equations.contains_key(target),
            CrossRefKind::Figure => self.figures.contains_key(target),
            CrossRefKind::Section => titles.contains(target),
            CrossRefKind::Table => self.tables.contains_key(target),
            CrossRefKind::Theorem => self.theorems.contains_key(target),
            CrossRefKind::Bibliography => self.bibliography.contains_key(target),
        }
    }

    /// Report every reference to a missing item
    pub fn validate(&self) -> ValidationReport {
        let sections = self.walk_sections();
        let titles: BTreeSet<&str> = sections.iter().map(|(_, s)| s.title.as_str()).collect();
        let mut dangling = Vec::new();

        for cross_ref in &self.cross_refs {
            if !self.has_target(cross_ref.kind, &cross_ref.target, &titles) {
                dangling.push(DanglingReference {
                    kind: cross_ref.kind.name(),
                    target: cross_ref.target.clone(),
                    origin: ReferenceOrigin::CrossRef,
                });
            }
        }

        for (_, section) in &sections {
            for item in &section.content {
                let (kind, present) = match item {
                    ContentItem::EquationRef(l) => ("equation", self.equations.contains_key(l)),
                    ContentItem::FigureRef(l) => ("figure", self.figures.contains_key(l)),
                    ContentItem::TableRef(l) => ("table", self.tables.contains_key(l)),
                    ContentItem::TheoremRef(l) => ("theorem", self.theorems.contains_key(l)),
                    ContentItem::AlgorithmRef(l) => ("algorithm", self.algorithms.contains_key(l)),
                    ContentItem::Text(_) | ContentItem::Section(_) => continue,
                };
                if !present {
                    dangling.push(DanglingReference {
                        kind,
                        target: item.reference().unwrap_or_default().to_string(),
                        origin: ReferenceOrigin::Section(section.title.clone()),
                    });
                }
            }
        }

        ValidationReport { dangling }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::model::{BibEntry, CrossRef, Equation};

    #[test]
    fn test_clean_document() {
        let mut doc = Document::new();
        let intro = doc.add_section("Intro");
        doc.add_equation(Equation::new("eq:a"));
        doc.push_content(&intro, ContentItem::EquationRef("eq:a".into()))
            .unwrap();
        doc.add_bib_entry(BibEntry::new("k", "book"));
        doc.add_cross_ref(CrossRef::new(CrossRefKind::Bibliography, "k"));
        doc.add_cross_ref(CrossRef::new(CrossRefKind::Section, "Intro"));
        assert!(doc.validate().is_valid());
    }

    #[test]
    fn test_dangling_references() {
        let mut doc = Document::new();
        let intro = doc.add_section("Intro");
        let sub = doc.add_subsection(&intro, "Detail").unwrap();
        doc.push_content(&sub, ContentItem::FigureRef("fig:x".into()))
            .unwrap();
        doc.add_cross_ref(CrossRef::new(CrossRefKind::Equation, "eq:missing"));

        let report = doc.validate();
        assert_eq!(
            report.dangling,
            vec![
                DanglingReference {
                    kind: "equation",
                    target: "eq:missing".into(),
                    origin: ReferenceOrigin::CrossRef,
                },
                DanglingReference {
                    kind: "figure",
                    target: "fig:x".into(),
                    origin: ReferenceOrigin::Section("Detail".into()),
                },
            ]
        );
        assert_eq!(
            report.dangling[1].to_string(),
            "section 'Detail' refers to missing figure 'fig:x'"
        );
    }
}
