use serde::Serialize;

use crate::bundle::model::{Section, SectionPath};

/// A table-of-contents line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    /// Hierarchical number, e.g. `2.1`
    pub number: String,
    pub title: String,
    pub level: u32,
    pub path: SectionPath,
}

/// Table of contents in reading order, numbered by position in the tree
pub fn table_of_contents(roots: &[Section]) -> Vec<TocEntry> {
    fn visit(section: &Section, number: String, path: SectionPath, out: &mut Vec<TocEntry>) {
        out.push(TocEntry {
            number: number.clone(),
            title: section.title.clone(),
            level: section.level,
            path: path.clone(),
        });
        for (index, child) in section.subsections().enumerate() {
            visit(child, format!("{}.{}", number, index + 1), path.child(index), out);
        }
    }

    let mut out = Vec::new();
    for (index, root) in roots.iter().enumerate() {
        visit(root, (index + 1).to_string(), SectionPath::root(index), &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::model::ContentItem;

    #[test]
    fn test_empty() {
        assert!(table_of_contents(&[]).is_empty());
    }

    #[test]
    fn test_numbers() {
        let roots = vec![
            Section::new(1, "Introduction")
                .with_item(ContentItem::Section(Section::new(2, "Background")))
                .with_item(ContentItem::Section(Section::new(2, "Motivation"))),
            Section::new(1, "Methods"),
        ];
        let numbers: Vec<_> = table_of_contents(&roots)
            .into_iter()
            .map(|e| (e.number, e.title))
            .collect();
        assert_eq!(
            numbers,
            vec![
                ("1".to_string(), "Introduction".to_string()),
                ("1.1".to_string(), "Background".to_string()),
                ("1.2".to_string(), "Motivation".to_string()),
                ("2".to_string(), "Methods".to_string()),
            ]
        );
    }
}
