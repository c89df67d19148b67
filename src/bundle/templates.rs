//! Starter documents
//!
//! A template seeds a fresh document with descriptive metadata, an empty chapter
//! outline and the style it is meant to be rendered with.

use serde::Serialize;

use crate::bundle::error::DocumentError;
use crate::bundle::model::{Document, DocumentState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub style: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub layout: &'static str,
    #[serde(skip)]
    metadata: &'static [(&'static str, &'static str)],
    #[serde(skip)]
    chapters: &'static [&'static str],
}

const TEMPLATES: &[TemplateInfo] = &[
    TemplateInfo {
        name: "MIT Thesis",
        description: "PhD thesis format for MIT",
        style: "mit-thesis",
        required: &["Title", "Abstract (at most 350 words)", "3+ chapters", "Bibliography"],
        optional: &["Acknowledgments", "Appendices"],
        layout: "US Letter, 1\" margins, New Computer Modern font",
        metadata: &[
            ("type", "PhD Thesis"),
            ("institution", "Massachusetts Institute of Technology"),
            ("degree", "Doctor of Philosophy"),
        ],
        chapters: &["Introduction", "Background", "Methodology", "Results", "Conclusion"],
    },
    TemplateInfo {
        name: "arXiv Paper",
        description: "Standard research paper for arXiv",
        style: "arxiv-paper",
        required: &["Title", "Abstract", "Introduction", "Conclusion"],
        optional: &["Appendices"],
        layout: "US Letter, standard article format",
        metadata: &[("type", "Research Paper")],
        chapters: &[
            "Abstract",
            "Introduction",
            "Related Work",
            "Method",
            "Experiments",
            "Conclusion",
        ],
    },
];

/// Names of the available templates
pub fn list() -> Vec<&'static str> {
    TEMPLATES.iter().map(|t| t.name).collect()
}

pub fn info(name: &str) -> Option<&'static TemplateInfo> {
    TEMPLATES.iter().find(|t| t.name == name)
}

impl Document {
    pub fn from_template(name: &str) -> Result<Document, DocumentError> {
        let template = info(name).ok_or_else(|| DocumentError::UnknownTemplate(name.to_string()))?;

        let mut doc = Document::new();
        for (key, value) in template.metadata {
            doc.set_metadata(key, *value)?;
        }
        for chapter in template.chapters {
            doc.add_section(*chapter);
        }
        doc.set_style(template.style);
        doc.state = DocumentState::Fresh;
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mit_thesis() {
        let doc = Document::from_template("MIT Thesis").unwrap();
        assert_eq!(doc.style(), Some("mit-thesis"));
        assert_eq!(doc.sections().len(), 5);
        assert_eq!(doc.sections()[0].title, "Introduction");
        assert_eq!(
            doc.metadata_value("degree").and_then(|v| v.as_text()),
            Some("Doctor of Philosophy")
        );
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_arxiv_paper() {
        let doc = Document::from_template("arXiv Paper").unwrap();
        assert_eq!(doc.style(), Some("arxiv-paper"));
        assert_eq!(doc.sections().len(), 6);
    }

    #[test]
    fn test_unknown_template() {
        assert_eq!(
            Document::from_template("Letter").unwrap_err(),
            DocumentError::UnknownTemplate("Letter".into())
        );
        assert!(info("Letter").is_none());
    }

    #[test]
    fn test_list_and_info() {
        assert_eq!(list(), vec!["MIT Thesis", "arXiv Paper"]);
        assert_eq!(info("arXiv Paper").unwrap().required.len(), 4);
    }
}
