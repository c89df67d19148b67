//! Read-only overviews of a document: table of contents, summary and item listings

use serde::Serialize;

use crate::bundle::model::{ContentBlock, Document, MetadataValue};
use crate::bundle::structure::{table_of_contents, TocEntry};

pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub title: String,
    pub authors: Vec<String>,
    pub sections: usize,
    pub equations: usize,
    pub figures: usize,
    pub tables: usize,
    pub theorems: usize,
    pub algorithms: usize,
    pub citations: usize,
    pub abstract_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquationInfo {
    pub label: String,
    pub id: String,
    pub latex: String,
    pub has_ast: bool,
    pub numbered: bool,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureInfo {
    pub label: String,
    pub id: String,
    pub caption: String,
    pub has_code: bool,
    pub has_image: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableInfo {
    pub label: String,
    pub caption: String,
    pub columns: usize,
    pub rows: usize,
}

impl Document {
    pub fn toc(&self) -> Vec<TocEntry> {
        table_of_contents(self.sections())
    }

    fn abstract_text(&self) -> Option<String> {
        match self.metadata_value("abstract") {
            Some(MetadataValue::Text(text)) => Some(text.clone()),
            _ => match self.content_block("abstract") {
                Some(ContentBlock::Text(text)) => Some(text.clone()),
                _ => None,
            },
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            title: self.title().unwrap_or(UNTITLED).to_string(),
            authors: self.author_names(),
            sections: self.sections().iter().map(|s| s.count()).sum(),
            equations: self.equations().len(),
            figures: self.figures().len(),
            tables: self.tables().len(),
            theorems: self.theorems().len(),
            algorithms: self.algorithms().len(),
            citations: self.bibliography().len(),
            abstract_words: self
                .abstract_text()
                .map(|text| text.split_whitespace().count())
                .unwrap_or(0),
        }
    }

    pub fn list_equations(&self) -> Vec<EquationInfo> {
        self.equations()
            .values()
            .map(|eq| EquationInfo {
                label: eq.label.clone(),
                id: eq.id.clone(),
                latex: eq.latex.clone(),
                has_ast: eq.ast.is_some(),
                numbered: eq.numbered,
                verified: eq.verified,
            })
            .collect()
    }

    pub fn list_figures(&self) -> Vec<FigureInfo> {
        self.figures()
            .values()
            .map(|fig| FigureInfo {
                label: fig.label.clone(),
                id: fig.id.clone(),
                caption: fig.caption.clone(),
                has_code: fig.has_code(),
                has_image: fig.has_image(),
            })
            .collect()
    }

    pub fn list_tables(&self) -> Vec<TableInfo> {
        self.tables()
            .values()
            .map(|table| TableInfo {
                label: table.label.clone(),
                caption: table.caption.clone(),
                columns: table.columns(),
                rows: table.rows.len(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::model::{Author, Equation, Figure, FigureSource, Table};

    #[test]
    fn test_summary_of_empty_document() {
        let summary = Document::new().summary();
        assert_eq!(summary.title, "Untitled");
        assert_eq!(summary.sections, 0);
        assert_eq!(summary.equations, 0);
    }

    #[test]
    fn test_summary_counts() {
        let mut doc = Document::new();
        doc.set_metadata("title", "Test Thesis").unwrap();
        doc.set_metadata("authors", vec![Author::new("Jane Smith").with_affiliation("MIT")])
            .unwrap();
        doc.set_metadata("abstract", "This is a test abstract with some words.")
            .unwrap();
        let intro = doc.add_section("Introduction");
        doc.add_subsection(&intro, "Scope").unwrap();
        doc.add_section("Methods");
        doc.add_equation(Equation::new("eq1").with_latex("E = mc^2"));
        doc.add_equation(Equation::new("eq2").with_latex("F = ma"));
        doc.add_figure(Figure::new("fig1", "A test figure", FigureSource::regenerable("diagram()")));

        let summary = doc.summary();
        assert_eq!(summary.title, "Test Thesis");
        assert_eq!(summary.authors, vec!["Jane Smith"]);
        assert_eq!(summary.sections, 3);
        assert_eq!(summary.equations, 2);
        assert_eq!(summary.figures, 1);
        assert_eq!(summary.abstract_words, 8);
    }

    #[test]
    fn test_listings() {
        let mut doc = Document::new();
        doc.add_figure(Figure::new("sine", "Sine wave", FigureSource::regenerable("plot(sin(x))")));
        doc.add_figure(Figure::new("data", "Experimental data", FigureSource::imported("data.png")));
        doc.add_table(Table::new(
            "results",
            "Results table",
            vec!["Method".into(), "Score".into()],
            vec![vec!["A".into(), "90".into()], vec!["B".into(), "85".into()]],
        ));

        let figures = doc.list_figures();
        assert_eq!(figures[0].label, "data");
        assert!(figures[0].has_image);
        assert!(!figures[0].has_code);
        assert!(figures[1].has_code);

        let tables = doc.list_tables();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].caption, "Results table");
        assert_eq!((tables[0].columns, tables[0].rows), (2, 2));
    }
}
