//! Sample documents and helpers for tests
//!
//! Tests that need "a realistic document" should take one from here rather than building
//! their own, so that a change to the model only has to be reflected in one place.

use crate::bundle::expression::ExpressionNode;
use crate::bundle::model::{
    Algorithm, Author, BibEntry, ContentItem, CrossRef, CrossRefKind, Document, Equation, Figure,
    FigureSource, Section, Table, Theorem,
};

/// A hand-written file in the older layout: metadata in a single `doc_metadata` record,
/// no format version, one record the reader cannot use.
pub const LEGACY_SOURCE: &str = r#"import "examples/documents/kleisdoc_types.kleis"

define doc_metadata = Metadata(title = "Old Notes", date = "2023-01-01")

define meta_date = "2024-06-01"

define eq_0 = Equation(
    id = "eq_0",
    label = "eq:old",
    latex = "a + b"
)

define fig_0 = Figure(label = "fig:broken", source = Teleport("x"))

define section_0 = Section(level = 1, title = "Notes", content = List(Text("Kept.")))
"#;

/// `x = 1` as an expression tree
pub fn x_equals_one() -> ExpressionNode {
    ExpressionNode::apply(
        "equals",
        vec![ExpressionNode::symbol("x"), ExpressionNode::literal("1")],
    )
}

/// Titled document with a single equation `eq:e1`
pub fn equation_document() -> Document {
    let mut doc = Document::new();
    doc.set_metadata("title", "T").unwrap();
    doc.add_equation(Equation::new("eq:e1").with_ast(x_equals_one()));
    doc
}

/// Three top-level sections and nothing else
pub fn chapters_document() -> Document {
    let mut doc = Document::new();
    for title in ["Intro", "Methods", "Conclusion"] {
        doc.add_section(title);
    }
    doc
}

/// A document using every kind of item, with nested sections that refer to them
pub fn full_document() -> Document {
    let mut doc = Document::new();
    doc.set_metadata("title", "Field Equations").unwrap();
    doc.set_metadata(
        "authors",
        vec![
            Author::new("Ada Byron").with_affiliation("Analytical Society"),
            Author::new("Carl Gauss").with_role("advisor"),
        ],
    )
    .unwrap();
    doc.set_metadata("abstract", "We relate curvature to matter.")
        .unwrap();
    doc.set_metadata("keywords", vec!["gravity".to_string(), "geometry".to_string()])
        .unwrap();
    doc.set_metadata("draft", true).unwrap();
    doc.set_metadata("year", 2024.0).unwrap();
    doc.set_content_block("acknowledgments", "Thanks to the reviewers.")
        .unwrap();
    doc.set_style("mit-thesis");

    doc.add_equation(
        Equation::new("eq:einstein")
            .with_latex("G_{\\mu\\nu} = 8\\pi T_{\\mu\\nu}")
            .with_ast(ExpressionNode::apply(
                "equals",
                vec![
                    ExpressionNode::symbol("G"),
                    ExpressionNode::apply(
                        "times",
                        vec![ExpressionNode::literal("8"), ExpressionNode::symbol("T")],
                    ),
                ],
            )),
    );
    doc.add_equation(
        Equation::new("eq:gap")
            .with_ast(ExpressionNode::apply(
                "plus",
                vec![ExpressionNode::placeholder(0, "lhs"), ExpressionNode::symbol("y")],
            ))
            .unnumbered(),
    );
    doc.add_figure(Figure::new(
        "fig:sine",
        "A sine wave",
        FigureSource::regenerable("plot(sin(x))"),
    ));
    doc.add_figure(Figure::new(
        "fig:photo",
        "Apparatus",
        FigureSource::imported("figures/apparatus.png"),
    ));
    doc.add_table(Table::new(
        "tab:results",
        "Results",
        vec!["Method".into(), "Score".into()],
        vec![vec!["A".into(), "90".into()], vec!["B".into(), "85".into()]],
    ));
    doc.add_theorem(
        Theorem::new("thm:main", "theorem", "Every bounded sequence has a convergent subsequence.")
            .with_name("Bolzano-Weierstrass")
            .with_proof("Bisect repeatedly."),
    );
    doc.add_algorithm(Algorithm::new(
        "alg:search",
        "Binary search",
        vec!["Pick the middle".into(), "Recurse on one half".into()],
    ));
    doc.add_bib_entry(
        BibEntry::new("einstein1915", "article")
            .with_field("author", "Albert Einstein")
            .with_field("title", "Die Feldgleichungen der Gravitation")
            .with_field("year", "1915"),
    );
    doc.add_cross_ref(CrossRef::new(CrossRefKind::Equation, "eq:einstein").with_display("Eq. 1"));
    doc.add_cross_ref(CrossRef::new(CrossRefKind::Bibliography, "einstein1915"));

    let intro = doc.add_section("Introduction");
    doc.add_text(&intro, "Gravity is geometry.").unwrap();
    doc.push_content(&intro, ContentItem::EquationRef("eq:einstein".into()))
        .unwrap();
    let background = doc.add_subsection(&intro, "Background").unwrap();
    doc.push_content(&background, ContentItem::TheoremRef("thm:main".into()))
        .unwrap();
    let detail = doc.add_subsection(&background, "Detail").unwrap();
    doc.push_content(&detail, ContentItem::AlgorithmRef("alg:search".into()))
        .unwrap();
    let results = doc.add_section("Results");
    doc.push_content(&results, ContentItem::FigureRef("fig:sine".into()))
        .unwrap();
    doc.push_content(&results, ContentItem::TableRef("tab:results".into()))
        .unwrap();
    doc.add_text(&results, "It works.").unwrap();
    doc
}

/// Sections in reading order as `(depth, level, title)`
pub fn outline(doc: &Document) -> Vec<(usize, u32, String)> {
    doc.walk_sections()
        .into_iter()
        .map(|(path, section): (_, &Section)| (path.depth(), section.level, section.title.clone()))
        .collect()
}

/// Assert that two documents agree on everything a save/load cycle must keep
pub fn assert_same_content(expected: &Document, actual: &Document) {
    assert_eq!(expected.metadata(), actual.metadata(), "metadata differs");
    assert_eq!(
        expected.content_blocks(),
        actual.content_blocks(),
        "content blocks differ"
    );
    assert_eq!(expected.style(), actual.style(), "style differs");
    assert_eq!(expected.sections(), actual.sections(), "sections differ");
    assert_eq!(expected.equations(), actual.equations(), "equations differ");
    assert_eq!(expected.figures(), actual.figures(), "figures differ");
    assert_eq!(expected.tables(), actual.tables(), "tables differ");
    assert_eq!(expected.theorems(), actual.theorems(), "theorems differ");
    assert_eq!(expected.algorithms(), actual.algorithms(), "algorithms differ");
    assert_eq!(
        expected.bibliography(),
        actual.bibliography(),
        "bibliography differs"
    );
    assert_eq!(expected.cross_refs(), actual.cross_refs(), "cross-references differ");
}
