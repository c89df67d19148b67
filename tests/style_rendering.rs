//! Rendering documents under styles, and the collaborator seams around rendering

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use docbundle::bundle::error::TypesetError;
use docbundle::bundle::model::{Document, Equation};
use docbundle::bundle::render::{export, render_document, style_for, RenderFormat, Typesetter};
use docbundle::bundle::styles::{resolve, substitute, Namespaces, StyleDefinition, StyleRegistry};
use docbundle::bundle::testing::{full_document, x_equals_one};
use rstest::rstest;
use tempfile::TempDir;

fn thesis() -> Document {
    let mut doc = Document::new();
    doc.set_metadata("title", "On Curvature").unwrap();
    doc.set_metadata("degree-name", "Doctor of Philosophy").unwrap();
    doc.set_metadata("keywords", vec!["a".to_string(), "b".to_string()])
        .unwrap();
    doc.set_content_block("pacs", "04.20.-q").unwrap();
    doc.set_content_block("title", "shadowed by metadata").unwrap();
    doc
}

#[rstest]
#[case::metadata_hit("TITLE", Some("On Curvature"))]
#[case::hyphenated_key("DEGREE_NAME", Some("Doctor of Philosophy"))]
#[case::list_joined("KEYWORDS", Some("a | b"))]
#[case::content_block("PACS", Some("04.20.-q"))]
#[case::unresolved("MSC", None)]
fn test_resolve_tokens(#[case] token: &str, #[case] expected: Option<&str>) {
    let doc = thesis();
    assert_eq!(
        resolve(token, &Namespaces::from(&doc), " | ").as_deref(),
        expected
    );
}

#[test]
fn test_unresolved_tokens_stay_verbatim() {
    let doc = thesis();
    let out = substitute(
        "TITLE for DEGREE_NAME, see ARXIV_ID.",
        &Namespaces::from(&doc),
        "\n",
    );
    assert_eq!(out, "On Curvature for Doctor of Philosophy, see ARXIV_ID.");
}

#[test]
fn test_render_document_under_custom_style() {
    let doc = thesis();
    let style = StyleDefinition::new("mini")
        .with_section("title-page", "= TITLE\nKEYWORDS")
        .with_section("page-setup", "#set page(paper: \"a4\")")
        .with_section("closing", "MSC");

    insta::assert_snapshot!(render_document(&doc, &style), @r###"
    // mini style

    #set page(paper: "a4")

    = On Curvature
    a \
    b

    MSC
    "###);
}

#[test]
fn test_builtin_styles_render_full_document() {
    let registry = StyleRegistry::with_defaults();
    assert!(registry.has("mit-thesis"));
    assert!(registry.has("arxiv-paper"));

    let doc = full_document();
    let style = style_for(&doc, &registry, "arxiv-paper").unwrap();
    assert_eq!(style.name, "mit-thesis");

    let markup = render_document(&doc, style);
    assert!(markup.starts_with("// mit-thesis style\n"));
    assert!(markup.contains("Field Equations"));
    assert!(markup.contains("#heading(level: 3)[Detail]"));
    assert!(markup.contains("<eq:einstein>"));
    assert!(markup.contains("#image(\"figures/apparatus.png\")"));
    assert!(markup.contains("[einstein1915] Albert Einstein"));
    assert!(!markup.contains("?? "));
}

#[test]
fn test_unknown_style_is_an_error() {
    let registry = StyleRegistry::with_defaults();
    let mut doc = Document::new();
    doc.set_style("letterhead");
    assert!(style_for(&doc, &registry, "mit-thesis").is_err());
}

struct RecordingTypesetter {
    calls: RefCell<Vec<(PathBuf, PathBuf)>>,
    fail: bool,
}

impl Typesetter for RecordingTypesetter {
    fn compile(&self, markup: &Path, output: &Path) -> Result<(), String> {
        self.calls
            .borrow_mut()
            .push((markup.to_path_buf(), output.to_path_buf()));
        if self.fail {
            Err("typst: syntax error".to_string())
        } else {
            Ok(())
        }
    }
}

#[test]
fn test_export_writes_markup_then_compiles() {
    let dir = TempDir::new().unwrap();
    let markup = dir.path().join("out.typ");
    let pdf = dir.path().join("out.pdf");
    let doc = full_document();
    let style = StyleRegistry::with_defaults();
    let style = style.get("mit-thesis").unwrap();

    let typesetter = RecordingTypesetter {
        calls: RefCell::new(Vec::new()),
        fail: false,
    };
    export(&doc, style, &markup, &pdf, &typesetter).unwrap();
    assert_eq!(fs::read_to_string(&markup).unwrap(), render_document(&doc, style));
    assert_eq!(typesetter.calls.borrow().as_slice(), &[(markup.clone(), pdf.clone())]);

    let failing = RecordingTypesetter {
        calls: RefCell::new(Vec::new()),
        fail: true,
    };
    match export(&doc, style, &markup, &pdf, &failing) {
        Err(TypesetError::Compiler(message)) => assert_eq!(message, "typst: syntax error"),
        other => panic!("expected a compiler error, got {:?}", other),
    }
}

#[test]
fn test_constructor_text_needs_no_renderer() {
    struct Offline;
    impl docbundle::bundle::render::ExpressionRenderer for Offline {
        fn render(
            &self,
            _node: &docbundle::bundle::ExpressionNode,
            _format: RenderFormat,
        ) -> Option<String> {
            None
        }
    }

    let mut doc = Document::new();
    doc.add_equation(Equation::new("eq:e1").with_ast(x_equals_one()));
    assert_eq!(
        doc.render_equation("eq:e1", RenderFormat::ConstructorText, &Offline)
            .as_deref(),
        Some("Apply(\"equals\", List(Symbol(\"x\"), Literal(\"1\")))")
    );
    assert_eq!(doc.render_equation("eq:e1", RenderFormat::PlainUnicode, &Offline), None);
}
