//! A directory of documents: create from templates, save, list, reopen

use std::fs;

use docbundle::bundle::library::{list_documents, open_recent};
use docbundle::bundle::model::Document;
use docbundle::bundle::persistence::LoadOptions;
use docbundle::bundle::templates;
use tempfile::TempDir;

#[test]
fn test_templates_save_and_list() {
    let dir = TempDir::new().unwrap();

    let mut thesis = Document::from_template("MIT Thesis").unwrap();
    thesis.set_metadata("title", "Knots").unwrap();
    thesis.save(dir.path().join("thesis.kleis")).unwrap();

    let mut paper = Document::from_template("arXiv Paper").unwrap();
    paper.save(dir.path().join("paper.kleis")).unwrap();

    fs::write(dir.path().join("readme.md"), "not a document").unwrap();

    let entries = list_documents(dir.path(), "kleis").unwrap();
    let mut names: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.file_name.as_str(), e.title.as_str()))
        .collect();
    names.sort();
    assert_eq!(names, vec![("paper.kleis", "Untitled"), ("thesis.kleis", "Knots")]);

    let (_, loaded) = open_recent(dir.path(), "kleis", &LoadOptions::default())
        .unwrap()
        .expect("a document");
    assert!(loaded.skipped.is_empty());
    assert!(matches!(
        loaded.document.style(),
        Some("mit-thesis") | Some("arxiv-paper")
    ));
}

#[test]
fn test_reopened_template_keeps_outline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("thesis.kleis");
    let mut thesis = Document::from_template("MIT Thesis").unwrap();
    thesis.save(&path).unwrap();

    let reopened = Document::load(&path).unwrap();
    let titles: Vec<&str> = reopened.sections().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Introduction", "Background", "Methodology", "Results", "Conclusion"]
    );
    assert_eq!(reopened.style(), Some("mit-thesis"));
    assert_eq!(
        reopened.metadata_value("type").and_then(|v| v.as_text()),
        Some("PhD Thesis")
    );
    assert_eq!(templates::info("MIT Thesis").unwrap().style, "mit-thesis");
}
