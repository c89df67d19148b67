use std::fs;
use std::path::Path;

use super::collaborators::Typesetter;
use super::typst::render_document;
use crate::bundle::error::{StyleError, TypesetError};
use crate::bundle::model::Document;
use crate::bundle::styles::{StyleDefinition, StyleRegistry};

/// The document's own style if it names one, else `default`
pub fn style_for<'a>(
    doc: &Document,
    registry: &'a StyleRegistry,
    default: &str,
) -> Result<&'a StyleDefinition, StyleError> {
    registry.get(doc.style().unwrap_or(default))
}

/// Write the rendered markup to `markup_path`, then have `typesetter` compile it
pub fn export(
    doc: &Document,
    style: &StyleDefinition,
    markup_path: &Path,
    artifact_path: &Path,
    typesetter: &dyn Typesetter,
) -> Result<(), TypesetError> {
    fs::write(markup_path, render_document(doc, style)).map_err(|source| TypesetError::Io {
        path: markup_path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {}", markup_path.display());
    typesetter
        .compile(markup_path, artifact_path)
        .map_err(TypesetError::Compiler)?;
    log::info!("compiled {}", artifact_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    struct Recorder(RefCell<Vec<(PathBuf, PathBuf)>>, bool);

    impl Typesetter for Recorder {
        fn compile(&self, markup: &Path, output: &Path) -> Result<(), String> {
            self.0
                .borrow_mut()
                .push((markup.to_path_buf(), output.to_path_buf()));
            if self.1 {
                Ok(())
            } else {
                Err("typst: error".to_string())
            }
        }
    }

    #[test]
    fn test_style_for_prefers_document_style() {
        let registry = StyleRegistry::with_defaults();
        let mut doc = Document::new();
        assert_eq!(style_for(&doc, &registry, "mit-thesis").unwrap().name, "mit-thesis");
        doc.set_style("arxiv-paper");
        assert_eq!(style_for(&doc, &registry, "mit-thesis").unwrap().name, "arxiv-paper");
        doc.set_style("unknown");
        assert!(style_for(&doc, &registry, "mit-thesis").is_err());
    }

    #[test]
    fn test_export_writes_then_compiles() {
        let dir = tempfile::tempdir().unwrap();
        let markup = dir.path().join("doc.typ");
        let pdf = dir.path().join("doc.pdf");
        let doc = Document::new();
        let style = StyleDefinition::new("plain");

        let ok = Recorder(RefCell::new(Vec::new()), true);
        export(&doc, &style, &markup, &pdf, &ok).unwrap();
        assert!(markup.exists());
        assert_eq!(ok.0.borrow().as_slice(), &[(markup.clone(), pdf.clone())]);

        let failing = Recorder(RefCell::new(Vec::new()), false);
        match export(&doc, &style, &markup, &pdf, &failing) {
            Err(TypesetError::Compiler(msg)) => assert_eq!(msg, "typst: error"),
            other => panic!("unexpected result {other:?}"),
        }
    }
}
