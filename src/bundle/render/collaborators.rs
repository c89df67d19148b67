//! External collaborators and the document operations that call them

use std::path::Path;

use super::format::RenderFormat;
use crate::bundle::error::DocumentError;
use crate::bundle::expression::{self, ExpressionNode};
use crate::bundle::model::{CachedFragment, Document, FigureSource};

/// Renders expression trees to a display notation
pub trait ExpressionRenderer {
    /// Rendered text, or `None` when the renderer is unavailable or cannot handle the tree
    fn render(&self, node: &ExpressionNode, format: RenderFormat) -> Option<String>;
}

/// Runs figure code and returns the produced markup fragment
pub trait FigureGenerator {
    fn generate(&self, code: &str) -> Result<String, String>;
}

/// Compiles a markup file into a final artifact (PDF, ...)
pub trait Typesetter {
    fn compile(&self, markup: &Path, output: &Path) -> Result<(), String>;
}

impl Document {
    /// Render an equation's tree.
    ///
    /// A cached render is answered without calling `renderer`. Constructor text comes from
    /// the tree itself. A successful render is cached on the equation; when the renderer is
    /// unavailable the stored text is returned and nothing changes.
    pub fn render_equation(
        &mut self,
        label: &str,
        format: RenderFormat,
        renderer: &dyn ExpressionRenderer,
    ) -> Option<String> {
        let equation = self.equations.get_mut(label)?;
        if let Some(cached) = equation.cached_render(format) {
            return Some(cached.to_string());
        }
        let fallback = Some(equation.fallback_text())
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        let ast = match &equation.ast {
            Some(ast) => ast.clone(),
            None => return fallback,
        };
        if format == RenderFormat::ConstructorText {
            return Some(expression::encode(&ast));
        }
        match renderer.render(&ast, format) {
            Some(text) => {
                equation.store_render(format, text.clone());
                if matches!(
                    format,
                    RenderFormat::SymbolicTypeset | RenderFormat::ClassicMarkup
                ) {
                    self.touch();
                }
                Some(text)
            }
            None => {
                log::debug!("no {} render for {}, using stored text", format, label);
                fallback
            }
        }
    }

    /// Re-run a regenerable figure's code.
    ///
    /// Returns `Ok(false)` when the cached fragment already came from the current code and
    /// `force` is not set. A failed run leaves the figure as it was.
    pub fn regenerate_figure(
        &mut self,
        label: &str,
        generator: &dyn FigureGenerator,
        force: bool,
    ) -> Result<bool, DocumentError> {
        let figure = self
            .figure_mut(label)
            .ok_or_else(|| DocumentError::FigureNotFound(label.to_string()))?;
        if !force && figure.is_fresh() {
            return Ok(false);
        }
        let code = figure
            .code()
            .ok_or_else(|| DocumentError::NotRegenerable(label.to_string()))?
            .to_string();
        let fragment = generator.generate(&code).map_err(DocumentError::Generation)?;
        if let FigureSource::Regenerable { cached, .. } = &mut figure.source {
            *cached = Some(CachedFragment::for_code(&code, fragment));
        }
        self.touch();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::model::{Equation, Figure};
    use std::cell::Cell;

    struct CountingRenderer {
        calls: Cell<usize>,
        available: bool,
    }

    impl ExpressionRenderer for CountingRenderer {
        fn render(&self, node: &ExpressionNode, format: RenderFormat) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            self.available
                .then(|| format!("{}:{}", format, node.size()))
        }
    }

    struct Generator(Result<&'static str, &'static str>, Cell<usize>);

    impl FigureGenerator for Generator {
        fn generate(&self, _code: &str) -> Result<String, String> {
            self.1.set(self.1.get() + 1);
            self.0.map(str::to_string).map_err(str::to_string)
        }
    }

    fn document() -> Document {
        let mut doc = Document::new();
        doc.add_equation(
            Equation::new("eq:a")
                .with_latex("x")
                .with_ast(ExpressionNode::symbol("x")),
        );
        doc.add_figure(Figure::new("fig:a", "A", FigureSource::regenerable("plot()")));
        doc.add_figure(Figure::new("fig:b", "B", FigureSource::imported("b.png")));
        doc
    }

    #[test]
    fn test_render_is_cached_after_first_success() {
        let mut doc = document();
        let renderer = CountingRenderer {
            calls: Cell::new(0),
            available: true,
        };
        let first = doc.render_equation("eq:a", RenderFormat::SymbolicTypeset, &renderer);
        let second = doc.render_equation("eq:a", RenderFormat::SymbolicTypeset, &renderer);
        assert_eq!(first, Some("typst:1".to_string()));
        assert_eq!(second, first);
        assert_eq!(renderer.calls.get(), 1);
        assert_eq!(doc.equation("eq:a").unwrap().typst, "typst:1");

        doc.render_equation("eq:a", RenderFormat::PlainUnicode, &renderer);
        doc.render_equation("eq:a", RenderFormat::PlainUnicode, &renderer);
        assert_eq!(renderer.calls.get(), 2);
    }

    #[test]
    fn test_stored_text_answers_without_renderer() {
        let mut doc = document();
        let renderer = CountingRenderer {
            calls: Cell::new(0),
            available: true,
        };
        assert_eq!(
            doc.render_equation("eq:a", RenderFormat::ClassicMarkup, &renderer),
            Some("x".to_string())
        );
        assert_eq!(
            doc.render_equation("eq:a", RenderFormat::ConstructorText, &renderer),
            Some(r#"Symbol("x")"#.to_string())
        );
        assert_eq!(renderer.calls.get(), 0);
    }

    #[test]
    fn test_unavailable_renderer_falls_back_without_mutation() {
        let mut doc = document();
        let before = doc.equation("eq:a").unwrap().clone();
        let renderer = CountingRenderer {
            calls: Cell::new(0),
            available: false,
        };
        assert_eq!(
            doc.render_equation("eq:a", RenderFormat::StructuralMarkup, &renderer),
            Some("x".to_string())
        );
        assert_eq!(doc.equation("eq:a").unwrap(), &before);
        assert_eq!(doc.render_equation("missing", RenderFormat::PlainUnicode, &renderer), None);
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let mut doc = document();
        let generator = Generator(Ok("#line()"), Cell::new(0));
        assert_eq!(doc.regenerate_figure("fig:a", &generator, false), Ok(true));
        assert_eq!(doc.regenerate_figure("fig:a", &generator, false), Ok(false));
        assert_eq!(generator.1.get(), 1);
        assert_eq!(doc.regenerate_figure("fig:a", &generator, true), Ok(true));
        assert_eq!(doc.figure("fig:a").unwrap().fragment(), Some("#line()"));
    }

    #[test]
    fn test_regeneration_errors() {
        let mut doc = document();
        let failing = Generator(Err("boom"), Cell::new(0));
        assert_eq!(
            doc.regenerate_figure("fig:a", &failing, false),
            Err(DocumentError::Generation("boom".to_string()))
        );
        assert_eq!(doc.figure("fig:a").unwrap().fragment(), None);
        assert_eq!(
            doc.regenerate_figure("fig:b", &failing, false),
            Err(DocumentError::NotRegenerable("fig:b".to_string()))
        );
        assert_eq!(
            doc.regenerate_figure("nope", &failing, false),
            Err(DocumentError::FigureNotFound("nope".to_string()))
        );
    }
}
