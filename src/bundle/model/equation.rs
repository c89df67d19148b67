use serde::Serialize;
use std::collections::BTreeMap;

use crate::bundle::expression::ExpressionNode;
use crate::bundle::render::RenderFormat;

/// A numbered (or unnumbered) equation
///
/// `latex` and `typst` are the stored rendered forms. `ast` is the re-editable tree; when it
/// is absent the rendered text is all there is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equation {
    pub id: String,
    pub label: String,
    pub latex: String,
    pub typst: String,
    pub ast: Option<ExpressionNode>,
    pub numbered: bool,
    pub verified: bool,
    /// Renders obtained from the rendering collaborator, not persisted
    #[serde(skip)]
    pub(crate) renders: BTreeMap<RenderFormat, String>,
}

impl Equation {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            label: label.into(),
            latex: String::new(),
            typst: String::new(),
            ast: None,
            numbered: true,
            verified: false,
            renders: BTreeMap::new(),
        }
    }

    pub fn with_latex(mut self, latex: impl Into<String>) -> Self {
        self.latex = latex.into();
        self
    }

    pub fn with_typst(mut self, typst: impl Into<String>) -> Self {
        self.typst = typst.into();
        self
    }

    pub fn with_ast(mut self, ast: ExpressionNode) -> Self {
        self.ast = Some(ast);
        self
    }

    pub fn unnumbered(mut self) -> Self {
        self.numbered = false;
        self
    }

    /// A render held for `format`, either stored text or an earlier collaborator result
    pub fn cached_render(&self, format: RenderFormat) -> Option<&str> {
        let stored = match format {
            RenderFormat::SymbolicTypeset => Some(self.typst.as_str()),
            RenderFormat::ClassicMarkup => Some(self.latex.as_str()),
            _ => None,
        };
        stored
            .filter(|text| !text.is_empty())
            .or_else(|| self.renders.get(&format).map(String::as_str))
    }

    pub(crate) fn store_render(&mut self, format: RenderFormat, text: String) {
        match format {
            RenderFormat::SymbolicTypeset => self.typst = text,
            RenderFormat::ClassicMarkup => self.latex = text,
            _ => {
                self.renders.insert(format, text);
            }
        }
    }

    /// Text to show when no render for the wanted format is available
    pub fn fallback_text(&self) -> &str {
        if !self.typst.is_empty() {
            &self.typst
        } else {
            &self.latex
        }
    }

    /// Drop renders derived from `previous_ast`. Rendered text changed alongside the tree is
    /// kept.
    pub(crate) fn invalidate_renders(&mut self, previous: &Equation) {
        if self.ast == previous.ast {
            return;
        }
        self.renders.clear();
        if self.latex == previous.latex {
            self.latex.clear();
        }
        if self.typst == previous.typst {
            self.typst.clear();
        }
    }
}
