//! Document -> text
//!
//! Records come out in a fixed order (header, metadata, content blocks, labelled
//! collections in label order, cross-references, sections in reading order), so saving
//! the same document twice gives the same bytes.

use super::loader::FORMAT_VERSION;
use crate::bundle::expression;
use crate::bundle::extraction::family::{Family, FORMAT_VERSION as VERSION_RECORD};
use crate::bundle::extraction::metadata::AUTHOR;
use crate::bundle::lexing::escape_string;
use crate::bundle::model::{
    Algorithm, Author, BibEntry, ContentBlock, ContentItem, CrossRef, Document, Equation, Figure,
    FigureSource, MetadataValue, Table, Theorem,
};
use crate::bundle::parsing::{Constructor, Value, MAX_NESTING};
use crate::bundle::structure::{flatten, FlatItem, FlatSection};

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Path of the shared type vocabulary, always imported first
    pub types_import: String,
    /// Directory style files are imported from
    pub style_directory: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            types_import: "examples/documents/kleisdoc_types.kleis".to_string(),
            style_directory: "stdlib/templates".to_string(),
        }
    }
}

impl WriteOptions {
    /// Import path of a style: `mit-thesis` -> `<style_directory>/mit_thesis.kleis`
    pub fn style_import(&self, style: &str) -> String {
        let file = format!("{}.kleis", style.replace('-', "_"));
        if self.style_directory.is_empty() {
            file
        } else {
            format!("{}/{}", self.style_directory.trim_end_matches('/'), file)
        }
    }
}

fn author_value(author: &Author) -> Value {
    Constructor::new(AUTHOR)
        .field("name", Value::text(author.name.as_str()))
        .field("email", Value::text(author.email.as_str()))
        .field("affiliation", Value::text(author.affiliation.as_str()))
        .field("role", Value::text(author.role.as_str()))
        .into()
}

pub fn metadata_value(value: &MetadataValue) -> Value {
    match value {
        MetadataValue::Text(text) => Value::text(text.as_str()),
        MetadataValue::Bool(b) => Value::Bool(*b),
        MetadataValue::Number(n) => Value::number(*n),
        MetadataValue::TextList(items) => Value::text_list(items.iter().map(String::as_str)),
        MetadataValue::Author(author) => author_value(author),
        MetadataValue::Authors(authors) => Value::list(authors.iter().map(author_value)),
    }
}

fn content_block_value(block: &ContentBlock) -> Value {
    match block {
        ContentBlock::Text(text) => Value::text(text.as_str()),
        ContentBlock::List(items) => Value::text_list(items.iter().map(String::as_str)),
    }
}

fn constructor(family: Family) -> Constructor {
    Constructor::new(family.constructor().unwrap_or_default())
}

pub fn equation_value(eq: &Equation) -> Value {
    let mut c = constructor(Family::Equation)
        .field("id", Value::text(eq.id.as_str()))
        .field("label", Value::text(eq.label.as_str()))
        .field("latex", Value::text(eq.latex.as_str()))
        .field("typst", Value::text(eq.typst.as_str()));
    if let Some(ast) = &eq.ast {
        let tree = expression::to_value(ast);
        // The record's own parenthesis is one more level
        if tree.nesting() < MAX_NESTING {
            c = c.field("ast", tree);
        } else {
            log::warn!(
                "{}: expression tree is too deep to read back, writing rendered text only",
                eq.label
            );
        }
    }
    c.field("numbered", Value::Bool(eq.numbered))
        .field("verified", Value::Bool(eq.verified))
        .into()
}

fn figure_source_value(source: &FigureSource) -> Value {
    match source {
        FigureSource::Regenerable { code, cached } => {
            let c = Constructor::new("Regenerable").arg(Value::text(code.as_str()));
            match cached {
                Some(cached) => c.arg(Value::text(cached.fragment.as_str())).into(),
                None => c.into(),
            }
        }
        FigureSource::Imported { path } => Constructor::new("Imported")
            .arg(Value::text(path.as_str()))
            .into(),
        FigureSource::Static => Constructor::new("Static").into(),
    }
}

pub fn figure_value(fig: &Figure) -> Value {
    let mut c = constructor(Family::Figure)
        .field("id", Value::text(fig.id.as_str()))
        .field("label", Value::text(fig.label.as_str()))
        .field("caption", Value::text(fig.caption.as_str()))
        .field("source", figure_source_value(&fig.source));
    if let Some(svg) = &fig.svg {
        c = c.field("svg", Value::text(svg.as_str()));
    }
    c.into()
}

fn table_value(table: &Table) -> Value {
    constructor(Family::Table)
        .field("label", Value::text(table.label.as_str()))
        .field("caption", Value::text(table.caption.as_str()))
        .field("headers", Value::text_list(table.headers.iter().map(String::as_str)))
        .field(
            "rows",
            Value::list(
                table
                    .rows
                    .iter()
                    .map(|row| Value::text_list(row.iter().map(String::as_str))),
            ),
        )
        .into()
}

fn theorem_value(thm: &Theorem) -> Value {
    let mut c = constructor(Family::Theorem)
        .field("label", Value::text(thm.label.as_str()))
        .field("kind", Value::text(thm.kind.as_str()))
        .field("name", Value::text(thm.name.as_str()))
        .field("statement", Value::text(thm.statement.as_str()));
    if let Some(proof) = &thm.proof {
        c = c.field("proof", Value::text(proof.as_str()));
    }
    c.into()
}

fn algorithm_value(alg: &Algorithm) -> Value {
    constructor(Family::Algorithm)
        .field("label", Value::text(alg.label.as_str()))
        .field("caption", Value::text(alg.caption.as_str()))
        .field("steps", Value::text_list(alg.steps.iter().map(String::as_str)))
        .into()
}

fn bib_value(entry: &BibEntry) -> Value {
    let fields = entry.fields.iter().map(|(name, value)| {
        Value::from(
            Constructor::new("Field")
                .arg(Value::text(name.as_str()))
                .arg(Value::text(value.as_str())),
        )
    });
    constructor(Family::Bib)
        .field("key", Value::text(entry.key.as_str()))
        .field("entry_type", Value::text(entry.entry_type.as_str()))
        .field("fields", Value::list(fields))
        .into()
}

fn cross_ref_value(r: &CrossRef) -> Value {
    let mut c = constructor(Family::CrossRef)
        .field("kind", Value::text(r.kind.name()))
        .field("target", Value::text(r.target.as_str()));
    if let Some(display) = &r.display {
        c = c.field("display", Value::text(display.as_str()));
    }
    c.into()
}

fn content_item_value(item: &FlatItem) -> Value {
    let reference =
        |name: &str, label: &str| Value::from(Constructor::new(name).arg(Value::text(label)));
    match item {
        FlatItem::Subsection => Constructor::new("Subsection").into(),
        FlatItem::Item(ContentItem::Text(text)) => reference("Text", text),
        FlatItem::Item(ContentItem::EquationRef(label)) => reference("EquationRef", label),
        FlatItem::Item(ContentItem::FigureRef(label)) => reference("FigureRef", label),
        FlatItem::Item(ContentItem::TableRef(label)) => reference("TableRef", label),
        FlatItem::Item(ContentItem::TheoremRef(label)) => reference("TheoremRef", label),
        FlatItem::Item(ContentItem::AlgorithmRef(label)) => reference("AlgorithmRef", label),
        // flatten() never leaves a section among the items
        FlatItem::Item(ContentItem::Section(_)) => Constructor::new("Subsection").into(),
    }
}

fn section_value(section: &FlatSection) -> Value {
    constructor(Family::Section)
        .field("level", Value::integer(i64::from(section.level)))
        .field("title", Value::text(section.title.as_str()))
        .field(
            "content",
            Value::list(section.items.iter().map(content_item_value)),
        )
        .into()
}

/// `define name = value`, with the fields of a top-level constructor one per line
pub fn record_text(name: &str, value: &Value) -> String {
    match value {
        Value::Constructor(c) if !c.fields.is_empty() => {
            let mut lines = Vec::with_capacity(c.fields.len());
            let args = c
                .positional
                .iter()
                .map(|v| v.to_string())
                .chain(c.fields.iter().map(|(field, v)| format!("{} = {}", field, v)));
            for arg in args {
                lines.push(format!("{}{}", INDENT, arg));
            }
            format!("define {} = {}(\n{}\n)", name, c.name, lines.join(",\n"))
        }
        other => format!("define {} = {}", name, other),
    }
}

fn push_group(out: &mut Vec<String>, records: Vec<String>) {
    if !records.is_empty() {
        out.push(records.join("\n"));
    }
}

fn numbered<'a, T: 'a>(
    family: Family,
    items: impl Iterator<Item = &'a T>,
    encode: impl Fn(&T) -> Value,
) -> Vec<String> {
    items
        .enumerate()
        .map(|(n, item)| record_text(&format!("{}{}", family.prefix(), n), &encode(item)))
        .collect()
}

/// Serialize a document
pub fn to_text(doc: &Document, options: &WriteOptions) -> String {
    let mut blocks: Vec<String> = Vec::new();

    let mut header = vec![format!("import {}", escape_string(&options.types_import))];
    if let Some(style) = doc.style() {
        header.push(format!(
            "import {}",
            escape_string(&options.style_import(style))
        ));
    }
    blocks.push(header.join("\n"));
    blocks.push(format!("define {} = {}", VERSION_RECORD, FORMAT_VERSION));

    push_group(
        &mut blocks,
        doc.metadata()
            .iter()
            .map(|(key, value)| {
                record_text(&format!("{}{}", Family::Meta.prefix(), key), &metadata_value(value))
            })
            .collect(),
    );
    push_group(
        &mut blocks,
        doc.content_blocks()
            .iter()
            .map(|(key, block)| {
                record_text(
                    &format!("{}{}", Family::Block.prefix(), key),
                    &content_block_value(block),
                )
            })
            .collect(),
    );

    blocks.extend(numbered(Family::Equation, doc.equations().values(), equation_value));
    blocks.extend(numbered(Family::Figure, doc.figures().values(), figure_value));
    blocks.extend(numbered(Family::Table, doc.tables().values(), table_value));
    blocks.extend(numbered(Family::Theorem, doc.theorems().values(), theorem_value));
    blocks.extend(
        numbered(Family::Algorithm, doc.algorithms().values(), algorithm_value),
    );
    blocks.extend(numbered(Family::Bib, doc.bibliography().values(), bib_value));
    blocks.extend(
        numbered(Family::CrossRef, doc.cross_refs().iter(), cross_ref_value),
    );
    let flat = flatten(doc.sections());
    blocks.extend(numbered(Family::Section, flat.iter(), section_value));

    let mut text = blocks.join("\n\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::expression::ExpressionNode;

    #[test]
    fn test_empty_document() {
        assert_eq!(
            to_text(&Document::new(), &WriteOptions::default()),
            "import \"examples/documents/kleisdoc_types.kleis\"\n\ndefine format_version = 1\n"
        );
    }

    #[test]
    fn test_style_import_path() {
        let options = WriteOptions::default();
        assert_eq!(
            options.style_import("arxiv-paper"),
            "stdlib/templates/arxiv_paper.kleis"
        );
        let bare = WriteOptions {
            style_directory: String::new(),
            ..WriteOptions::default()
        };
        assert_eq!(bare.style_import("mit-thesis"), "mit_thesis.kleis");
    }

    #[test]
    fn test_record_layout() {
        let mut eq = Equation::new("eq:e1").with_ast(ExpressionNode::apply(
            "equals",
            vec![ExpressionNode::symbol("x"), ExpressionNode::literal("1")],
        ));
        eq.id = "eq_0".into();
        assert_eq!(
            record_text("eq_0", &equation_value(&eq)),
            r#"define eq_0 = Equation(
    id = "eq_0",
    label = "eq:e1",
    latex = "",
    typst = "",
    ast = Apply("equals", List(Symbol("x"), Literal("1"))),
    numbered = true,
    verified = false
)"#
        );
        assert_eq!(
            record_text("meta_title", &Value::text("T")),
            r#"define meta_title = "T""#
        );
    }

    #[test]
    fn test_metadata_shapes() {
        assert_eq!(
            metadata_value(&MetadataValue::Authors(vec![Author::new("Ada")])).to_string(),
            r#"List(Author(name = "Ada", email = "", affiliation = "", role = "primary"))"#
        );
        assert_eq!(metadata_value(&MetadataValue::Number(3.0)).to_string(), "3");
    }
}
