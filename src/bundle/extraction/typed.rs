//! One extractor per record family

use std::collections::BTreeMap;

use super::family::Family;
use super::fields::{scalar_text, Fields};
use super::metadata::metadata_value;
use crate::bundle::expression;
use crate::bundle::model::{
    Algorithm, BibEntry, CachedFragment, ContentItem, CrossRef, Equation, Figure, FigureSource,
    MetadataValue, Table, Theorem,
};
use crate::bundle::parsing::{Constructor, Record, SkipReason, Value};
use crate::bundle::structure::{FlatItem, FlatSection};

type Extracted<T> = Result<T, SkipReason>;

fn constructor_of(record: &Record, family: Family) -> Extracted<&Constructor> {
    let expected = family.constructor().unwrap_or_default();
    match record.value.as_constructor() {
        Some(c) if c.name == expected => Ok(c),
        Some(c) => Err(SkipReason::WrongConstructor {
            expected: expected.to_string(),
            found: c.name.clone(),
        }),
        None => Err(SkipReason::WrongConstructor {
            expected: expected.to_string(),
            found: kind_of(&record.value).to_string(),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Str(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::List(_) => "List",
        Value::Constructor(_) => "constructor",
    }
}

pub fn equation(record: &Record) -> Extracted<Equation> {
    let c = constructor_of(record, Family::Equation)?;
    let fields = Fields::new(c);
    let label = fields.key("label").ok_or(SkipReason::MissingLabel)?;

    let ast = fields.value("ast").and_then(|value| {
        let decoded = expression::decode_value(value);
        if decoded.is_none() {
            log::debug!("{}: expression tree not readable, keeping rendered text", record.name);
        }
        decoded
    });

    Ok(Equation {
        id: fields.label("id").unwrap_or_else(|| record.name.clone()),
        label,
        latex: fields.text("latex"),
        typst: fields.text("typst"),
        ast,
        numbered: fields.flag("numbered", true),
        verified: fields.flag("verified", false),
        renders: BTreeMap::new(),
    })
}

fn figure_source(value: Option<&Value>) -> Extracted<FigureSource> {
    let c = match value {
        None => return Ok(FigureSource::Static),
        Some(value) => value.as_constructor().ok_or(SkipReason::UnsupportedValue)?,
    };
    let text = |index: usize| c.positional.get(index).and_then(Value::as_str);
    match c.name.as_str() {
        "Regenerable" => {
            let code = text(0)
                .or_else(|| c.get("code").and_then(Value::as_str))
                .ok_or(SkipReason::UnsupportedValue)?;
            let cached = text(1)
                .or_else(|| c.get("fragment").and_then(Value::as_str))
                .filter(|fragment| !fragment.is_empty())
                .map(|fragment| CachedFragment::for_code(code, fragment));
            Ok(FigureSource::Regenerable {
                code: code.to_string(),
                cached,
            })
        }
        "Imported" => text(0)
            .or_else(|| c.get("path").and_then(Value::as_str))
            .map(FigureSource::imported)
            .ok_or(SkipReason::UnsupportedValue),
        "Static" => Ok(FigureSource::Static),
        _ => Err(SkipReason::UnsupportedValue),
    }
}

pub fn figure(record: &Record) -> Extracted<Figure> {
    let c = constructor_of(record, Family::Figure)?;
    let fields = Fields::new(c);
    let label = fields.key("label").ok_or(SkipReason::MissingLabel)?;
    Ok(Figure {
        id: fields.label("id").unwrap_or_else(|| record.name.clone()),
        label,
        caption: fields.text("caption"),
        source: figure_source(fields.value("source"))?,
        svg: fields.label("svg"),
    })
}

pub fn table(record: &Record) -> Extracted<Table> {
    let c = constructor_of(record, Family::Table)?;
    let fields = Fields::new(c);
    Ok(Table {
        label: fields.key("label").ok_or(SkipReason::MissingLabel)?,
        caption: fields.text("caption"),
        headers: fields.text_list("headers"),
        rows: fields.rows("rows"),
    })
}

pub fn theorem(record: &Record) -> Extracted<Theorem> {
    let c = constructor_of(record, Family::Theorem)?;
    let fields = Fields::new(c);
    Ok(Theorem {
        label: fields.key("label").ok_or(SkipReason::MissingLabel)?,
        kind: fields.label("kind").unwrap_or_else(|| "theorem".to_string()),
        name: fields.text("name"),
        statement: fields.text("statement"),
        proof: fields.label("proof"),
    })
}

pub fn algorithm(record: &Record) -> Extracted<Algorithm> {
    let c = constructor_of(record, Family::Algorithm)?;
    let fields = Fields::new(c);
    Ok(Algorithm {
        label: fields.key("label").ok_or(SkipReason::MissingLabel)?,
        caption: fields.text("caption"),
        steps: fields.text_list("steps"),
    })
}

fn bib_field(value: &Value) -> Option<(String, String)> {
    let c = value.constructor_named("Field")?;
    let name = c.positional.first().and_then(Value::as_str)?;
    let text = c.positional.get(1).and_then(scalar_text)?;
    Some((name.to_string(), text))
}

pub fn bib_entry(record: &Record) -> Extracted<BibEntry> {
    let c = constructor_of(record, Family::Bib)?;
    let fields = Fields::new(c);
    let mut entry = BibEntry::new(
        fields.key("key").ok_or(SkipReason::MissingLabel)?,
        fields.label("entry_type").unwrap_or_else(|| "misc".to_string()),
    );
    for item in fields.value("fields").and_then(Value::as_list).unwrap_or_default() {
        match bib_field(item) {
            Some((name, text)) => entry.set(name, text),
            None => log::debug!("{}: ignoring malformed bibliography field", record.name),
        }
    }
    Ok(entry)
}

pub fn cross_ref(record: &Record) -> Extracted<CrossRef> {
    let c = constructor_of(record, Family::CrossRef)?;
    let fields = Fields::new(c);
    let target = fields.key("target").ok_or(SkipReason::MissingLabel)?;
    let kind = fields
        .text("kind")
        .parse()
        .map_err(|_| SkipReason::UnsupportedValue)?;
    Ok(CrossRef {
        kind,
        target,
        display: fields.label("display"),
    })
}

fn content_item(value: &Value) -> Option<FlatItem> {
    let c = value.as_constructor()?;
    if c.name == "Subsection" {
        return Some(FlatItem::Subsection);
    }
    let text = c.positional.first().and_then(Value::as_str)?.to_string();
    let item = match c.name.as_str() {
        "Text" => ContentItem::Text(text),
        "EquationRef" => ContentItem::EquationRef(text),
        "FigureRef" => ContentItem::FigureRef(text),
        "TableRef" => ContentItem::TableRef(text),
        "TheoremRef" => ContentItem::TheoremRef(text),
        "AlgorithmRef" => ContentItem::AlgorithmRef(text),
        _ => return None,
    };
    Some(FlatItem::Item(item))
}

pub fn section(record: &Record) -> Extracted<FlatSection> {
    let c = constructor_of(record, Family::Section)?;
    let fields = Fields::new(c);
    let level = match fields.integer("level") {
        None => 1,
        Some(level) if level >= 1 => u32::try_from(level).map_err(|_| SkipReason::UnsupportedValue)?,
        Some(_) => return Err(SkipReason::UnsupportedValue),
    };
    let mut items = Vec::new();
    for value in fields.value("content").and_then(Value::as_list).unwrap_or_default() {
        match content_item(value) {
            Some(item) => items.push(item),
            None => log::debug!("{}: ignoring unknown content item", record.name),
        }
    }
    Ok(FlatSection {
        level,
        title: fields.text("title"),
        items,
    })
}

/// Fields of a `doc_metadata = Metadata(...)` record that have a metadata shape
pub fn legacy_metadata(record: &Record) -> Extracted<Vec<(String, MetadataValue)>> {
    let c = constructor_of(record, Family::LegacyMetadata)?;
    Ok(c.fields
        .iter()
        .filter_map(|(name, value)| match metadata_value(value) {
            Some(decoded) => Some((name.clone(), decoded)),
            None => {
                log::debug!("{}: ignoring field {} of unsupported shape", record.name, name);
                None
            }
        })
        .collect())
}
