//! Metadata value shapes
//!
//! Shapes are tried in a fixed order: string, boolean, number, list of strings, list of
//! authors, single author. The first shape that fits decides the value.

use super::fields::Fields;
use crate::bundle::model::{Author, ContentBlock, MetadataValue};
use crate::bundle::parsing::{Constructor, Value};

pub const AUTHOR: &str = "Author";

pub fn author(constructor: &Constructor) -> Option<Author> {
    if constructor.name != AUTHOR {
        return None;
    }
    let fields = Fields::new(constructor);
    // Positional form: Author("name", "email", "affiliation", "role")
    let positional = |index: usize| {
        constructor
            .positional
            .get(index)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let name = fields.opt_text("name").or_else(|| positional(0))?;
    Some(Author {
        name,
        email: fields.opt_text("email").or_else(|| positional(1)).unwrap_or_default(),
        affiliation: fields
            .opt_text("affiliation")
            .or_else(|| positional(2))
            .unwrap_or_default(),
        role: fields
            .opt_text("role")
            .or_else(|| positional(3))
            .unwrap_or_else(|| Author::DEFAULT_ROLE.to_string()),
    })
}

fn author_list(items: &[Value]) -> Option<Vec<Author>> {
    items
        .iter()
        .map(|item| item.as_constructor().and_then(author))
        .collect()
}

/// Decode a metadata value, or `None` when it has no supported shape
pub fn metadata_value(value: &Value) -> Option<MetadataValue> {
    if let Some(text) = value.as_str() {
        return Some(MetadataValue::Text(text.to_string()));
    }
    if let Some(b) = value.as_bool() {
        return Some(MetadataValue::Bool(b));
    }
    if let Some(n) = value.as_f64() {
        return Some(MetadataValue::Number(n));
    }
    if let Some(items) = value.as_text_list() {
        return Some(MetadataValue::TextList(items));
    }
    if let Some(authors) = value.as_list().and_then(author_list) {
        return Some(MetadataValue::Authors(authors));
    }
    value
        .as_constructor()
        .and_then(author)
        .map(MetadataValue::Author)
}

/// Decode a content block: a string or a list of strings
pub fn content_block(value: &Value) -> Option<ContentBlock> {
    if let Some(text) = value.as_str() {
        return Some(ContentBlock::Text(text.to_string()));
    }
    value.as_text_list().map(ContentBlock::List)
}
