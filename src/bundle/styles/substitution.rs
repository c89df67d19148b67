//! Placeholder substitution
//!
//! A placeholder is an upper-case word of two or more characters, optionally
//! underscore-separated (`TITLE`, `DEGREE_NAME`, `ARXIV_ID`). A lone capital such as the
//! article `A` is never a placeholder. For `DEGREE_NAME` the keys `degree_name`, `degree-name`
//! and `DEGREE_NAME` are tried in that order, first against the metadata and then against
//! the content blocks. A list value is joined with the style's line break. A token that
//! resolves to nothing is left as it is.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

use crate::bundle::model::{ContentBlock, Document, MetadataValue};

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z](?:[A-Z0-9]|_[A-Z0-9])+\b").expect("placeholder pattern is valid")
});

/// The lookup namespaces, in precedence order
#[derive(Debug, Clone, Copy)]
pub struct Namespaces<'a> {
    pub metadata: &'a BTreeMap<String, MetadataValue>,
    pub content_blocks: &'a BTreeMap<String, ContentBlock>,
}

impl<'a> From<&'a Document> for Namespaces<'a> {
    fn from(doc: &'a Document) -> Self {
        Self {
            metadata: doc.metadata(),
            content_blocks: doc.content_blocks(),
        }
    }
}

/// Keys tried for a token, in order
pub fn candidate_keys(token: &str) -> [String; 3] {
    let lower = token.to_lowercase();
    [lower.clone(), lower.replace('_', "-"), token.to_string()]
}

fn metadata_text(value: &MetadataValue, line_break: &str) -> String {
    match value.items() {
        Some(items) => items.join(line_break),
        None => value.to_string(),
    }
}

fn block_text(block: &ContentBlock, line_break: &str) -> String {
    match block {
        ContentBlock::Text(text) => text.clone(),
        ContentBlock::List(items) => items.join(line_break),
    }
}

/// Value of a single token, if any namespace has it
pub fn resolve(token: &str, namespaces: &Namespaces<'_>, line_break: &str) -> Option<String> {
    let keys = candidate_keys(token);
    keys.iter()
        .find_map(|key| namespaces.metadata.get(key))
        .map(|value| metadata_text(value, line_break))
        .or_else(|| {
            keys.iter()
                .find_map(|key| namespaces.content_blocks.get(key))
                .map(|block| block_text(block, line_break))
        })
}

/// Expand every resolvable token in `body`
pub fn substitute(body: &str, namespaces: &Namespaces<'_>, line_break: &str) -> String {
    TOKEN
        .replace_all(body, |caps: &Captures<'_>| {
            let token = &caps[0];
            resolve(token, namespaces, line_break).unwrap_or_else(|| token.to_string())
        })
        .into_owned()
}
