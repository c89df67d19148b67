//! Metadata and content-block values

use serde::Serialize;
use std::fmt;

/// Author of a document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub name: String,
    pub email: String,
    pub affiliation: String,
    pub role: String,
}

impl Author {
    pub const DEFAULT_ROLE: &'static str = "primary";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: String::new(),
            affiliation: String::new(),
            role: Self::DEFAULT_ROLE.to_string(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = affiliation.into();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

/// A metadata entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Text(String),
    Bool(bool),
    Number(f64),
    TextList(Vec<String>),
    Author(Author),
    Authors(Vec<Author>),
}

impl MetadataValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Items of a list-shaped value. Authors contribute their names.
    pub fn items(&self) -> Option<Vec<String>> {
        match self {
            MetadataValue::TextList(items) => Some(items.clone()),
            MetadataValue::Authors(authors) => {
                Some(authors.iter().map(|a| a.name.clone()).collect())
            }
            _ => None,
        }
    }

    /// Authors held by this value, if it holds any
    pub fn authors(&self) -> Vec<&Author> {
        match self {
            MetadataValue::Author(author) => vec![author],
            MetadataValue::Authors(authors) => authors.iter().collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Text(text) => write!(f, "{}", text),
            MetadataValue::Bool(b) => write!(f, "{}", b),
            MetadataValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            MetadataValue::Number(n) => write!(f, "{}", n),
            MetadataValue::Author(author) => write!(f, "{}", author.name),
            MetadataValue::TextList(_) | MetadataValue::Authors(_) => {
                write!(f, "{}", self.items().unwrap_or_default().join(", "))
            }
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(text: &str) -> Self {
        MetadataValue::Text(text.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(text: String) -> Self {
        MetadataValue::Text(text)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        MetadataValue::Bool(b)
    }
}

impl From<f64> for MetadataValue {
    fn from(n: f64) -> Self {
        MetadataValue::Number(n)
    }
}

impl From<Vec<String>> for MetadataValue {
    fn from(items: Vec<String>) -> Self {
        MetadataValue::TextList(items)
    }
}

impl From<Author> for MetadataValue {
    fn from(author: Author) -> Self {
        MetadataValue::Author(author)
    }
}

impl From<Vec<Author>> for MetadataValue {
    fn from(authors: Vec<Author>) -> Self {
        MetadataValue::Authors(authors)
    }
}

/// Free-form, style-specific content (acknowledgments, subject codes, ...)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentBlock {
    Text(String),
    List(Vec<String>),
}

impl ContentBlock {
    pub fn items(&self) -> Option<&[String]> {
        match self {
            ContentBlock::List(items) => Some(items),
            ContentBlock::Text(_) => None,
        }
    }
}

impl fmt::Display for ContentBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentBlock::Text(text) => write!(f, "{}", text),
            ContentBlock::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

impl From<&str> for ContentBlock {
    fn from(text: &str) -> Self {
        ContentBlock::Text(text.to_string())
    }
}

impl From<String> for ContentBlock {
    fn from(text: String) -> Self {
        ContentBlock::Text(text)
    }
}

impl From<Vec<String>> for ContentBlock {
    fn from(items: Vec<String>) -> Self {
        ContentBlock::List(items)
    }
}
