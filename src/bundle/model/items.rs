//! Tables, theorems and algorithms: flat records keyed by label

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub label: String,
    pub caption: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(
        label: impl Into<String>,
        caption: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        Self {
            label: label.into(),
            caption: caption.into(),
            headers,
            rows,
        }
    }

    /// Number of columns, taken from the widest of the header and the rows
    pub fn columns(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }
}

/// A theorem-like statement (theorem, lemma, definition, ...)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theorem {
    pub label: String,
    pub kind: String,
    pub name: String,
    pub statement: String,
    pub proof: Option<String>,
}

impl Theorem {
    pub fn new(
        label: impl Into<String>,
        kind: impl Into<String>,
        statement: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            kind: kind.into(),
            name: String::new(),
            statement: statement.into(),
            proof: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_proof(mut self, proof: impl Into<String>) -> Self {
        self.proof = Some(proof.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Algorithm {
    pub label: String,
    pub caption: String,
    pub steps: Vec<String>,
}

impl Algorithm {
    pub fn new(label: impl Into<String>, caption: impl Into<String>, steps: Vec<String>) -> Self {
        Self {
            label: label.into(),
            caption: caption.into(),
            steps,
        }
    }
}
