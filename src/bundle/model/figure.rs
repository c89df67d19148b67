use serde::Serialize;
use sha2::{Digest, Sha256};

/// Cache key of a code snippet: hex SHA-256 of its text
pub fn cache_key(code: &str) -> String {
    Sha256::digest(code.as_bytes())
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

/// A fragment produced from code, tagged with the key of that code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachedFragment {
    pub key: String,
    pub fragment: String,
}

impl CachedFragment {
    pub fn for_code(code: &str, fragment: impl Into<String>) -> Self {
        Self {
            key: cache_key(code),
            fragment: fragment.into(),
        }
    }
}

/// Where a figure's visual content comes from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FigureSource {
    /// Produced by running `code`
    Regenerable {
        code: String,
        cached: Option<CachedFragment>,
    },
    /// An image file on disk
    Imported { path: String },
    Static,
}

impl FigureSource {
    pub fn regenerable(code: impl Into<String>) -> Self {
        FigureSource::Regenerable {
            code: code.into(),
            cached: None,
        }
    }

    pub fn imported(path: impl Into<String>) -> Self {
        FigureSource::Imported { path: path.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub id: String,
    pub label: String,
    pub caption: String,
    pub source: FigureSource,
    pub svg: Option<String>,
}

impl Figure {
    pub fn new(label: impl Into<String>, caption: impl Into<String>, source: FigureSource) -> Self {
        Self {
            id: String::new(),
            label: label.into(),
            caption: caption.into(),
            source,
            svg: None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match &self.source {
            FigureSource::Regenerable { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn has_code(&self) -> bool {
        self.code().is_some()
    }

    /// Whether there is something to show without running code
    pub fn has_image(&self) -> bool {
        self.svg.is_some()
            || matches!(
                self.source,
                FigureSource::Imported { .. }
                    | FigureSource::Regenerable {
                        cached: Some(_),
                        ..
                    }
            )
    }

    pub fn fragment(&self) -> Option<&str> {
        match &self.source {
            FigureSource::Regenerable {
                cached: Some(cached),
                ..
            } => Some(&cached.fragment),
            _ => None,
        }
    }

    /// Whether the cached fragment was produced from the current code
    pub fn is_fresh(&self) -> bool {
        match &self.source {
            FigureSource::Regenerable {
                code,
                cached: Some(cached),
            } => cached.key == cache_key(code),
            _ => false,
        }
    }
}
