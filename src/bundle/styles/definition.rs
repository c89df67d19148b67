use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bundle::error::StyleError;

pub const PAGE_SETUP: &str = "page-setup";
pub const PREAMBLE: &str = "preamble";
pub const TITLE_PAGE: &str = "title-page";
pub const ABSTRACT_BOX: &str = "abstract-box";
pub const CLOSING: &str = "closing";

/// Order in which style sections surround the document body. `closing` comes after it.
pub const SECTION_ORDER: [&str; 4] = [PAGE_SETUP, PREAMBLE, TITLE_PAGE, ABSTRACT_BOX];

fn default_line_break() -> String {
    " \\\n".to_string()
}

/// A style-definition record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Separator placed between the items of a list value
    #[serde(default = "default_line_break")]
    pub line_break: String,
    /// Section name -> body text
    #[serde(default)]
    pub sections: BTreeMap<String, String>,
}

impl StyleDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            line_break: default_line_break(),
            sections: BTreeMap::new(),
        }
    }

    pub fn with_section(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.sections.insert(name.into(), body.into());
        self
    }

    /// Read a definition from YAML
    pub fn from_yaml(name: &str, source: &str) -> Result<Self, StyleError> {
        serde_yaml::from_str(source).map_err(|source| StyleError::Parse {
            name: name.to_string(),
            source,
        })
    }

    pub fn section(&self, name: &str) -> Option<&str> {
        self.sections.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_with_defaults() {
        let style = StyleDefinition::from_yaml(
            "plain",
            "name: plain\nsections:\n  preamble: \"= TITLE\"\n",
        )
        .unwrap();
        assert_eq!(style.section(PREAMBLE), Some("= TITLE"));
        assert_eq!(style.section(CLOSING), None);
        assert_eq!(style.line_break, " \\\n");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = StyleDefinition::from_yaml("broken", "sections: [").unwrap_err();
        assert!(matches!(err, StyleError::Parse { ref name, .. } if name == "broken"));
    }
}
