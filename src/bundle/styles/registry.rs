//! Style registry for style discovery and selection

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::definition::StyleDefinition;
use crate::bundle::error::StyleError;

const MIT_THESIS: &str = include_str!("../../../defaults/styles/mit-thesis.yaml");
const ARXIV_PAPER: &str = include_str!("../../../defaults/styles/arxiv-paper.yaml");

/// Registry of visual styles, keyed by name
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    styles: HashMap<String, StyleDefinition>,
}

impl StyleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Register a style, replacing one with the same name
    pub fn register(&mut self, style: StyleDefinition) {
        self.styles.insert(style.name.clone(), style);
    }

    pub fn get(&self, name: &str) -> Result<&StyleDefinition, StyleError> {
        self.styles
            .get(name)
            .ok_or_else(|| StyleError::NotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// All style names (sorted)
    pub fn list_styles(&self) -> Vec<String> {
        let mut names: Vec<_> = self.styles.keys().cloned().collect();
        names.sort();
        names
    }

    /// Register every `*.yaml` style in `dir`. Returns how many were added.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, StyleError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir)
            .map_err(|_| StyleError::NotFound(dir.display().to_string()))?;
        let mut added = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let name = path.display().to_string();
            match fs::read_to_string(&path) {
                Ok(source) => {
                    self.register(StyleDefinition::from_yaml(&name, &source)?);
                    added += 1;
                }
                Err(err) => log::warn!("cannot read style {}: {}", name, err),
            }
        }
        Ok(added)
    }

    /// Create a registry holding the built-in styles
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, source) in [("mit-thesis", MIT_THESIS), ("arxiv-paper", ARXIV_PAPER)] {
            match StyleDefinition::from_yaml(name, source) {
                Ok(style) => registry.register(style),
                Err(err) => log::error!("built-in style {} is invalid: {}", name, err),
            }
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = StyleRegistry::new();
        assert!(registry.list_styles().is_empty());
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = StyleRegistry::new();
        registry.register(StyleDefinition::new("plain"));
        assert!(registry.has("plain"));
        assert_eq!(registry.get("plain").unwrap().name, "plain");
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = StyleRegistry::new();
        match registry.get("nonexistent") {
            Err(StyleError::NotFound(name)) => assert_eq!(name, "nonexistent"),
            other => panic!("Expected NotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_builtin_styles() {
        let registry = StyleRegistry::with_defaults();
        assert_eq!(registry.list_styles(), vec!["arxiv-paper", "mit-thesis"]);
        let thesis = registry.get("mit-thesis").unwrap();
        assert!(thesis.section("title-page").unwrap().contains("DEGREE"));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("plain.yaml"), "name: plain\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let mut registry = StyleRegistry::new();
        assert_eq!(registry.load_dir(dir.path()).unwrap(), 1);
        assert!(registry.has("plain"));
    }
}
