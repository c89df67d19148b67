use serde::Serialize;

/// A bibliography entry, keyed by its citation key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BibEntry {
    pub key: String,
    pub entry_type: String,
    /// Fields in the order they were given
    pub fields: Vec<(String, String)>,
}

impl BibEntry {
    pub fn new(key: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entry_type: entry_type.into(),
            fields: Vec::new(),
        }
    }

    /// Set a field, replacing an existing one of the same name in place
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// BibTeX form of the entry
    pub fn to_bibtex(&self) -> String {
        let mut out = format!("@{}{{{},\n", self.entry_type, self.key);
        for (name, value) in &self.fields {
            out.push_str(&format!("  {} = {{{}}},\n", name, value));
        }
        out.push('}');
        out
    }
}
