use crate::bundle::parsing::{Constructor, Value};

/// Named-field access with defaults
///
/// A field that is missing, or has a shape other than the one asked for, reads as the
/// default.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    constructor: &'a Constructor,
}

/// Text of a scalar: strings as they are, numbers and booleans as written
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Str(text) => Some(text.clone()),
        Value::Number(raw) => Some(raw.clone()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl<'a> Fields<'a> {
    pub fn new(constructor: &'a Constructor) -> Self {
        Self { constructor }
    }

    pub fn value(&self, name: &str) -> Option<&'a Value> {
        self.constructor.get(name)
    }

    pub fn opt_text(&self, name: &str) -> Option<String> {
        self.value(name).and_then(scalar_text)
    }

    pub fn text(&self, name: &str) -> String {
        self.opt_text(name).unwrap_or_default()
    }

    /// Text of a field that must be present. Empty text is still a key.
    pub fn key(&self, name: &str) -> Option<String> {
        self.opt_text(name)
    }

    /// Non-empty text, or `None`
    pub fn label(&self, name: &str) -> Option<String> {
        self.opt_text(name).filter(|text| !text.is_empty())
    }

    pub fn flag(&self, name: &str, default: bool) -> bool {
        self.value(name).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.value(name).and_then(Value::as_i64)
    }

    /// Scalar items of a list field; other items are dropped
    pub fn text_list(&self, name: &str) -> Vec<String> {
        self.value(name)
            .and_then(Value::as_list)
            .map(|items| items.iter().filter_map(scalar_text).collect())
            .unwrap_or_default()
    }

    /// A list of lists of scalars
    pub fn rows(&self, name: &str) -> Vec<Vec<String>> {
        self.value(name)
            .and_then(Value::as_list)
            .map(|rows| {
                rows.iter()
                    .filter_map(Value::as_list)
                    .map(|cells| cells.iter().filter_map(scalar_text).collect())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::parsing::parse_value;

    #[test]
    fn test_defaults_for_missing_and_misshapen_fields() {
        let value = parse_value(r#"T(a = "x", n = 3, flag = "yes", list = List("p", 2, Sym))"#)
            .unwrap();
        let fields = Fields::new(value.as_constructor().unwrap());
        assert_eq!(fields.text("a"), "x");
        assert_eq!(fields.text("n"), "3");
        assert_eq!(fields.text("missing"), "");
        assert_eq!(fields.label("missing"), None);
        assert_eq!(fields.key("missing"), None);
        assert!(fields.flag("flag", true));
        assert!(!fields.flag("missing", false));
        assert_eq!(fields.integer("n"), Some(3));
        assert_eq!(fields.text_list("list"), vec!["p", "2"]);
        assert!(fields.rows("a").is_empty());
    }

    #[test]
    fn test_rows() {
        let value = parse_value(r#"T(rows = List(List("a", "b"), List("c")))"#).unwrap();
        let fields = Fields::new(value.as_constructor().unwrap());
        assert_eq!(
            fields.rows("rows"),
            vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]
        );
    }
}
