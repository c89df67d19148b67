//! Generic value tree of the record format
//!
//! Every record body and every embedded expression tree is a [`Value`]. The [`fmt::Display`]
//! implementation is the canonical emitter: whatever is written to disk goes through it, so
//! the spelling of lists and constructors lives in one place.

use crate::bundle::lexing::escape_string;
use std::fmt;

/// Constructor name used for list literals
pub const LIST: &str = "List";

/// A parsed (or to-be-written) value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    /// Numeric literal, kept as written
    Number(String),
    Bool(bool),
    List(Vec<Value>),
    Constructor(Constructor),
}

/// A constructor application: `Name(positional, ..., field = value, ...)`
///
/// A bare identifier is a constructor with no arguments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Constructor {
    pub name: String,
    pub positional: Vec<Value>,
    pub fields: Vec<(String, Value)>,
}

impl Value {
    pub fn text(text: impl Into<String>) -> Self {
        Value::Str(text.into())
    }

    pub fn integer(n: i64) -> Self {
        Value::Number(n.to_string())
    }

    /// Numbers without a fractional part are written as integers.
    pub fn number(n: f64) -> Self {
        if n.fract() == 0.0 && n.abs() < 1e15 {
            Value::Number(format!("{}", n as i64))
        } else {
            Value::Number(format!("{}", n))
        }
    }

    pub fn list<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::List(items.into_iter().collect())
    }

    pub fn text_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(|s| Value::Str(s.into())).collect())
    }

    /// Bracket nesting of the written form
    pub fn nesting(&self) -> usize {
        match self {
            Value::List(items) => 1 + items.iter().map(Value::nesting).max().unwrap_or(0),
            Value::Constructor(c) if !c.is_bare() => {
                1 + c
                    .positional
                    .iter()
                    .chain(c.fields.iter().map(|(_, value)| value))
                    .map(Value::nesting)
                    .max()
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(raw) => raw.parse().ok(),
            _ => None,
        }
    }

    /// Integer value of a numeric literal; fractional numbers are rejected.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(raw) => raw.parse::<i64>().ok().or_else(|| {
                let n: f64 = raw.parse().ok()?;
                (n.fract() == 0.0 && n.abs() < 1e15).then_some(n as i64)
            }),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Elements of a list whose items are all strings.
    pub fn as_text_list(&self) -> Option<Vec<String>> {
        self.as_list()?
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect()
    }

    pub fn as_constructor(&self) -> Option<&Constructor> {
        match self {
            Value::Constructor(c) => Some(c),
            _ => None,
        }
    }

    /// The constructor, if this value is an application of `name`.
    pub fn constructor_named(&self, name: &str) -> Option<&Constructor> {
        self.as_constructor().filter(|c| c.name == name)
    }
}

impl From<Constructor> for Value {
    fn from(constructor: Constructor) -> Self {
        Value::Constructor(constructor)
    }
}

impl Constructor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positional: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Append a positional argument
    pub fn arg(mut self, value: Value) -> Self {
        self.positional.push(value);
        self
    }

    /// Append a named field
    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    /// Look a named field up regardless of its position. The first occurrence wins.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn is_bare(&self) -> bool {
        self.positional.is_empty() && self.fields.is_empty()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", escape_string(s)),
            Value::Number(raw) => write!(f, "{}", raw),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => {
                write!(f, "{}(", LIST)?;
                write_separated(f, items.iter().map(|item| item as &dyn fmt::Display))?;
                write!(f, ")")
            }
            Value::Constructor(c) => write!(f, "{}", c),
        }
    }
}

impl fmt::Display for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            return write!(f, "{}", self.name);
        }
        let fields: Vec<NamedField<'_>> = self
            .fields
            .iter()
            .map(|(name, value)| NamedField { name, value })
            .collect();
        write!(f, "{}(", self.name)?;
        write_separated(
            f,
            self.positional
                .iter()
                .map(|v| v as &dyn fmt::Display)
                .chain(fields.iter().map(|nf| nf as &dyn fmt::Display)),
        )?;
        write!(f, ")")
    }
}

struct NamedField<'a> {
    name: &'a str,
    value: &'a Value,
}

impl fmt::Display for NamedField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

fn write_separated<'a, I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: Iterator<Item = &'a dyn fmt::Display>,
{
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested_constructor() {
        let value: Value = Constructor::new("Apply")
            .arg(Value::text("plus"))
            .arg(Value::list(vec![
                Constructor::new("Symbol").arg(Value::text("x")).into(),
                Value::integer(2),
            ]))
            .into();
        assert_eq!(value.to_string(), r#"Apply("plus", List(Symbol("x"), 2))"#);
    }

    #[test]
    fn test_display_named_fields_and_bare() {
        let value: Value = Constructor::new("Figure")
            .field("label", Value::text("fig:a"))
            .field("source", Constructor::new("Static").into())
            .into();
        assert_eq!(value.to_string(), r#"Figure(label = "fig:a", source = Static)"#);
    }

    #[test]
    fn test_nesting_counts_written_brackets() {
        assert_eq!(Value::text("x").nesting(), 0);
        assert_eq!(Value::from(Constructor::new("Bare")).nesting(), 0);
        assert_eq!(Value::list(vec![]).nesting(), 1);
        let tree = Value::from(
            Constructor::new("Apply")
                .arg(Value::text("f"))
                .arg(Value::list(vec![Constructor::new("Symbol").arg(Value::text("x")).into()])),
        );
        assert_eq!(tree.nesting(), 3);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(Value::List(vec![]).to_string(), "List()");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(Value::number(2026.0).to_string(), "2026");
        assert_eq!(Value::number(0.5).to_string(), "0.5");
        assert_eq!(Value::number(2026.0).as_i64(), Some(2026));
        assert_eq!(Value::Number("1.5".to_string()).as_i64(), None);
    }

    #[test]
    fn test_field_lookup_ignores_position() {
        let c = Constructor::new("R")
            .field("b", Value::Bool(true))
            .field("a", Value::text("x"));
        assert_eq!(c.get("a").and_then(Value::as_str), Some("x"));
        assert_eq!(c.get("b").and_then(Value::as_bool), Some(true));
        assert!(c.get("c").is_none());
    }
}
