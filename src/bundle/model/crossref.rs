use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The collection a cross-reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossRefKind {
    Equation,
    Figure,
    Section,
    Table,
    Theorem,
    Bibliography,
}

impl CrossRefKind {
    pub const ALL: [CrossRefKind; 6] = [
        CrossRefKind::Equation,
        CrossRefKind::Figure,
        CrossRefKind::Section,
        CrossRefKind::Table,
        CrossRefKind::Theorem,
        CrossRefKind::Bibliography,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CrossRefKind::Equation => "equation",
            CrossRefKind::Figure => "figure",
            CrossRefKind::Section => "section",
            CrossRefKind::Table => "table",
            CrossRefKind::Theorem => "theorem",
            CrossRefKind::Bibliography => "bibliography",
        }
    }
}

impl fmt::Display for CrossRefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CrossRefKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CrossRefKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown cross-reference kind '{}'", s))
    }
}

/// A reference from prose to a labelled item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossRef {
    pub kind: CrossRefKind,
    pub target: String,
    pub display: Option<String>,
}

impl CrossRef {
    pub fn new(kind: CrossRefKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            display: None,
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_parse_back() {
        for kind in CrossRefKind::ALL {
            assert_eq!(kind.name().parse::<CrossRefKind>(), Ok(kind));
        }
        assert!("chapter".parse::<CrossRefKind>().is_err());
    }
}
