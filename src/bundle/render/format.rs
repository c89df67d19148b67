use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Target notation for an expression render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderFormat {
    /// Typst math
    SymbolicTypeset,
    /// LaTeX
    ClassicMarkup,
    PlainUnicode,
    /// HTML
    StructuralMarkup,
    /// The constructor text the document format stores
    ConstructorText,
}

impl RenderFormat {
    pub const ALL: [RenderFormat; 5] = [
        RenderFormat::SymbolicTypeset,
        RenderFormat::ClassicMarkup,
        RenderFormat::PlainUnicode,
        RenderFormat::StructuralMarkup,
        RenderFormat::ConstructorText,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RenderFormat::SymbolicTypeset => "typst",
            RenderFormat::ClassicMarkup => "latex",
            RenderFormat::PlainUnicode => "unicode",
            RenderFormat::StructuralMarkup => "html",
            RenderFormat::ConstructorText => "kleis",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RenderFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| format!("unknown render format '{}'", s))
    }
}
