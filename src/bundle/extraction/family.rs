/// What a record is, according to its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Meta,
    Block,
    Equation,
    Figure,
    Table,
    Theorem,
    Algorithm,
    Bib,
    CrossRef,
    Section,
    /// `format_version`
    FormatVersion,
    /// `doc_metadata`, a single record holding all metadata
    LegacyMetadata,
}

pub const FORMAT_VERSION: &str = "format_version";
pub const LEGACY_METADATA: &str = "doc_metadata";

const PREFIXES: [(&str, Family); 10] = [
    ("meta_", Family::Meta),
    ("block_", Family::Block),
    ("eq_", Family::Equation),
    ("fig_", Family::Figure),
    ("table_", Family::Table),
    ("thm_", Family::Theorem),
    ("alg_", Family::Algorithm),
    ("bib_", Family::Bib),
    ("crossref_", Family::CrossRef),
    ("section_", Family::Section),
];

impl Family {
    /// Classify a record name. Returns the family and the part of the name after its
    /// prefix.
    pub fn of(name: &str) -> Option<(Family, &str)> {
        match name {
            FORMAT_VERSION => return Some((Family::FormatVersion, "")),
            LEGACY_METADATA => return Some((Family::LegacyMetadata, "")),
            _ => {}
        }
        PREFIXES.iter().find_map(|(prefix, family)| {
            name.strip_prefix(prefix)
                .filter(|rest| !rest.is_empty())
                .map(|rest| (*family, rest))
        })
    }

    pub fn prefix(&self) -> &'static str {
        PREFIXES
            .iter()
            .find(|(_, family)| family == self)
            .map(|(prefix, _)| *prefix)
            .unwrap_or("")
    }

    /// Constructor a record of this family is written with
    pub fn constructor(&self) -> Option<&'static str> {
        match self {
            Family::Equation => Some("Equation"),
            Family::Figure => Some("Figure"),
            Family::Table => Some("Table"),
            Family::Theorem => Some("Theorem"),
            Family::Algorithm => Some("Algorithm"),
            Family::Bib => Some("BibEntry"),
            Family::CrossRef => Some("CrossRef"),
            Family::Section => Some("Section"),
            Family::LegacyMetadata => Some("Metadata"),
            Family::Meta | Family::Block | Family::FormatVersion => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(Family::of("meta_title"), Some((Family::Meta, "title")));
        assert_eq!(Family::of("eq_3"), Some((Family::Equation, "3")));
        assert_eq!(Family::of("crossref_0"), Some((Family::CrossRef, "0")));
        assert_eq!(Family::of("format_version"), Some((Family::FormatVersion, "")));
        assert_eq!(Family::of("meta_"), None);
        assert_eq!(Family::of("widget_1"), None);
    }

    #[test]
    fn test_prefix_round_trip() {
        assert_eq!(Family::Theorem.prefix(), "thm_");
        assert_eq!(Family::FormatVersion.prefix(), "");
    }
}
