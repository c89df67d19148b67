use std::path::Path;

use crate::bundle::error::LoadError;
use crate::bundle::extraction::{self, Family};
use crate::bundle::model::{Document, MetadataValue};
use crate::bundle::parsing::{scan, Record, SkipReason, SkippedRecord, SourceFile};
use crate::bundle::structure::reconstruct;

/// The only format version this engine reads and writes
pub const FORMAT_VERSION: i64 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Fail instead of skipping records that cannot be read
    pub strict: bool,
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// A loaded document and the records left out of it
#[derive(Debug, Clone)]
pub struct Loaded {
    pub document: Document,
    pub skipped: Vec<SkippedRecord>,
}

fn check_version(file: &SourceFile) -> Result<(), LoadError> {
    let name = extraction::family::FORMAT_VERSION;
    // A version that cannot be read is not taken to be version 1
    if let Some(unreadable) = file
        .skipped
        .iter()
        .find(|skipped| skipped.name.as_deref() == Some(name))
    {
        return Err(LoadError::UnsupportedVersion {
            found: unreadable.reason.to_string(),
            supported: FORMAT_VERSION,
        });
    }
    let record = match file.record(name) {
        Some(record) => record,
        None => return Ok(()),
    };
    match record.value.as_i64() {
        Some(FORMAT_VERSION) => Ok(()),
        _ => Err(LoadError::UnsupportedVersion {
            found: record.value.to_string(),
            supported: FORMAT_VERSION,
        }),
    }
}

/// Style name of a style import: the file stem, underscores read as hyphens
fn style_name(import: &str) -> Option<String> {
    Path::new(import)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(|stem| stem.replace('_', "-"))
}

/// Collects typed records into a document
struct Assembler {
    document: Document,
    legacy: Vec<(String, MetadataValue)>,
    sections: Vec<crate::bundle::structure::FlatSection>,
    skipped: Vec<SkippedRecord>,
}

impl Assembler {
    fn new() -> Self {
        Self {
            document: Document::new(),
            legacy: Vec::new(),
            sections: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn skip(&mut self, record: &Record, reason: SkipReason) {
        self.skipped.push(SkippedRecord::of(record, reason));
    }

    fn accept(&mut self, record: &Record) {
        let (family, key) = match Family::of(&record.name) {
            Some(found) => found,
            None => return self.skip(record, SkipReason::UnknownFamily),
        };
        let doc = &mut self.document;
        let outcome: Result<(), SkipReason> = match family {
            Family::FormatVersion => Ok(()),
            Family::Meta => extraction::metadata_value(&record.value)
                .map(|value| {
                    doc.metadata.insert(key.to_string(), value);
                })
                .ok_or(SkipReason::UnsupportedValue),
            Family::Block => extraction::content_block(&record.value)
                .map(|block| {
                    doc.content_blocks.insert(key.to_string(), block);
                })
                .ok_or(SkipReason::UnsupportedValue),
            Family::LegacyMetadata => extraction::legacy_metadata(record).map(|fields| {
                self.legacy.extend(fields);
            }),
            Family::Equation => extraction::equation(record).map(|eq| {
                doc.equations.insert(eq.label.clone(), eq);
            }),
            Family::Figure => extraction::figure(record).map(|fig| {
                doc.figures.insert(fig.label.clone(), fig);
            }),
            Family::Table => extraction::table(record).map(|table| {
                doc.tables.insert(table.label.clone(), table);
            }),
            Family::Theorem => extraction::theorem(record).map(|thm| {
                doc.theorems.insert(thm.label.clone(), thm);
            }),
            Family::Algorithm => extraction::algorithm(record).map(|alg| {
                doc.algorithms.insert(alg.label.clone(), alg);
            }),
            Family::Bib => extraction::bib_entry(record).map(|entry| {
                doc.bibliography.insert(entry.key.clone(), entry);
            }),
            Family::CrossRef => extraction::cross_ref(record).map(|r| {
                doc.cross_refs.push(r);
            }),
            Family::Section => extraction::section(record).map(|section| {
                self.sections.push(section);
            }),
        };
        match outcome {
            Ok(()) => log::debug!("read {} as {:?}", record.name, family),
            Err(reason) => self.skip(record, reason),
        }
    }

    fn finish(mut self) -> (Document, Vec<SkippedRecord>) {
        for (key, value) in self.legacy {
            self.document.metadata.entry(key).or_insert(value);
        }
        self.document.sections = reconstruct(self.sections);
        self.document.mark_loaded();
        (self.document, self.skipped)
    }
}

/// Parse document text
///
/// The format version is checked before anything is extracted. In strict mode any
/// record that cannot be read fails the load.
pub fn load_str(source: &str, options: &LoadOptions) -> Result<Loaded, LoadError> {
    let file = scan(source);
    check_version(&file)?;

    let mut assembler = Assembler::new();
    if let Some(style) = file.imports.get(1).and_then(|import| style_name(import)) {
        assembler.document.style = Some(style);
    }
    assembler.skipped.extend(file.skipped.iter().cloned());
    for record in &file.records {
        assembler.accept(record);
    }
    let (document, mut skipped) = assembler.finish();
    skipped.sort_by_key(|s| s.location.start);

    if options.strict && !skipped.is_empty() {
        return Err(LoadError::SkippedRecords(skipped));
    }
    for record in &skipped {
        log::warn!("skipped {}", record);
    }
    Ok(Loaded { document, skipped })
}
