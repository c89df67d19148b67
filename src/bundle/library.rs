//! A directory of saved documents
//!
//! The library is just a directory: every file with the document extension in it is a
//! document. Listing reads only the title record of each file, so a directory full of
//! partly broken documents still lists.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use crate::bundle::error::LoadError;
use crate::bundle::extraction::LEGACY_METADATA;
use crate::bundle::overview::UNTITLED;
use crate::bundle::parsing::scan;
use crate::bundle::persistence::{load_path, LoadOptions, Loaded};

const TITLE_RECORD: &str = "meta_title";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryEntry {
    pub path: PathBuf,
    pub file_name: String,
    pub title: String,
    #[serde(skip)]
    pub modified: SystemTime,
}

/// Title of a document source, without loading the rest of it
pub fn title_of(source: &str) -> String {
    let file = scan(source);
    let from_record = file
        .record(TITLE_RECORD)
        .and_then(|record| record.value.as_str().map(str::to_string));
    let from_legacy = || {
        file.record(LEGACY_METADATA)
            .and_then(|record| record.value.as_constructor())
            .and_then(|c| c.get("title"))
            .and_then(|value| value.as_str().map(str::to_string))
    };
    from_record
        .or_else(from_legacy)
        .unwrap_or_else(|| UNTITLED.to_string())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

/// Documents in `dir`, most recently modified first
pub fn list_documents(dir: impl AsRef<Path>, extension: &str) -> Result<Vec<LibraryEntry>, LoadError> {
    let dir = dir.as_ref();
    let io_error = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if !path.is_file() || !has_extension(&path, extension) {
            continue;
        }
        let read = fs::read_to_string(&path)
            .and_then(|source| Ok((source, fs::metadata(&path)?.modified()?)));
        let (source, modified) = match read {
            Ok(read) => read,
            Err(err) => {
                log::warn!("skipping {}: {}", path.display(), err);
                continue;
            }
        };
        entries.push(LibraryEntry {
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            title: title_of(&source),
            modified,
            path,
        });
    }

    entries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.file_name.cmp(&b.file_name)));
    Ok(entries)
}

/// Load the most recently modified document, if the directory has any
pub fn open_recent(
    dir: impl AsRef<Path>,
    extension: &str,
    options: &LoadOptions,
) -> Result<Option<(PathBuf, Loaded)>, LoadError> {
    match list_documents(dir, extension)?.into_iter().next() {
        Some(entry) => {
            let loaded = load_path(&entry.path, options)?;
            Ok(Some((entry.path, loaded)))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str, age: u64) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        let file = fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(age))
            .unwrap();
        path
    }

    #[test]
    fn test_title_of() {
        assert_eq!(title_of("define meta_title = \"Paper\""), "Paper");
        assert_eq!(
            title_of("define doc_metadata = Metadata(title = \"Old\")"),
            "Old"
        );
        assert_eq!(title_of("define meta_date = \"2024\""), "Untitled");
    }

    #[test]
    fn test_list_documents_newest_first() {
        let dir = TempDir::new().unwrap();
        write(&dir, "old.kleis", "define meta_title = \"Old\"", 300);
        write(&dir, "new.kleis", "define meta_title = \"New\"", 10);
        write(&dir, "notes.txt", "define meta_title = \"Notes\"", 0);

        let entries = list_documents(dir.path(), "kleis").unwrap();
        let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old"]);
        assert_eq!(entries[0].file_name, "new.kleis");
    }

    #[test]
    fn test_open_recent() {
        let dir = TempDir::new().unwrap();
        assert!(open_recent(dir.path(), "kleis", &LoadOptions::default())
            .unwrap()
            .is_none());

        write(&dir, "a.kleis", "define meta_title = \"A\"", 100);
        let path = write(&dir, "b.kleis", "define meta_title = \"B\"", 1);
        let (opened, loaded) = open_recent(dir.path(), "kleis", &LoadOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(opened, path);
        assert_eq!(loaded.document.title(), Some("B"));
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            list_documents(&missing, "kleis"),
            Err(LoadError::Io { .. })
        ));
    }
}
