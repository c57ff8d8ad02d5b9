//! Locating source workbooks inside a quarter folder.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use qrs_model::Source;

use crate::error::{IngestError, Result};

/// Match the files of a quarter folder to the four regulatory sources.
///
/// Filenames are compared case-insensitively by substring against each
/// source code (IND, NDA, FDA, NMPA); a file is attributed to the first
/// code it contains. The directory listing is sorted by filename so that
/// when several files match the same code the lexicographically first one
/// wins deterministically; the rest are logged and ignored. Sources with
/// no matching file are simply absent from the result.
pub fn match_quarter_files(dir: &Path) -> Result<BTreeMap<Source, PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|error| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: error,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|error| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: error,
        })?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut matched: BTreeMap<Source, PathBuf> = BTreeMap::new();
    for path in files {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("")
            .to_uppercase();
        let Some(source) = Source::ALL
            .into_iter()
            .find(|source| name.contains(source.code()))
        else {
            continue;
        };
        if let Some(existing) = matched.get(&source) {
            warn!(
                source = %source,
                kept = %existing.display(),
                skipped = %path.display(),
                "multiple files match source code, keeping first"
            );
            continue;
        }
        debug!(source = %source, path = %path.display(), "source file matched");
        matched.insert(source, path);
    }

    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_quarter_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), b"stub").unwrap();
        }
        dir
    }

    #[test]
    fn matches_one_file_per_source() {
        let dir = create_quarter_dir(&[
            "2024Q4 ind filings.xlsx",
            "Q4_NDA.xlsx",
            "fda approvals.xlsx",
            "nmpa_q4.xlsx",
            "notes.txt",
        ]);
        let matched = match_quarter_files(dir.path()).unwrap();
        assert_eq!(matched.len(), 4);
        assert!(
            matched
                .get(&Source::Ind)
                .unwrap()
                .to_str()
                .unwrap()
                .contains("ind filings")
        );
    }

    #[test]
    fn first_filename_wins_on_duplicates() {
        let dir = create_quarter_dir(&["b_FDA.xlsx", "a_FDA.xlsx"]);
        let matched = match_quarter_files(dir.path()).unwrap();
        assert_eq!(matched.len(), 1);
        let kept = matched.get(&Source::Fda).unwrap();
        assert!(kept.to_str().unwrap().contains("a_FDA"));
    }

    #[test]
    fn unmatched_sources_are_absent() {
        let dir = create_quarter_dir(&["Q4_NMPA.xlsx"]);
        let matched = match_quarter_files(dir.path()).unwrap();
        assert_eq!(matched.len(), 1);
        assert!(!matched.contains_key(&Source::Ind));
    }

    #[test]
    fn code_priority_follows_source_order() {
        // A name containing both IND and NDA goes to IND.
        let dir = create_quarter_dir(&["IND_NDA_combined.xlsx"]);
        let matched = match_quarter_files(dir.path()).unwrap();
        assert!(matched.contains_key(&Source::Ind));
        assert!(!matched.contains_key(&Source::Nda));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let err = match_quarter_files(Path::new("/nonexistent/q4")).unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }
}
