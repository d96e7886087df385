//! Input source handling.
//!
//! This module opens the frequency files named on the command line and
//! resolves the column labels that go with them. All files are opened up
//! front so a missing path fails fast, before any parsing starts.

use crate::error::FingerprintError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing::debug;

/// One named, line-iterable frequency source.
///
/// The name is whatever identifies the source to the user (for files, the
/// path as given) and is used in error messages and default column labels.
#[derive(Debug)]
pub struct FrequencySource<R> {
    pub name: String,
    pub reader: R,
}

impl<R: BufRead> FrequencySource<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }
}

/// Open every input path as a buffered source, in order.
///
/// Fails on the first path that cannot be opened; sources opened before it
/// are dropped (and their handles released) on the way out.
pub fn open_sources(paths: &[PathBuf]) -> Result<Vec<FrequencySource<BufReader<File>>>, FingerprintError> {
    let mut sources = Vec::with_capacity(paths.len());

    for path in paths {
        debug!("Opening frequency file: {}", path.display());
        let file = File::open(path).map_err(|e| FingerprintError::Source {
            path: path.clone(),
            source: e,
        })?;
        sources.push(FrequencySource::new(
            path.display().to_string(),
            BufReader::new(file),
        ));
    }

    Ok(sources)
}

/// Resolve the column labels for a set of input paths.
///
/// Explicit headers win; otherwise each path is used verbatim, matching
/// the input order. An explicit list of the wrong length is rejected here,
/// before any file is read.
pub fn resolve_labels(
    paths: &[PathBuf],
    headers: Option<&[String]>,
) -> Result<Vec<String>, FingerprintError> {
    match headers {
        Some(labels) => {
            if labels.len() != paths.len() {
                return Err(FingerprintError::LabelCountMismatch {
                    labels: labels.len(),
                    sources: paths.len(),
                });
            }
            Ok(labels.to_vec())
        }
        None => Ok(paths.iter().map(|p| p.display().to_string()).collect()),
    }
}

/// Convenience for tests and callers that already hold text in memory.
#[allow(dead_code)]
pub fn source_from_str(name: &str, text: &str) -> FrequencySource<std::io::Cursor<Vec<u8>>> {
    FrequencySource::new(name, std::io::Cursor::new(text.as_bytes().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_open_sources_missing_file_names_path() {
        let paths = vec![PathBuf::from("/definitely/not/here.tsv")];
        let err = open_sources(&paths).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.tsv"));
    }

    #[test]
    fn test_open_sources_preserves_order() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.tsv");
        let b = dir.path().join("b.tsv");
        std::fs::File::create(&a).unwrap().write_all(b"# a\n").unwrap();
        std::fs::File::create(&b).unwrap().write_all(b"# b\n").unwrap();

        let sources = open_sources(&[b.clone(), a.clone()]).unwrap();
        assert_eq!(sources[0].name, b.display().to_string());
        assert_eq!(sources[1].name, a.display().to_string());
    }

    #[test]
    fn test_labels_default_to_paths() {
        let paths = vec![PathBuf::from("x/one.tsv"), PathBuf::from("two.tsv")];
        let labels = resolve_labels(&paths, None).unwrap();
        assert_eq!(labels, vec!["x/one.tsv", "two.tsv"]);
    }

    #[test]
    fn test_explicit_labels_pass_through() {
        let paths = vec![PathBuf::from("one.tsv")];
        let headers = vec!["wild-type".to_string()];
        let labels = resolve_labels(&paths, Some(&headers)).unwrap();
        assert_eq!(labels, vec!["wild-type"]);
    }

    #[test]
    fn test_label_count_mismatch_is_rejected() {
        let paths = vec![PathBuf::from("one.tsv"), PathBuf::from("two.tsv")];
        let headers = vec!["only-one".to_string()];
        let err = resolve_labels(&paths, Some(&headers)).unwrap_err();
        assert!(matches!(
            err,
            FingerprintError::LabelCountMismatch {
                labels: 1,
                sources: 2
            }
        ));
    }

    #[test]
    fn test_duplicate_labels_are_permitted() {
        let paths = vec![PathBuf::from("a.tsv"), PathBuf::from("b.tsv")];
        let headers = vec!["same".to_string(), "same".to_string()];
        assert!(resolve_labels(&paths, Some(&headers)).is_ok());
    }
}
