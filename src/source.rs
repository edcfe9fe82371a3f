//! Spreadsheet sources
//!
//! A [`SpreadsheetSource`] is the boundary to whatever actually stores the
//! spreadsheet. Network clients live outside this crate and implement the
//! trait; [`SnapshotSource`] keeps spreadsheets as JSON files on disk.

use crate::error::{Result, SheetError};
use crate::types::Spreadsheet;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

static BARE_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").unwrap()
});

static URL_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://docs\.google\.com/spreadsheets/d/([A-Za-z0-9_-]+)(?:[/?#].*)?$").unwrap()
});

/// Identifier of a spreadsheet, e.g. `10j3vs-LmZcLSlygaEmunjvSZbysj5oFcNtEfNpTp9ZQ`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpreadsheetId(String);

impl SpreadsheetId {
    /// Accept either a bare ID or a `https://docs.google.com/spreadsheets/d/<ID>` URL
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if BARE_ID_REGEX.is_match(input) {
            return Ok(SpreadsheetId(input.to_string()));
        }
        URL_ID_REGEX
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|id| SpreadsheetId(id.as_str().to_string()))
            .ok_or_else(|| SheetError::InvalidSpreadsheetId(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where spreadsheets are fetched from and synchronized back to
pub trait SpreadsheetSource {
    fn fetch(&self, id: &SpreadsheetId) -> Result<Spreadsheet>;

    /// Push local changes of a fetched spreadsheet back to the source
    fn synchronize(&mut self, spreadsheet: &Spreadsheet) -> Result<()>;
}

/// Spreadsheets stored as `<dir>/<id>.json` snapshot files
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        SnapshotSource {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn snapshot_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

impl SpreadsheetSource for SnapshotSource {
    fn fetch(&self, id: &SpreadsheetId) -> Result<Spreadsheet> {
        let path = self.snapshot_path(id.as_str());
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(SheetError::SpreadsheetNotFound(id.to_string()));
            }
            Err(source) => return Err(SheetError::SnapshotIo { path, source }),
        };

        let mut spreadsheet: Spreadsheet = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| SheetError::SnapshotFormat { path: path.clone(), source })?;
        // The file name is authoritative; a stored id only labels the snapshot
        if spreadsheet.id != id.as_str() {
            tracing::debug!(path = %path.display(), stored = %spreadsheet.id, "ignoring stored snapshot id");
        }
        spreadsheet.id = id.to_string();

        tracing::debug!(path = %path.display(), sheets = spreadsheet.sheets.len(), "loaded snapshot");
        Ok(spreadsheet)
    }

    fn synchronize(&mut self, spreadsheet: &Spreadsheet) -> Result<()> {
        let id = SpreadsheetId::parse(&spreadsheet.id)?;
        let path = self.snapshot_path(id.as_str());
        let io_err = |source| SheetError::SnapshotIo { path: path.clone(), source };

        let mut writer = BufWriter::new(File::create(&path).map_err(io_err)?);
        serde_json::to_writer_pretty(&mut writer, spreadsheet)
            .map_err(|err| io_err(std::io::Error::from(err)))?;
        writer.flush().map_err(io_err)?;

        tracing::debug!(path = %path.display(), "synchronized snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sheet;
    use tempfile::TempDir;

    #[test]
    fn test_parse_bare_id() {
        let id = SpreadsheetId::parse("10j3vs-LmZcLSlygaEmunjvSZbysj5oFcNtEfNpTp9ZQ").unwrap();
        assert_eq!(id.as_str(), "10j3vs-LmZcLSlygaEmunjvSZbysj5oFcNtEfNpTp9ZQ");
    }

    #[test]
    fn test_parse_url() {
        let id = SpreadsheetId::parse("https://docs.google.com/spreadsheets/d/abc_123-x/edit#gid=0").unwrap();
        assert_eq!(id.as_str(), "abc_123-x");

        let id = SpreadsheetId::parse("https://docs.google.com/spreadsheets/d/abc").unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "../etc/passwd", "https://example.com/spreadsheets/d/abc", "a b"] {
            let err = SpreadsheetId::parse(input).unwrap_err();
            assert!(matches!(err, SheetError::InvalidSpreadsheetId(_)), "{input}");
        }
    }

    #[test]
    fn test_fetch_missing_snapshot() {
        let dir = TempDir::new().unwrap();
        let source = SnapshotSource::new(dir.path());
        let id = SpreadsheetId::parse("nope").unwrap();

        let err = source.fetch(&id).unwrap_err();
        assert!(matches!(err, SheetError::SpreadsheetNotFound(ref s) if s == "nope"));
    }

    #[test]
    fn test_fetch_malformed_snapshot() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        let source = SnapshotSource::new(dir.path());

        let err = source.fetch(&SpreadsheetId::parse("bad").unwrap()).unwrap_err();
        assert!(matches!(err, SheetError::SnapshotFormat { .. }));
    }

    #[test]
    fn test_synchronize_then_fetch() {
        let dir = TempDir::new().unwrap();
        let mut source = SnapshotSource::new(dir.path());
        let spreadsheet = Spreadsheet::new(
            "sheet1",
            vec![Sheet::new("tab1", vec![vec!["a", "b"], vec!["1"]])],
        );

        source.synchronize(&spreadsheet).unwrap();
        let fetched = source.fetch(&SpreadsheetId::parse("sheet1").unwrap()).unwrap();
        assert_eq!(fetched, spreadsheet);
    }

    #[test]
    fn test_fetch_uses_requested_id() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("doc.json"),
            r#"{"id": "../other", "sheets": [{"title": "tab1", "rows": [["a"]]}]}"#,
        )
        .unwrap();
        let mut source = SnapshotSource::new(dir.path());

        let mut fetched = source.fetch(&SpreadsheetId::parse("doc").unwrap()).unwrap();
        assert_eq!(fetched.id, "doc");

        fetched.sheets[0].grid.set_cell(1, 0, "x");
        source.synchronize(&fetched).unwrap();

        let stored = std::fs::read_to_string(dir.path().join("doc.json")).unwrap();
        assert!(stored.contains("\"x\""));
        assert!(!dir.path().parent().unwrap().join("other.json").exists());
    }

    #[test]
    fn test_synchronize_rejects_unsafe_id() {
        let dir = TempDir::new().unwrap();
        let mut source = SnapshotSource::new(dir.path());
        let spreadsheet = Spreadsheet::new("../escaped", vec![]);

        let err = source.synchronize(&spreadsheet).unwrap_err();
        assert!(matches!(err, SheetError::InvalidSpreadsheetId(_)));
        assert!(!dir.path().parent().unwrap().join("escaped.json").exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_synchronize_write_failure_is_snapshot_io() {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(full, dir.path().join("big.json")).unwrap();
        let mut source = SnapshotSource::new(dir.path());

        // Large enough to overflow the write buffer while serializing
        let rows: Vec<Vec<String>> = (0..2000).map(|i| vec![format!("value-{i}")]).collect();
        let spreadsheet = Spreadsheet::new("big", vec![Sheet::new("tab1", rows)]);

        let err = source.synchronize(&spreadsheet).unwrap_err();
        assert!(matches!(err, SheetError::SnapshotIo { .. }), "{err:?}");
    }

    #[test]
    fn test_fetch_fills_missing_id() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("xyz.json"),
            r#"{"id": "", "sheets": [{"title": "tab1", "rows": [["a"]]}]}"#,
        )
        .unwrap();
        let source = SnapshotSource::new(dir.path());

        let fetched = source.fetch(&SpreadsheetId::parse("xyz").unwrap()).unwrap();
        assert_eq!(fetched.id, "xyz");
        assert_eq!(fetched.sheets[0].grid.get(0, 0), Some("a"));
    }
}
