use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reshaping, exporting or updating spreadsheet data
#[derive(Debug, Error)]
pub enum SheetError {
    /// A data row is wider than the header row
    #[error("row {row} has a value in column {column}, but the header only names {header_len} fields")]
    FieldIndexOutOfRange {
        row: usize,
        column: usize,
        header_len: usize,
    },

    #[error("failed to write {}", path.display())]
    FileWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize sheet data")]
    Serialize(#[from] serde_json::Error),

    #[error("could not find sheet by tab name: {0}")]
    SheetNotFound(String),

    #[error("spreadsheet {0} not found")]
    SpreadsheetNotFound(String),

    #[error("not a spreadsheet ID or URL: {0}")]
    InvalidSpreadsheetId(String),

    /// The title cannot be used as a filename component
    #[error("sheet title {0:?} contains a path separator")]
    InvalidSheetTitle(String),

    #[error("failed to access snapshot {}", path.display())]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot {}", path.display())]
    SnapshotFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = SheetError> = std::result::Result<T, E>;
