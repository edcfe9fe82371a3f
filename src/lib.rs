//! # sheetkit - spreadsheet reading, conversion and updates
//!
//! Turns the cells of a spreadsheet tab into keyed records, writes them out
//! as JSON, and sends single-cell updates back to where the spreadsheet lives.
//!
//! ## Modules
//!
//! - **extractor**: reshape a grid of cells into records, header row first
//! - **writer**: export a sheet's records to `data-<title>.json`
//! - **source**: the [`SpreadsheetSource`] seam and a JSON snapshot source
//! - **session**: read and update whole spreadsheets through a source
//!
//! ## Quick Start
//!
//! ```rust
//! use sheetkit::{Grid, TableExtractor};
//!
//! # fn main() -> Result<(), sheetkit::SheetError> {
//! let grid = Grid::from(vec![
//!     vec!["name", "team"],
//!     vec!["Alice", "core"],
//!     vec!["Bob"],
//! ]);
//!
//! let table = TableExtractor::new().extract(&grid)?;
//!
//! // table[0] = {"name": "Alice", "team": "core"}
//! // table[1] = {"name": "Bob"}
//! assert_eq!(table.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extractor;
pub mod session;
pub mod source;
pub mod types;
pub mod writer;

// Re-export commonly used types for convenience
pub use error::{Result, SheetError};
pub use extractor::TableExtractor;
pub use session::SheetSession;
pub use source::{SnapshotSource, SpreadsheetId, SpreadsheetSource};
pub use types::{Cell, ContentUpdate, Grid, Record, Sheet, SheetData, Spreadsheet, SpreadsheetData, Table};
pub use writer::{check_title, ExportConfig, JsonExporter};

/// Extract a grid's table and write it to `data-<title>.json`
///
/// Titles containing a path separator are rejected before anything is written.
pub fn convert_sheet(sheet: &Sheet, exporter: &JsonExporter) -> Result<Table> {
    check_title(&sheet.title)?;
    let table = TableExtractor::new().extract(&sheet.grid)?;
    exporter.export(&table, &sheet.title)?;
    Ok(table)
}
