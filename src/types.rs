use crate::error::{Result, SheetError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single cell value. Blank cells hold the empty string.
pub type Cell = String;

/// One logical row keyed by the header's field names
pub type Record = BTreeMap<String, String>;

/// All records of one sheet, header excluded, in source row order
pub type Table = Vec<Record>;

/// Raw two-dimensional cell data for one sheet. Row 0 is the header.
///
/// Rows may be shorter than one another; spreadsheets drop blank trailing
/// cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Grid { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Store a value, growing the grid with blank rows and cells as needed
    pub fn set_cell(&mut self, row: usize, column: usize, value: impl Into<Cell>) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = value.into();
    }
}

impl<S: Into<Cell>> From<Vec<Vec<S>>> for Grid {
    fn from(rows: Vec<Vec<S>>) -> Self {
        Grid::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

/// A tab within a spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub title: String,

    #[serde(rename = "rows", default)]
    pub grid: Grid,
}

impl Sheet {
    pub fn new(title: impl Into<String>, grid: impl Into<Grid>) -> Self {
        Sheet {
            title: title.into(),
            grid: grid.into(),
        }
    }
}

/// A whole spreadsheet as handed over by a [`crate::SpreadsheetSource`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spreadsheet {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl Spreadsheet {
    pub fn new(id: impl Into<String>, sheets: Vec<Sheet>) -> Self {
        Spreadsheet {
            id: id.into(),
            sheets,
        }
    }

    /// Find a sheet by its tab name
    pub fn sheet_by_title(&self, title: &str) -> Result<&Sheet> {
        self.sheets
            .iter()
            .find(|sheet| sheet.title == title)
            .ok_or_else(|| SheetError::SheetNotFound(title.to_string()))
    }

    pub fn sheet_by_title_mut(&mut self, title: &str) -> Result<&mut Sheet> {
        self.sheets
            .iter_mut()
            .find(|sheet| sheet.title == title)
            .ok_or_else(|| SheetError::SheetNotFound(title.to_string()))
    }
}

/// A single-cell update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentUpdate {
    pub row: usize,
    pub column: usize,
    pub value: String,
    pub sheet_title: String,
}

impl ContentUpdate {
    /// Write the new value into the target sheet
    pub fn apply(&self, spreadsheet: &mut Spreadsheet) -> Result<()> {
        let sheet = spreadsheet.sheet_by_title_mut(&self.sheet_title)?;
        sheet.grid.set_cell(self.row, self.column, self.value.clone());
        Ok(())
    }
}

/// Extracted tables of every sheet, in spreadsheet order
pub type SpreadsheetData = Vec<SheetData>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetData {
    pub title: String,
    pub table: Table,
}
