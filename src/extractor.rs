use crate::error::{Result, SheetError};
use crate::types::{Grid, Record, Table};

/// Reshapes a sheet's grid into records, using row 0 as field names
#[derive(Debug, Default, Clone, Copy)]
pub struct TableExtractor;

impl TableExtractor {
    pub fn new() -> Self {
        TableExtractor
    }

    /// Extract one record per data row, in row order
    ///
    /// Rows shorter than the header simply omit the missing fields. A row
    /// wider than the header fails with [`SheetError::FieldIndexOutOfRange`].
    pub fn extract(&self, grid: &Grid) -> Result<Table> {
        let Some((header, data_rows)) = grid.rows().split_first() else {
            return Ok(Table::new());
        };

        let mut table = Table::with_capacity(data_rows.len());
        for (offset, row) in data_rows.iter().enumerate() {
            table.push(Self::extract_record(header, row, offset + 1)?);
        }

        Ok(table)
    }

    fn extract_record(header: &[String], row: &[String], row_idx: usize) -> Result<Record> {
        if row.len() > header.len() {
            return Err(SheetError::FieldIndexOutOfRange {
                row: row_idx,
                column: header.len(),
                header_len: header.len(),
            });
        }

        // Duplicate field names keep the rightmost value
        Ok(header
            .iter()
            .zip(row)
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect())
    }
}
