use crate::error::Result;
use crate::extractor::TableExtractor;
use crate::source::{SpreadsheetId, SpreadsheetSource};
use crate::types::{ContentUpdate, SheetData, SpreadsheetData};
use crate::writer::{check_title, JsonExporter};

/// Reads and updates spreadsheets through an explicitly supplied source
pub struct SheetSession<S: SpreadsheetSource> {
    source: S,
    extractor: TableExtractor,
}

impl<S: SpreadsheetSource> SheetSession<S> {
    pub fn new(source: S) -> Self {
        SheetSession {
            source,
            extractor: TableExtractor::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch a spreadsheet and extract every sheet, exporting each when an
    /// exporter is given
    ///
    /// Every title is checked before anything is exported. After that the
    /// call stops at the first sheet that fails, and files already exported
    /// for earlier sheets are left in place.
    pub fn read_spreadsheet(
        &self,
        id: &SpreadsheetId,
        exporter: Option<&JsonExporter>,
    ) -> Result<SpreadsheetData> {
        let spreadsheet = self.source.fetch(id)?;
        if exporter.is_some() {
            for sheet in &spreadsheet.sheets {
                check_title(&sheet.title)?;
            }
        }

        let mut data = SpreadsheetData::with_capacity(spreadsheet.sheets.len());
        for sheet in spreadsheet.sheets {
            tracing::debug!(title = %sheet.title, rows = sheet.grid.len(), "extracting sheet");
            let table = self.extractor.extract(&sheet.grid)?;
            if let Some(exporter) = exporter {
                exporter.export(&table, &sheet.title)?;
            }
            data.push(SheetData {
                title: sheet.title,
                table,
            });
        }

        Ok(data)
    }

    /// Apply a single-cell update and synchronize it back to the source
    pub fn update_spreadsheet(&mut self, id: &SpreadsheetId, update: &ContentUpdate) -> Result<()> {
        let mut spreadsheet = self.source.fetch(id)?;
        update.apply(&mut spreadsheet)?;
        self.source.synchronize(&spreadsheet)?;

        tracing::info!(
            spreadsheet = %id,
            sheet = %update.sheet_title,
            row = update.row,
            column = update.column,
            "updated cell"
        );
        Ok(())
    }
}
