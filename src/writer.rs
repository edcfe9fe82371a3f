use crate::error::{Result, SheetError};
use crate::types::Table;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Configuration for JSON export
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory the `data-<title>.json` files are written into
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            output_dir: PathBuf::from("."),
        }
    }
}

/// Writes a sheet's table to `data-<title>.json`
///
/// The title is used verbatim. Callers must make sure it contains no path
/// separators.
#[derive(Debug, Clone, Default)]
pub struct JsonExporter {
    config: ExportConfig,
}

impl JsonExporter {
    pub fn new(config: ExportConfig) -> Self {
        JsonExporter { config }
    }

    pub fn filename(title: &str) -> String {
        format!("data-{}.json", title)
    }

    pub fn path_for(&self, title: &str) -> PathBuf {
        self.config.output_dir.join(Self::filename(title))
    }

    /// Serialize the table and create or overwrite its file
    pub fn export(&self, table: &Table, title: &str) -> Result<PathBuf> {
        let path = self.path_for(title);
        let mut buf = Vec::new();
        write_table(&mut buf, table)?;
        write_file(&path, &buf)?;

        tracing::info!(path = %path.display(), records = table.len(), "exported sheet");
        Ok(path)
    }
}

/// Reject titles that would escape the output directory once used in a filename
pub fn check_title(title: &str) -> Result<()> {
    if title.contains(['/', '\\']) {
        return Err(SheetError::InvalidSheetTitle(title.to_string()));
    }
    Ok(())
}

/// Serialize a table as an array of objects with one-space indentation
pub fn write_table<W: Write>(writer: W, table: &Table) -> Result<()> {
    let mut ser = serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(b" "));
    table.serialize(&mut ser)?;
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let failure = |source| SheetError::FileWriteFailure {
        path: path.to_path_buf(),
        source,
    };
    let mut file = options.open(path).map_err(failure)?;
    file.write_all(contents).map_err(failure)?;
    file.flush().map_err(failure)
}
