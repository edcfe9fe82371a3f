//! sheetkit: read, convert and update spreadsheets
//!
//! Usage:
//!   # Print every sheet as JSON records
//!   sheetkit -s 10j3vs-LmZcLSlygaEmunjvSZbysj5oFcNtEfNpTp9ZQ --method read
//!
//!   # Write data-<title>.json for every sheet
//!   sheetkit -s https://docs.google.com/spreadsheets/d/<ID> --method convert -o ./out
//!
//!   # Set a single cell
//!   sheetkit -s <ID> --method update --sheet tab1 --row 2 --column 2 --value hello

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use sheetkit::{ContentUpdate, ExportConfig, JsonExporter, SheetSession, SnapshotSource, SpreadsheetId};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Print every sheet's records to stdout
    Read,
    /// Set a single cell
    Update,
    /// Write data-<title>.json per sheet
    Convert,
}

#[derive(Parser, Debug)]
#[command(name = "sheetkit")]
#[command(about = "Read, convert and update spreadsheets", long_about = None)]
struct Args {
    /// Spreadsheet ID, e.g. https://docs.google.com/spreadsheets/d/<Spreadsheet ID>
    #[arg(short = 's', long, env = "SHEETKIT_SPREADSHEET")]
    spreadsheet: String,

    /// The desired action
    #[arg(short = 'm', long, value_enum)]
    method: Method,

    /// Directory holding <ID>.json spreadsheet snapshots
    #[arg(long, env = "SHEETKIT_SNAPSHOT_DIR", default_value = ".")]
    snapshot_dir: PathBuf,

    /// Output directory for converted JSON files
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,

    /// Sheet (tab) title to update
    #[arg(long, required_if_eq("method", "update"))]
    sheet: Option<String>,

    /// Row index of the cell to update
    #[arg(long, required_if_eq("method", "update"))]
    row: Option<usize>,

    /// Column index of the cell to update
    #[arg(long, required_if_eq("method", "update"))]
    column: Option<usize>,

    /// New cell value
    #[arg(long, required_if_eq("method", "update"))]
    value: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let id = SpreadsheetId::parse(&args.spreadsheet)?;
    let mut session = SheetSession::new(SnapshotSource::new(&args.snapshot_dir));

    match args.method {
        Method::Read => {
            let data = session
                .read_spreadsheet(&id, None)
                .with_context(|| format!("Failed to read spreadsheet {}", id))?;
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &data)?;
            writeln!(stdout)?;
        }
        Method::Convert => {
            tracing::info!("converting spreadsheet contents to JSON files");
            std::fs::create_dir_all(&args.output_dir)
                .context("Failed to create output directory")?;
            let exporter = JsonExporter::new(ExportConfig {
                output_dir: args.output_dir,
            });

            let data = session
                .read_spreadsheet(&id, Some(&exporter))
                .with_context(|| format!("Failed to convert spreadsheet {}", id))?;
            for sheet in &data {
                println!("{}", exporter.path_for(&sheet.title).display());
            }
        }
        Method::Update => {
            let (Some(sheet_title), Some(row), Some(column), Some(value)) =
                (args.sheet, args.row, args.column, args.value)
            else {
                bail!("--sheet, --row, --column and --value are required for update");
            };
            let update = ContentUpdate {
                row,
                column,
                value,
                sheet_title,
            };
            session
                .update_spreadsheet(&id, &update)
                .with_context(|| format!("Failed to update spreadsheet {}", id))?;
        }
    }

    Ok(())
}

/// Log to stderr; RUST_LOG takes precedence over -v
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
