use clap::{Parser, Subcommand};
use std::path::PathBuf;

use billsheet::cli;
use billsheet::error::BillsheetResult;

#[derive(Parser)]
#[command(name = "billsheet")]
#[command(about = "Normalize utility-billing spreadsheet exports into metering and billing tables.")]
#[command(long_about = "Billsheet - utility-billing spreadsheet extraction

Classifies each workbook against five known export layouts, then extracts
two canonical tables regardless of the source layout:

  metering  - per-device readings (account, serial, reading, month)
  bills     - per-account summaries (charges, arrears, totals)

Workbooks that match no known layout are reported and skipped; a batch run
never aborts because of one malformed file.

EXAMPLES:
  billsheet classify exports/*.xlsx        # which layout is this?
  billsheet extract may.xlsx --json out.json
  billsheet batch exports/ --xlsx merged.xlsx")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the detected layout for each file
    Classify {
        /// Workbooks to probe
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    #[command(long_about = "Extract both canonical tables from one workbook.

The sheet is classified first; extraction then follows that layout's rules
for header location, carried-forward identifiers and aggregate control rows.

EXAMPLE:
  billsheet extract may.xlsx --json may.json --xlsx may_tables.xlsx")]
    /// Extract metering and billing tables from one workbook
    Extract {
        /// Path to the source workbook (.xlsx)
        file: PathBuf,

        /// Write both tables as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write both tables as a workbook to this path
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Print every extracted metering record
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Process every .xlsx workbook in a directory.

Per-file failures (unsupported layout, malformed month cell, broken
workbook) are reported and skipped; the remaining files are merged into
one metering table and one billing table.

EXAMPLE:
  billsheet batch exports/ --json merged.json")]
    /// Extract and merge tables from every workbook in a directory
    Batch {
        /// Directory of source workbooks
        dir: PathBuf,

        /// Write the merged tables as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the merged tables as a workbook to this path
        #[arg(long)]
        xlsx: Option<PathBuf>,
    },
}

fn main() -> BillsheetResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { files } => cli::classify(files),

        Commands::Extract {
            file,
            json,
            xlsx,
            verbose,
        } => cli::extract(file, json, xlsx, verbose),

        Commands::Batch { dir, json, xlsx } => cli::batch(dir, json, xlsx),
    }
}
