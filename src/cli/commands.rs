use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::BillsheetResult;
use crate::excel::{load_grid, TableExporter};
use crate::extract;
use crate::layout;
use crate::types::SheetTables;

/// Execute the classify command: report the detected layout per file.
pub fn classify(files: Vec<PathBuf>) -> BillsheetResult<()> {
    println!("{}", "🔍 Billsheet - Layout detection".bold().green());
    println!();

    for file in &files {
        match load_grid(file) {
            Ok(grid) => {
                let detected = layout::classify(&grid);
                let label = if detected == layout::Layout::Unsupported {
                    detected.to_string().yellow()
                } else {
                    detected.to_string().bright_blue().bold()
                };
                println!("   {} → {}", file.display(), label);
            }
            Err(e) => {
                println!("   {} → {}", file.display(), format!("error: {e}").red());
            }
        }
    }
    Ok(())
}

/// Execute the extract command: one workbook → both canonical tables.
pub fn extract(
    file: PathBuf,
    json: Option<PathBuf>,
    xlsx: Option<PathBuf>,
    verbose: bool,
) -> BillsheetResult<()> {
    println!("{}", "📊 Billsheet - Extracting tables".bold().green());
    println!("   File: {}", file.display());
    println!();

    let tables = process_file(&file)?;
    print_summary(&tables);

    if verbose {
        for record in &tables.metering {
            println!(
                "   {} {} {} {}",
                record.account_number.bright_blue(),
                record.serial_number,
                record.value,
                record.month.cyan()
            );
        }
    }

    write_outputs(&tables, json.as_deref(), xlsx.as_deref())?;
    println!("{}", "✅ Extraction complete".bold().green());
    Ok(())
}

/// Execute the batch command: every workbook in a directory, merged tables.
///
/// Failures stay scoped to the file that caused them: an unclassifiable or
/// malformed workbook is reported and skipped, the batch keeps going.
pub fn batch(
    dir: PathBuf,
    json: Option<PathBuf>,
    xlsx: Option<PathBuf>,
) -> BillsheetResult<()> {
    println!("{}", "📊 Billsheet - Batch extraction".bold().green());
    println!("   Directory: {}", dir.display());
    println!();

    let mut files: Vec<PathBuf> = fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
        })
        .collect();
    files.sort();

    let mut merged = SheetTables::default();
    let mut skipped = 0usize;

    for file in &files {
        match process_file(file) {
            Ok(tables) => {
                println!(
                    "   {} {} ({} readings, {} bills)",
                    "✓".green(),
                    file.display(),
                    tables.metering.len(),
                    tables.bills.len()
                );
                merged.merge(tables);
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipping file");
                println!("   {} {} ({})", "✗".yellow(), file.display(), e);
                skipped += 1;
            }
        }
    }

    println!();
    println!(
        "   {} processed, {} skipped",
        files.len() - skipped,
        skipped
    );
    print_summary(&merged);

    write_outputs(&merged, json.as_deref(), xlsx.as_deref())?;
    println!("{}", "✅ Batch complete".bold().green());
    Ok(())
}

fn process_file(file: &Path) -> BillsheetResult<SheetTables> {
    let grid = load_grid(file)?;
    extract::assemble(&grid)
}

fn print_summary(tables: &SheetTables) {
    println!(
        "   📈 Metering readings: {}",
        tables.metering.len().to_string().bold()
    );
    println!(
        "   💰 Bill summaries:    {}",
        tables.bills.len().to_string().bold()
    );
    println!();
}

fn write_outputs(
    tables: &SheetTables,
    json: Option<&Path>,
    xlsx: Option<&Path>,
) -> BillsheetResult<()> {
    if let Some(path) = json {
        let payload = serde_json::to_string_pretty(tables)?;
        fs::write(path, payload)?;
        println!("   JSON written to {}", path.display());
    }
    if let Some(path) = xlsx {
        TableExporter::new(tables).export(path)?;
        println!("   Workbook written to {}", path.display());
    }
    Ok(())
}
