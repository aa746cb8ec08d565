//! Read-only random access into one sheet's rectangular cell grid.
//!
//! The grid is handed to the engine by the workbook loader and lives for the
//! duration of one sheet's processing. Classification probes address cells
//! spreadsheet-style ("C4"); the row walk uses 0-based indexes.

use crate::error::{BillsheetError, BillsheetResult};
use crate::types::CellValue;

static EMPTY_CELL: CellValue = CellValue::Empty;

#[derive(Debug, Clone)]
pub struct CellGrid {
    rows: Vec<Vec<CellValue>>,
}

impl CellGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell by 0-based row/column index. Out-of-bounds reads are empty,
    /// matching how spreadsheet libraries expose unused cells; probing a
    /// short sheet must degrade to "no match", not crash.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Cell by 1-based A1-style address ("C4").
    pub fn at(&self, addr: &str) -> BillsheetResult<&CellValue> {
        let (row, col) = parse_cell_address(addr)?;
        Ok(self.cell(row, col))
    }

    /// One full row as a slice, empty if out of bounds.
    pub fn row(&self, row: usize) -> &[CellValue] {
        self.rows.get(row).map_or(&[], Vec::as_slice)
    }

    /// Enumerate rows starting at `start` (0-based). The row walk begins
    /// immediately after the header row.
    pub fn rows_from(&self, start: usize) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().skip(start).map(Vec::as_slice)
    }
}

/// Parse an A1-style address into 0-based (row, col).
/// Column letters are base-26 ("A"→0, "Z"→25, "AA"→26).
pub fn parse_cell_address(addr: &str) -> BillsheetResult<(usize, usize)> {
    let trimmed = addr.trim();
    let letters: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    let digits = &trimmed[letters.len()..];

    if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(BillsheetError::CellAddress(addr.to_string()));
    }

    let mut col: usize = 0;
    for c in letters.chars() {
        col = col * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }

    let row: usize = digits
        .parse()
        .map_err(|_| BillsheetError::CellAddress(addr.to_string()))?;
    if row == 0 {
        return Err(BillsheetError::CellAddress(addr.to_string()));
    }

    Ok((row - 1, col - 1))
}
