//! Workbook loading: .xlsx → CellGrid

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::Path;

use crate::error::{BillsheetError, BillsheetResult};
use crate::grid::CellGrid;
use crate::types::CellValue;

/// Open a workbook and materialize its first worksheet as a grid.
///
/// Source files carry a single active sheet; any further sheets are ignored.
pub fn load_grid<P: AsRef<Path>>(path: P) -> BillsheetResult<CellGrid> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| BillsheetError::Workbook(format!("failed to open {}: {e}", path.display())))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| BillsheetError::Workbook(format!("{} has no worksheets", path.display())))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| BillsheetError::Workbook(format!("failed to read '{sheet_name}': {e}")))?;

    Ok(grid_from_range(&range))
}

/// Convert a calamine cell range into an absolute grid.
///
/// A `Range` is anchored at its first used cell; classification probes use
/// absolute addresses, so the anchor offset is padded back in with empty
/// rows and cells.
pub fn grid_from_range(range: &Range<Data>) -> CellGrid {
    let (row_offset, col_offset) = range
        .start()
        .map_or((0, 0), |(r, c)| (r as usize, c as usize));

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; col_offset];
        cells.extend(row.iter().map(cell_value));
        rows.push(cells);
    }
    CellGrid::new(rows)
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| CellValue::Date(d.date()))
            .unwrap_or(CellValue::Empty),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}
