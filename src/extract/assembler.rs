//! Table assembly: two row walks, sheet-level back-fills, record conversion.

use crate::error::{BillsheetError, BillsheetResult};
use crate::extract::row_walker::extract;
use crate::extract::{collapse_bills, collapse_metering};
use crate::grid::CellGrid;
use crate::layout::{classify, spec_for, Layout};
use crate::types::{AccountBillRecord, CellValue, ColumnSet, Field, MeteringRecord, SheetTables};

/// Build both canonical tables from one sheet.
///
/// Classifies the sheet, runs the row walk once per field set, applies the
/// sheet-level fallbacks and family post-fixes, validates column alignment
/// and collapses duplicates. Failures are scoped to this one sheet.
pub fn assemble(grid: &CellGrid) -> BillsheetResult<SheetTables> {
    let layout = classify(grid);
    if layout == Layout::Unsupported {
        return Err(BillsheetError::UnsupportedLayout);
    }
    let spec = spec_for(layout)?;

    let metering_cols = extract(grid, layout, Field::METERING)?;
    let mut bill_cols = extract(grid, layout, Field::BILL)?;

    // Families without a per-row address column carry the address in a
    // sheet-level reference cell instead.
    if bill_cols.len_of(Field::Address) == 0 && bill_cols.record_count() > 0 {
        let addr_cell = spec.address_cell.ok_or_else(|| {
            BillsheetError::MissingReferenceCell(format!("{} address", layout))
        })?;
        let value = grid.at(addr_cell)?;
        if value.is_empty() {
            return Err(BillsheetError::MissingReferenceCell(addr_cell.to_string()));
        }
        bill_cols.fill_if_empty(Field::Address, value.clone());
    }

    // Type 5 sheets carry no room numbers at all.
    if layout == Layout::Type5 {
        let blanks = vec![CellValue::Empty; bill_cols.record_count()];
        bill_cols.replace(Field::RoomNumber, blanks);
    }

    metering_cols
        .validate_lengths()
        .map_err(BillsheetError::ColumnMisalignment)?;
    bill_cols
        .validate_lengths()
        .map_err(BillsheetError::ColumnMisalignment)?;

    Ok(SheetTables {
        metering: collapse_metering(metering_records(&metering_cols)),
        bills: collapse_bills(bill_records(&bill_cols)),
    })
}

fn metering_records(cols: &ColumnSet) -> Vec<MeteringRecord> {
    (0..cols.record_count())
        .map(|i| MeteringRecord {
            account_number: cols.column(Field::AccountNumber)[i].to_string(),
            serial_number: cols.column(Field::SerialNumber)[i].to_string(),
            value: cols.column(Field::Value)[i].as_f64(),
            month: cols.column(Field::Month)[i].to_string(),
        })
        .collect()
}

fn bill_records(cols: &ColumnSet) -> Vec<AccountBillRecord> {
    (0..cols.record_count())
        .map(|i| {
            let room = &cols.column(Field::RoomNumber)[i];
            AccountBillRecord {
                account_number: cols.column(Field::AccountNumber)[i].to_string(),
                address: cols.column(Field::Address)[i].to_string(),
                room_number: if room.is_empty() {
                    None
                } else {
                    Some(room.to_string())
                },
                month: cols.column(Field::Month)[i].to_string(),
                calc_value: cols.column(Field::CalcValue)[i].as_f64(),
                credit: cols.column(Field::Credit)[i].as_f64(),
                total: cols.column(Field::Total)[i].as_f64(),
            }
        })
        .collect()
}
