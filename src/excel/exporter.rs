//! Output workbook writer: extracted tables → .xlsx

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

use crate::error::{BillsheetError, BillsheetResult};
use crate::types::{AccountBillRecord, MeteringRecord, SheetTables};

const METERING_HEADERS: &[&str] = &["account_number", "serial_number", "value", "month"];
const BILL_HEADERS: &[&str] = &[
    "account_number",
    "address",
    "room_number",
    "month",
    "calc_value",
    "credit",
    "total",
];

/// Writes the two canonical tables into one workbook, a worksheet each.
pub struct TableExporter<'a> {
    tables: &'a SheetTables,
}

impl<'a> TableExporter<'a> {
    pub fn new(tables: &'a SheetTables) -> Self {
        Self { tables }
    }

    pub fn export<P: AsRef<Path>>(&self, output_path: P) -> BillsheetResult<()> {
        let mut workbook = Workbook::new();

        let sheet = workbook.add_worksheet();
        sheet
            .set_name("metering")
            .map_err(|e| BillsheetError::Export(format!("failed to set worksheet name: {e}")))?;
        write_headers(sheet, METERING_HEADERS)?;
        for (row, record) in self.tables.metering.iter().enumerate() {
            write_metering_row(sheet, row as u32 + 1, record)?;
        }

        let sheet = workbook.add_worksheet();
        sheet
            .set_name("bills")
            .map_err(|e| BillsheetError::Export(format!("failed to set worksheet name: {e}")))?;
        write_headers(sheet, BILL_HEADERS)?;
        for (row, record) in self.tables.bills.iter().enumerate() {
            write_bill_row(sheet, row as u32 + 1, record)?;
        }

        workbook
            .save(output_path.as_ref())
            .map_err(|e| BillsheetError::Export(format!("failed to save workbook: {e}")))?;
        Ok(())
    }
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> BillsheetResult<()> {
    let bold = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| BillsheetError::Export(format!("failed to write header: {e}")))?;
    }
    Ok(())
}

fn write_metering_row(sheet: &mut Worksheet, row: u32, record: &MeteringRecord) -> BillsheetResult<()> {
    let write = |e: rust_xlsxwriter::XlsxError| {
        BillsheetError::Export(format!("failed to write metering row {row}: {e}"))
    };
    sheet
        .write_string(row, 0, &record.account_number)
        .map_err(write)?;
    sheet
        .write_string(row, 1, &record.serial_number)
        .map_err(write)?;
    sheet.write_number(row, 2, record.value).map_err(write)?;
    sheet.write_string(row, 3, &record.month).map_err(write)?;
    Ok(())
}

fn write_bill_row(sheet: &mut Worksheet, row: u32, record: &AccountBillRecord) -> BillsheetResult<()> {
    let write = |e: rust_xlsxwriter::XlsxError| {
        BillsheetError::Export(format!("failed to write bill row {row}: {e}"))
    };
    sheet
        .write_string(row, 0, &record.account_number)
        .map_err(write)?;
    sheet.write_string(row, 1, &record.address).map_err(write)?;
    if let Some(room) = &record.room_number {
        sheet.write_string(row, 2, room).map_err(write)?;
    }
    sheet.write_string(row, 3, &record.month).map_err(write)?;
    sheet
        .write_number(row, 4, record.calc_value)
        .map_err(write)?;
    sheet.write_number(row, 5, record.credit).map_err(write)?;
    sheet.write_number(row, 6, record.total).map_err(write)?;
    Ok(())
}
