//! Real workbook I/O: write a synthetic export with rust_xlsxwriter, read it
//! back through the importer, and run the full pipeline on it.

use billsheet::excel::{load_grid, TableExporter};
use billsheet::extract::assemble;
use billsheet::{classify, Layout, MeteringRecord, SheetTables};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

/// Write a Type-2-shaped workbook: month marker in A5, month value in C5,
/// address in C4, header row at row 7 (1-based).
fn write_type2_workbook(path: &std::path::Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write_string(3, 2, "ул. Ленина, 5").unwrap();
    sheet.write_string(4, 0, "Месяц").unwrap();
    sheet.write_string(4, 2, "Июнь 2023").unwrap();

    let headers = [
        "Лицевой счет",
        "Номер прибора учета",
        "Показания",
        "Месяц начисления",
        "Адрес",
        "Номер квартиры",
        "Начислено",
        "Задолженность",
        "Итого",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(6, col as u16, *header).unwrap();
    }

    sheet.write_string(7, 0, "AC-300").unwrap();
    sheet.write_string(7, 1, "DEV-3").unwrap();
    sheet.write_number(7, 2, 10.0).unwrap();
    sheet.write_string(7, 3, "2023-06").unwrap();
    sheet.write_string(7, 4, "ул. Ленина, 5").unwrap();
    sheet.write_string(7, 5, "3").unwrap();
    sheet.write_number(7, 6, 50.0).unwrap();
    sheet.write_number(7, 7, 0.0).unwrap();
    sheet.write_number(7, 8, 50.0).unwrap();

    workbook.save(path).unwrap();
}

#[test]
fn test_workbook_roundtrip_classifies_and_extracts() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("type2.xlsx");
    write_type2_workbook(&path);

    let grid = load_grid(&path).unwrap();
    assert_eq!(classify(&grid), Layout::Type2);

    let tables = assemble(&grid).unwrap();
    assert_eq!(tables.metering.len(), 1);
    assert_eq!(tables.metering[0].account_number, "AC-300");
    assert_eq!(tables.metering[0].value, 10.0);
    assert_eq!(tables.bills.len(), 1);
    assert_eq!(tables.bills[0].total, 50.0);
}

#[test]
fn test_exporter_writes_both_worksheets() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out.xlsx");

    let tables = SheetTables {
        metering: vec![MeteringRecord {
            account_number: "AC-1".to_string(),
            serial_number: "DEV-1".to_string(),
            value: 42.0,
            month: "2023-05".to_string(),
        }],
        bills: Vec::new(),
    };

    TableExporter::new(&tables).export(&path).unwrap();
    assert!(path.exists());

    // The first worksheet is the metering table; header plus one record.
    let grid = load_grid(&path).unwrap();
    assert_eq!(grid.at("A1").unwrap().to_string(), "account_number");
    assert_eq!(grid.at("A2").unwrap().to_string(), "AC-1");
    assert_eq!(grid.at("C2").unwrap().as_f64(), 42.0);
}

#[test]
fn test_load_grid_rejects_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.xlsx");
    assert!(load_grid(&path).is_err());
}
