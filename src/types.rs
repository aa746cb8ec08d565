use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

//==============================================================================
// Cell Values
//==============================================================================

/// A single cell as seen by the extraction engine.
///
/// The workbook loader converts whatever the file format stores into one of
/// these variants; everything downstream (classification, row walking,
/// assembly) works purely in terms of `CellValue`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// A parsed billing period, normalized to the first day of the month.
    Date(NaiveDate),
}

impl CellValue {
    /// True for blank cells and empty strings. Header probes and control-row
    /// detection treat both the same way.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Compare against a literal header label. Only text cells can match.
    pub fn matches_label(&self, label: &str) -> bool {
        match self {
            CellValue::Text(s) => s.trim() == label,
            _ => false,
        }
    }

    /// Numeric reading of the cell. Non-numeric text and blanks read as 0.0.
    pub fn as_f64(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s.trim()),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m")),
        }
    }
}

/// Format a number for display, removing unnecessary decimal places.
/// Account and serial numbers frequently arrive as float cells; rendering
/// `12345.0` as `"12345"` keeps identifiers stable across source files.
fn format_number(n: f64) -> String {
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

//==============================================================================
// Canonical Fields
//==============================================================================

/// Layout-independent logical column names.
///
/// Each layout maps a subset of these to its own literal header labels; the
/// rest are supplied from sheet-level reference cells or carried context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AccountNumber,
    SerialNumber,
    Value,
    Month,
    Address,
    RoomNumber,
    CalcValue,
    Credit,
    Total,
}

impl Field {
    /// Field set for the metering-readings table.
    pub const METERING: &'static [Field] = &[
        Field::AccountNumber,
        Field::SerialNumber,
        Field::Value,
        Field::Month,
    ];

    /// Field set for the account/bill-summary table.
    pub const BILL: &'static [Field] = &[
        Field::AccountNumber,
        Field::Address,
        Field::RoomNumber,
        Field::Month,
        Field::CalcValue,
        Field::Credit,
        Field::Total,
    ];

    /// Canonical snake_case key, used for JSON export and error messages.
    pub fn key(self) -> &'static str {
        match self {
            Field::AccountNumber => "account_number",
            Field::SerialNumber => "serial_number",
            Field::Value => "value",
            Field::Month => "month",
            Field::Address => "address",
            Field::RoomNumber => "room_number",
            Field::CalcValue => "calc_value",
            Field::Credit => "credit",
            Field::Total => "total",
        }
    }
}

//==============================================================================
// Columnar Accumulator
//==============================================================================

/// Column-oriented accumulator produced by the row walk.
///
/// Columns grow independently while rows are walked (the back-fill mechanism
/// depends on comparing their lengths); `validate_lengths` is the final gate
/// before the set is turned into records.
#[derive(Debug, Clone)]
pub struct ColumnSet {
    fields: Vec<Field>,
    columns: HashMap<Field, Vec<CellValue>>,
}

impl ColumnSet {
    pub fn new(fields: &[Field]) -> Self {
        let columns = fields.iter().map(|&f| (f, Vec::new())).collect();
        Self {
            fields: fields.to_vec(),
            columns,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn contains(&self, field: Field) -> bool {
        self.columns.contains_key(&field)
    }

    pub fn push(&mut self, field: Field, value: CellValue) {
        if let Some(column) = self.columns.get_mut(&field) {
            column.push(value);
        }
    }

    /// The column for `field`, empty if the field was never requested.
    pub fn column(&self, field: Field) -> &[CellValue] {
        self.columns.get(&field).map_or(&[], Vec::as_slice)
    }

    pub fn len_of(&self, field: Field) -> usize {
        self.column(field).len()
    }

    /// Emitted record count, defined by the account-number column.
    pub fn record_count(&self) -> usize {
        self.len_of(Field::AccountNumber)
    }

    /// Replace a column wholesale. Used for layout post-fixes that override
    /// whatever the walk produced.
    pub fn replace(&mut self, field: Field, values: Vec<CellValue>) {
        if let Some(column) = self.columns.get_mut(&field) {
            *column = values;
        }
    }

    /// Pad an empty column up to the record count with copies of `value`.
    /// No-op when the column already has entries.
    pub fn fill_if_empty(&mut self, field: Field, value: CellValue) {
        if self.len_of(field) > 0 {
            return;
        }
        let count = self.record_count();
        self.replace(field, vec![value; count]);
    }

    /// Validate all columns have the same length.
    pub fn validate_lengths(&self) -> Result<(), String> {
        let record_count = self.record_count();
        for &field in &self.fields {
            let len = self.len_of(field);
            if len != record_count {
                return Err(format!(
                    "column '{}' has {} rows, expected {}",
                    field.key(),
                    len,
                    record_count
                ));
            }
        }
        Ok(())
    }
}

//==============================================================================
// Output Records
//==============================================================================

/// One device reading: a single row of the metering table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeteringRecord {
    pub account_number: String,
    pub serial_number: String,
    pub value: f64,
    pub month: String,
}

/// One account's billing summary for one period.
///
/// Individual amounts may originate from a different physical row than the
/// account identifier; the row walk's back-fill reconciles them before the
/// record is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountBillRecord {
    pub account_number: String,
    pub address: String,
    pub room_number: Option<String>,
    pub month: String,
    pub calc_value: f64,
    pub credit: f64,
    pub total: f64,
}

/// The two canonical tables produced from one sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SheetTables {
    pub metering: Vec<MeteringRecord>,
    pub bills: Vec<AccountBillRecord>,
}

impl SheetTables {
    /// Fold another sheet's tables into this one. Batch processing merges
    /// per-file results this way.
    pub fn merge(&mut self, other: SheetTables) {
        self.metering.extend(other.metering);
        self.bills.extend(other.bills);
    }
}
