use thiserror::Error;

pub type BillsheetResult<T> = Result<T, BillsheetError>;

#[derive(Error, Debug)]
pub enum BillsheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("invalid cell address: {0}")]
    CellAddress(String),

    #[error("sheet matches no known layout")]
    UnsupportedLayout,

    #[error("layout {0} has no active registry entry")]
    ReservedLayout(crate::layout::Layout),

    #[error("required reference cell {0} is empty or not configured")]
    MissingReferenceCell(String),

    #[error("cannot parse billing month: {0}")]
    MalformedMonth(String),

    #[error("column misalignment: {0}")]
    ColumnMisalignment(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel write error: {0}")]
    Export(String),
}
