//! Billsheet - utility-billing spreadsheet extraction
//!
//! This library classifies spreadsheet exports against a closed set of known
//! utility-billing layouts and normalizes each into two canonical tables:
//! per-device metering readings and per-account billing summaries.
//!
//! # Features
//!
//! - Probe-cell layout classification over five known export families
//! - Layout-aware row walking (carried-forward identifiers, aggregate
//!   control rows, sheet-level month/address fallbacks)
//! - Duplicate-row collapsing by summed measures
//! - Excel import/export and JSON export
//!
//! # Example
//!
//! ```no_run
//! use billsheet::excel::load_grid;
//! use billsheet::extract::assemble;
//!
//! let grid = load_grid("may.xlsx")?;
//! let tables = assemble(&grid)?;
//!
//! println!("readings: {}", tables.metering.len());
//! println!("bills: {}", tables.bills.len());
//! # Ok::<(), billsheet::error::BillsheetError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod extract;
pub mod grid;
pub mod layout;
pub mod types;

// Re-export commonly used types
pub use error::{BillsheetError, BillsheetResult};
pub use grid::CellGrid;
pub use layout::{classify, Layout};
pub use types::{AccountBillRecord, CellValue, Field, MeteringRecord, SheetTables};
