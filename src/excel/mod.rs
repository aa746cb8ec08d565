//! Excel I/O wrappers around the extraction engine.
//!
//! Thin by design: the importer materializes one sheet as a [`CellGrid`]
//! and the exporter writes finished tables back out. No extraction decisions
//! are made here.
//!
//! [`CellGrid`]: crate::grid::CellGrid

mod exporter;
mod importer;

pub use exporter::TableExporter;
pub use importer::{grid_from_range, load_grid};
