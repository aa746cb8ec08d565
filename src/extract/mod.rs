//! The extraction engine: row walking, table assembly, deduplication.
//!
//! The row walker turns one classified sheet into columnar data for a
//! requested field set; the assembler runs it twice (metering fields, bill
//! fields) and finishes both canonical tables; the deduplicator collapses
//! duplicate rows that source sheets occasionally contain.

mod assembler;
mod dedup;
mod row_walker;

pub use assembler::assemble;
pub use dedup::{collapse_bills, collapse_metering};
pub use row_walker::extract;
