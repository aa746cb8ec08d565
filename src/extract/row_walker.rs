//! Layout-aware row walking.
//!
//! One walk produces one columnar field set. The walk is where every
//! layout-specific rule lives: carried-forward identifiers that appear once
//! and govern the rows below them, control rows that are not data but carry
//! aggregates to be back-filled onto the block above, and the sheet-level
//! month fallback for families without a per-row month column.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{BillsheetError, BillsheetResult};
use crate::grid::CellGrid;
use crate::layout::{spec_for, Layout, LayoutSpec};
use crate::types::{CellValue, ColumnSet, Field};

/// Carry-state for families that declare identifiers once per block of rows.
/// Scoped to a single sheet's walk; reset implicitly by being local here.
#[derive(Debug, Default)]
struct ExtractionContext {
    account: CellValue,
    serial: CellValue,
}

/// Columns the walk resolved against the physical header row.
struct ResolvedColumns {
    /// Requested canonical fields present in the header, with their indexes.
    matched: Vec<(Field, usize)>,
    /// Tariff column (Type 5 control rows).
    tariff: Option<usize>,
    /// Charged-amount column, read by control rows regardless of whether
    /// `calc_value` itself is being collected.
    calc: Option<usize>,
}

/// Extract columnar data for `fields` (plus always the account number and
/// month) from one classified sheet.
///
/// Fields whose label is absent from this sheet's header row are silently
/// omitted from the walk; the assembler back-fills them from sheet-level
/// reference cells where the family provides those.
pub fn extract(grid: &CellGrid, layout: Layout, fields: &[Field]) -> BillsheetResult<ColumnSet> {
    let spec = spec_for(layout)?;

    let mut requested: Vec<Field> = fields.to_vec();
    for always in [Field::AccountNumber, Field::Month] {
        if !requested.contains(&always) {
            requested.push(always);
        }
    }

    let header = grid.row(spec.header_row);
    let resolved = resolve_columns(spec, header, &requested);
    debug!(
        layout = %layout,
        matched = resolved.matched.len(),
        requested = requested.len(),
        "resolved header columns"
    );

    let mut out = ColumnSet::new(&requested);
    let mut ctx = ExtractionContext::default();

    for row in grid.rows_from(spec.header_row + 1) {
        if layout == Layout::Type5 && capture_context(spec, row, &mut ctx) {
            continue;
        }

        if is_control_row(layout, spec, row, &resolved) {
            if layout == Layout::Type5 {
                backfill_aggregates(spec, row, &resolved, &mut out);
            }
            continue;
        }

        for &(field, idx) in &resolved.matched {
            // Under Type 5 identifiers never come from the row itself.
            if layout == Layout::Type5
                && matches!(field, Field::AccountNumber | Field::SerialNumber)
            {
                continue;
            }
            out.push(field, row.get(idx).cloned().unwrap_or_default());
        }

        if layout == Layout::Type5 {
            out.push(Field::AccountNumber, ctx.account.clone());
            if out.contains(Field::SerialNumber) {
                out.push(Field::SerialNumber, ctx.serial.clone());
            }
        }
    }

    fill_month_from_sheet(grid, spec, &mut out)?;

    Ok(out)
}

fn resolve_columns(spec: &LayoutSpec, header: &[CellValue], requested: &[Field]) -> ResolvedColumns {
    let matched = requested
        .iter()
        .filter_map(|&field| {
            let label = spec.label_for(field)?;
            position_of(header, label).map(|idx| (field, idx))
        })
        .collect();

    ResolvedColumns {
        matched,
        tariff: spec.tariff_label.and_then(|l| position_of(header, l)),
        calc: spec
            .label_for(Field::CalcValue)
            .and_then(|l| position_of(header, l)),
    }
}

fn position_of(header: &[CellValue], label: &str) -> Option<usize> {
    header.iter().position(|cell| cell.matches_label(label))
}

/// Type-5 context rows: an account row fully consumes the row (returns true),
/// a device row captures the serial and lets the row fall through to the
/// normal control/data evaluation.
fn capture_context(spec: &LayoutSpec, row: &[CellValue], ctx: &mut ExtractionContext) -> bool {
    let first = row.first().cloned().unwrap_or_default();
    if let Some(account_label) = spec.label_for(Field::AccountNumber) {
        if first.matches_label(account_label) {
            ctx.account = row.get(1).cloned().unwrap_or_default();
            return true;
        }
    }
    if let Some(device_label) = spec.device_label {
        if first.matches_label(device_label) {
            ctx.serial = row.get(1).cloned().unwrap_or_default();
        }
    }
    false
}

fn is_control_row(
    layout: Layout,
    spec: &LayoutSpec,
    row: &[CellValue],
    resolved: &ResolvedColumns,
) -> bool {
    match layout {
        // Grand-total row: the account column holds the total marker.
        Layout::Type3 => {
            let Some(marker) = spec.total_marker else {
                return false;
            };
            resolved
                .matched
                .iter()
                .find(|(field, _)| *field == Field::AccountNumber)
                .is_some_and(|&(_, idx)| {
                    row.get(idx).is_some_and(|cell| cell.matches_label(marker))
                })
        }
        // Aggregate and separator rows between device blocks.
        Layout::Type5 => {
            let tariff_is_aggregate = match resolved.tariff {
                Some(idx) => {
                    let cell = row.get(idx).cloned().unwrap_or_default();
                    cell.is_empty()
                        || spec
                            .label_for(Field::Credit)
                            .is_some_and(|l| cell.matches_label(l))
                        || spec
                            .label_for(Field::Total)
                            .is_some_and(|l| cell.matches_label(l))
                }
                // No tariff column at all: nothing in this sheet is a data row.
                None => true,
            };
            let first = row.first().cloned().unwrap_or_default();
            let first_is_marker = first.is_empty()
                || spec
                    .label_for(Field::AccountNumber)
                    .is_some_and(|l| first.matches_label(l));
            tariff_is_aggregate || first_is_marker
        }
        _ => false,
    }
}

/// Back-fill an aggregate declared once after a block of device rows onto
/// every record of that block. The count to append is the gap between the
/// account-number column and the aggregate column.
fn backfill_aggregates(
    spec: &LayoutSpec,
    row: &[CellValue],
    resolved: &ResolvedColumns,
    out: &mut ColumnSet,
) {
    if !out.contains(Field::Credit) && !out.contains(Field::Total) {
        return;
    }
    let (Some(tariff_idx), Some(calc_idx)) = (resolved.tariff, resolved.calc) else {
        return;
    };
    let tariff = row.get(tariff_idx).cloned().unwrap_or_default();
    let amount = row.get(calc_idx).cloned().unwrap_or_default();

    for (field, label) in [
        (Field::Credit, spec.label_for(Field::Credit)),
        (Field::Total, spec.label_for(Field::Total)),
    ] {
        if !out.contains(field) {
            continue;
        }
        if label.is_some_and(|l| tariff.matches_label(l)) {
            let missing = out.record_count().saturating_sub(out.len_of(field));
            for _ in 0..missing {
                out.push(field, amount.clone());
            }
        }
    }
}

/// If the walk produced no per-row month values, repeat the sheet-level
/// month once per emitted record.
fn fill_month_from_sheet(
    grid: &CellGrid,
    spec: &LayoutSpec,
    out: &mut ColumnSet,
) -> BillsheetResult<()> {
    if out.len_of(Field::Month) > 0 || out.record_count() == 0 {
        return Ok(());
    }

    let cell = grid.at(spec.month_cell)?;
    if cell.is_empty() {
        return Err(BillsheetError::MissingReferenceCell(
            spec.month_cell.to_string(),
        ));
    }

    let month = if spec.parse_month {
        CellValue::Date(parse_year_month(cell)?)
    } else {
        cell.clone()
    };
    out.fill_if_empty(Field::Month, month);
    Ok(())
}

/// Parse a sheet-level "YYYY-MM" billing period.
fn parse_year_month(cell: &CellValue) -> BillsheetResult<NaiveDate> {
    match cell {
        CellValue::Date(date) => Ok(*date),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
                .map_err(|_| BillsheetError::MalformedMonth(trimmed.to_string()))
        }
        other => Err(BillsheetError::MalformedMonth(other.to_string())),
    }
}
