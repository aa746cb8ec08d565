//! Layout classification and the static layout registry.
//!
//! Five known utility-billing export families are recognized. Each family is
//! identified by a handful of probe cells and described by a static
//! [`LayoutSpec`]: where the header row sits, which reference cells hold
//! sheet-level metadata, and how canonical fields map onto that family's
//! literal header labels. Adding a family means adding a probe and a registry
//! entry; the row walk itself stays untouched.

use std::fmt;

use crate::error::{BillsheetError, BillsheetResult};
use crate::grid::CellGrid;
use crate::types::Field;

/// Probe label every family shares: the sheet-level month marker.
const MONTH_MARKER: &str = "Месяц";
/// Type-1 probe: grand-total header in column J.
const TOTAL_MARKER: &str = "Итого";
/// Type-5 probe: charged-amount header in column E.
const CHARGED_MARKER: &str = "Начислено";

/// A known sheet family, determined once per sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    Type1,
    Type2,
    Type3,
    /// Reserved family. Never produced by [`classify`] unless the
    /// `layout-type4` feature is enabled; its registry entry ships so the
    /// family can be activated without touching the extraction engine.
    Type4,
    Type5,
    Unsupported,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layout::Type1 => "type_1",
            Layout::Type2 => "type_2",
            Layout::Type3 => "type_3",
            Layout::Type4 => "type_4",
            Layout::Type5 => "type_5",
            Layout::Unsupported => "not supported",
        };
        write!(f, "{}", name)
    }
}

//==============================================================================
// Layout Registry
//==============================================================================

/// Static per-family configuration.
pub struct LayoutSpec {
    /// 0-based index of the header row; data rows start immediately after.
    pub header_row: usize,
    /// Reference cell holding the sheet-level billing month.
    pub month_cell: &'static str,
    /// Reference cell holding the sheet-level address, for families that do
    /// not carry an address column per row.
    pub address_cell: Option<&'static str>,
    /// Canonical field → literal header label under this family.
    pub columns: &'static [(Field, &'static str)],
    /// Header label of the tariff column (Type 5 control rows).
    pub tariff_label: Option<&'static str>,
    /// Row marker that introduces a carried device serial (Type 5).
    pub device_label: Option<&'static str>,
    /// Value in the account column that marks the grand-total row (Type 3).
    pub total_marker: Option<&'static str>,
    /// Sheet-level month cell is a bare "YYYY-MM" string and must be parsed.
    pub parse_month: bool,
}

impl LayoutSpec {
    /// Literal header label for a canonical field, if this family maps it.
    pub fn label_for(&self, field: Field) -> Option<&'static str> {
        self.columns
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, label)| *label)
    }
}

const STANDARD_COLUMNS: &[(Field, &str)] = &[
    (Field::AccountNumber, "Лицевой счет"),
    (Field::SerialNumber, "Номер прибора учета"),
    (Field::Value, "Показания"),
    (Field::Month, "Месяц начисления"),
    (Field::Address, "Адрес"),
    (Field::RoomNumber, "Номер квартиры"),
    (Field::CalcValue, "Начислено"),
    (Field::Credit, "Задолженность"),
    (Field::Total, "Итого"),
];

/// Type 4 differs from the standard mapping only in the reading label.
#[cfg_attr(not(feature = "layout-type4"), allow(dead_code))]
const TYPE4_COLUMNS: &[(Field, &str)] = &[
    (Field::AccountNumber, "Лицевой счет"),
    (Field::SerialNumber, "Номер прибора учета"),
    (Field::Value, "Показание"),
    (Field::Month, "Месяц начисления"),
    (Field::Address, "Адрес"),
    (Field::RoomNumber, "Номер квартиры"),
    (Field::CalcValue, "Начислено"),
    (Field::Credit, "Задолженность"),
    (Field::Total, "Итого"),
];

static TYPE1_SPEC: LayoutSpec = LayoutSpec {
    header_row: 5,
    month_cell: "C4",
    address_cell: Some("C3"),
    columns: STANDARD_COLUMNS,
    tariff_label: None,
    device_label: None,
    total_marker: None,
    parse_month: false,
};

static TYPE2_SPEC: LayoutSpec = LayoutSpec {
    header_row: 6,
    month_cell: "C5",
    address_cell: Some("C4"),
    columns: STANDARD_COLUMNS,
    tariff_label: None,
    device_label: None,
    total_marker: None,
    parse_month: false,
};

static TYPE3_SPEC: LayoutSpec = LayoutSpec {
    header_row: 5,
    month_cell: "D4",
    address_cell: None,
    columns: STANDARD_COLUMNS,
    tariff_label: None,
    device_label: None,
    total_marker: Some(TOTAL_MARKER),
    parse_month: false,
};

#[cfg_attr(not(feature = "layout-type4"), allow(dead_code))]
static TYPE4_SPEC: LayoutSpec = LayoutSpec {
    header_row: 5,
    month_cell: "C4",
    address_cell: Some("C3"),
    columns: TYPE4_COLUMNS,
    tariff_label: None,
    device_label: None,
    total_marker: None,
    parse_month: false,
};

static TYPE5_SPEC: LayoutSpec = LayoutSpec {
    header_row: 5,
    month_cell: "C4",
    address_cell: Some("C3"),
    columns: STANDARD_COLUMNS,
    tariff_label: Some("Тариф"),
    device_label: Some("Прибор учета"),
    total_marker: None,
    parse_month: true,
};

/// Registry lookup. Asking for the reserved or unsupported entry is a
/// contract violation on the caller's side, not a data error.
pub fn spec_for(layout: Layout) -> BillsheetResult<&'static LayoutSpec> {
    match layout {
        Layout::Type1 => Ok(&TYPE1_SPEC),
        Layout::Type2 => Ok(&TYPE2_SPEC),
        Layout::Type3 => Ok(&TYPE3_SPEC),
        #[cfg(feature = "layout-type4")]
        Layout::Type4 => Ok(&TYPE4_SPEC),
        #[cfg(not(feature = "layout-type4"))]
        Layout::Type4 => Err(BillsheetError::ReservedLayout(layout)),
        Layout::Type5 => Ok(&TYPE5_SPEC),
        Layout::Unsupported => Err(BillsheetError::ReservedLayout(layout)),
    }
}

//==============================================================================
// Layout Classifier
//==============================================================================

/// Determine which family a sheet belongs to.
///
/// Pure function of the probe cells, checked in fixed priority order; the
/// first matching predicate wins. Returns [`Layout::Unsupported`] when none
/// match — callers skip-and-report, they do not crash.
pub fn classify(grid: &CellGrid) -> Layout {
    if probe_type1(grid) {
        return Layout::Type1;
    }
    if probe_type2(grid) {
        return Layout::Type2;
    }
    if probe_type3(grid) {
        return Layout::Type3;
    }
    #[cfg(feature = "layout-type4")]
    if probe_type4(grid) {
        return Layout::Type4;
    }
    if probe_type5(grid) {
        return Layout::Type5;
    }
    Layout::Unsupported
}

fn probe_type1(grid: &CellGrid) -> bool {
    // A4 == "Месяц", J6 == "Итого", C4 non-empty
    grid.cell(3, 0).matches_label(MONTH_MARKER)
        && grid.cell(5, 9).matches_label(TOTAL_MARKER)
        && !grid.cell(3, 2).is_empty()
}

fn probe_type2(grid: &CellGrid) -> bool {
    // A5 == "Месяц", C5 non-empty
    grid.cell(4, 0).matches_label(MONTH_MARKER) && !grid.cell(4, 2).is_empty()
}

fn probe_type3(grid: &CellGrid) -> bool {
    // C4 == "Месяц", D4 non-empty
    grid.cell(3, 2).matches_label(MONTH_MARKER) && !grid.cell(3, 3).is_empty()
}

/// Activation hook for the reserved family: the Type-1 cell shape with the
/// singular reading label in the header row.
#[cfg(feature = "layout-type4")]
fn probe_type4(grid: &CellGrid) -> bool {
    grid.cell(3, 0).matches_label(MONTH_MARKER)
        && !grid.cell(3, 2).is_empty()
        && grid
            .row(TYPE4_SPEC.header_row)
            .iter()
            .any(|c| c.matches_label("Показание"))
}

fn probe_type5(grid: &CellGrid) -> bool {
    // A4 == "Месяц", E6 == "Начислено", C4 non-empty
    grid.cell(3, 0).matches_label(MONTH_MARKER)
        && grid.cell(5, 4).matches_label(CHARGED_MARKER)
        && !grid.cell(3, 2).is_empty()
}
