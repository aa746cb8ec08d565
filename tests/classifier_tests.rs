//! Layout classification over synthetic probe grids.

mod common;

use billsheet::{classify, CellGrid, Layout};
use common::{e, n, t, type1_sheet, type2_sheet, type3_sheet, type5_sheet};

#[test]
fn test_each_layout_classifies_as_itself() {
    assert_eq!(classify(&type1_sheet()), Layout::Type1);
    assert_eq!(classify(&type2_sheet()), Layout::Type2);
    assert_eq!(classify(&type3_sheet()), Layout::Type3);
    assert_eq!(classify(&type5_sheet()), Layout::Type5);
}

#[test]
fn test_unrelated_sheet_is_unsupported() {
    let grid = CellGrid::new(vec![
        vec![t("Отчет"), n(2023.0)],
        vec![t("Листок"), t("данные")],
    ]);
    assert_eq!(classify(&grid), Layout::Unsupported);
}

#[test]
fn test_empty_grid_is_unsupported() {
    assert_eq!(classify(&CellGrid::new(Vec::new())), Layout::Unsupported);
}

#[test]
fn test_type1_beats_type5_when_both_probe_sets_hold() {
    // A4/C4 shared by both; J6 "Итого" and E6 "Начислено" both present.
    // Priority order picks Type 1.
    let grid = CellGrid::new(vec![
        vec![],
        vec![],
        vec![],
        vec![t("Месяц"), e(), t("Май 2023")],
        vec![],
        vec![
            e(),
            e(),
            e(),
            e(),
            t("Начислено"),
            e(),
            e(),
            e(),
            e(),
            t("Итого"),
        ],
    ]);
    assert_eq!(classify(&grid), Layout::Type1);
}

#[test]
fn test_month_value_missing_fails_the_probe() {
    // Type 2 shape but C5 is blank.
    let grid = CellGrid::new(vec![
        vec![],
        vec![],
        vec![],
        vec![],
        vec![t("Месяц"), e(), e()],
    ]);
    assert_eq!(classify(&grid), Layout::Unsupported);
}

#[cfg(not(feature = "layout-type4"))]
#[test]
fn test_reserved_type4_is_never_returned() {
    // A sheet shaped for the reserved family: Type-1 cell shape without the
    // J6 marker, singular reading label in the header row. With the branch
    // disabled it falls through every predicate.
    let grid = CellGrid::new(vec![
        vec![],
        vec![],
        vec![e(), e(), t("г. Тверь, ул. Советская, 1")],
        vec![t("Месяц"), e(), t("Май 2023")],
        vec![],
        vec![t("Лицевой счет"), t("Номер прибора учета"), t("Показание")],
    ]);
    assert_eq!(classify(&grid), Layout::Unsupported);
}
