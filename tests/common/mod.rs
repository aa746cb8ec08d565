//! Synthetic sheet builders shared by the integration tests.
//!
//! Each builder produces the smallest grid that satisfies exactly one
//! layout's probe predicate, with a couple of realistic data rows.

#![allow(dead_code)] // not every test crate uses every builder

use billsheet::{CellGrid, CellValue};

pub fn t(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

pub fn n(v: f64) -> CellValue {
    CellValue::Number(v)
}

pub fn e() -> CellValue {
    CellValue::Empty
}

/// Type 1: month marker in A4, month value in C4, address in C3, grand-total
/// header in J6. Header row carries no address column, so the assembler must
/// fall back to the C3 reference cell.
pub fn type1_sheet() -> CellGrid {
    CellGrid::new(vec![
        vec![],
        vec![],
        vec![e(), e(), t("г. Тверь, ул. Советская, 1")],
        vec![t("Месяц"), e(), t("Май 2023")],
        vec![],
        vec![
            t("Лицевой счет"),
            t("Номер прибора учета"),
            t("Показания"),
            t("Номер квартиры"),
            t("Начислено"),
            t("Задолженность"),
            e(),
            e(),
            e(),
            t("Итого"),
        ],
        vec![
            t("AC-100"),
            t("DEV-1"),
            n(42.0),
            t("12"),
            n(100.0),
            n(5.0),
            e(),
            e(),
            e(),
            n(115.0),
        ],
        vec![
            t("AC-200"),
            t("DEV-2"),
            n(36.0),
            t("7"),
            n(90.0),
            n(0.0),
            e(),
            e(),
            e(),
            n(90.0),
        ],
    ])
}

/// Type 2: month marker in A5, month value in C5, address in C4. The header
/// row carries both a per-row month and a per-row address column, so neither
/// sheet-level fallback fires.
pub fn type2_sheet() -> CellGrid {
    CellGrid::new(vec![
        vec![],
        vec![],
        vec![],
        vec![e(), e(), t("ул. Ленина, 5")],
        vec![t("Месяц"), e(), t("Июнь 2023")],
        vec![],
        vec![
            t("Лицевой счет"),
            t("Номер прибора учета"),
            t("Показания"),
            t("Месяц начисления"),
            t("Адрес"),
            t("Номер квартиры"),
            t("Начислено"),
            t("Задолженность"),
            t("Итого"),
        ],
        vec![
            t("AC-300"),
            t("DEV-3"),
            n(10.0),
            t("2023-06"),
            t("ул. Ленина, 5"),
            t("3"),
            n(50.0),
            n(0.0),
            n(50.0),
        ],
    ])
}

/// Type 3: month marker in C4, month value in D4, no address reference cell
/// (address is a per-row column). Ends with a grand-total control row marked
/// "Итого" in the account column.
pub fn type3_sheet() -> CellGrid {
    CellGrid::new(vec![
        vec![],
        vec![],
        vec![],
        vec![e(), e(), t("Месяц"), t("Июль 2023")],
        vec![],
        vec![
            t("Лицевой счет"),
            t("Номер прибора учета"),
            t("Показания"),
            t("Адрес"),
            t("Номер квартиры"),
            t("Начислено"),
            t("Задолженность"),
            t("Итого"),
        ],
        vec![
            t("AC-400"),
            t("DEV-4"),
            n(20.0),
            t("пр. Победы, 2"),
            t("1"),
            n(70.0),
            n(3.0),
            n(73.0),
        ],
        vec![
            t("AC-500"),
            t("DEV-5"),
            n(25.0),
            t("пр. Победы, 2"),
            t("2"),
            n(80.0),
            n(0.0),
            n(80.0),
        ],
        vec![
            t("Итого"),
            e(),
            n(45.0),
            e(),
            e(),
            n(150.0),
            n(3.0),
            n(153.0),
        ],
    ])
}

/// Type 5: month marker in A4, a "YYYY-MM" month value in C4, address in C3,
/// charged-amount header in E6. Identifiers are carried context rows; arrears
/// and totals arrive as aggregate control rows after each device block.
///
/// One account, one device, one reading — the minimal end-to-end shape.
pub fn type5_sheet() -> CellGrid {
    CellGrid::new(vec![
        vec![],
        vec![],
        vec![e(), e(), t("пр. Мира, 10")],
        vec![t("Месяц"), e(), t("2023-05")],
        vec![],
        vec![t("Услуга"), t("Ед."), t("Тариф"), t("Показания"), t("Начислено")],
        vec![t("Лицевой счет"), t("AC-100")],
        vec![t("Прибор учета"), t("DEV-7")],
        vec![t("Холодная вода"), t("м3"), n(25.5), n(42.0), n(1071.0)],
        vec![e(), e(), t("Задолженность"), e(), n(15.0)],
        vec![e(), e(), t("Итого"), e(), n(60.0)],
    ])
}

/// Type 5 with two accounts; the first account has two device blocks so the
/// back-fill has more than one record to reconcile.
pub fn type5_multi_account_sheet() -> CellGrid {
    CellGrid::new(vec![
        vec![],
        vec![],
        vec![e(), e(), t("пр. Мира, 10")],
        vec![t("Месяц"), e(), t("2023-05")],
        vec![],
        vec![t("Услуга"), t("Ед."), t("Тариф"), t("Показания"), t("Начислено")],
        vec![t("Лицевой счет"), t("AC-1")],
        vec![t("Прибор учета"), t("DEV-1")],
        vec![t("Холодная вода"), t("м3"), n(25.5), n(10.0), n(100.0)],
        vec![t("Прибор учета"), t("DEV-2")],
        vec![t("Горячая вода"), t("м3"), n(51.0), n(20.0), n(200.0)],
        vec![e(), e(), t("Задолженность"), e(), n(15.0)],
        vec![e(), e(), t("Итого"), e(), n(375.0)],
        vec![t("Лицевой счет"), t("AC-2")],
        vec![t("Прибор учета"), t("DEV-3")],
        vec![t("Холодная вода"), t("м3"), n(25.5), n(30.0), n(300.0)],
        vec![e(), e(), t("Задолженность"), e(), n(7.0)],
        vec![e(), e(), t("Итого"), e(), n(307.0)],
    ])
}
