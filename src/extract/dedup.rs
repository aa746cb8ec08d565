//! Duplicate-row collapsing.
//!
//! Source sheets occasionally repeat a device/account row; emitting both
//! would double-count the reading or the charge. Records are grouped by
//! every non-measure field and the measure is summed within each group.
//! First-seen group order is preserved.

use std::collections::HashMap;

use crate::types::{AccountBillRecord, MeteringRecord};

pub fn collapse_metering(records: Vec<MeteringRecord>) -> Vec<MeteringRecord> {
    let mut out: Vec<MeteringRecord> = Vec::new();
    let mut index: HashMap<(String, String, String), usize> = HashMap::new();

    for record in records {
        let key = (
            record.account_number.clone(),
            record.serial_number.clone(),
            record.month.clone(),
        );
        match index.get(&key) {
            Some(&i) => out[i].value += record.value,
            None => {
                index.insert(key, out.len());
                out.push(record);
            }
        }
    }
    out
}

pub fn collapse_bills(records: Vec<AccountBillRecord>) -> Vec<AccountBillRecord> {
    // Amounts other than calc_value are identity fields here: two rows with
    // different arrears or totals are different records, not duplicates.
    type Key = (String, String, Option<String>, String, u64, u64);

    let mut out: Vec<AccountBillRecord> = Vec::new();
    let mut index: HashMap<Key, usize> = HashMap::new();

    for record in records {
        let key = (
            record.account_number.clone(),
            record.address.clone(),
            record.room_number.clone(),
            record.month.clone(),
            record.credit.to_bits(),
            record.total.to_bits(),
        );
        match index.get(&key) {
            Some(&i) => out[i].calc_value += record.calc_value,
            None => {
                index.insert(key, out.len());
                out.push(record);
            }
        }
    }
    out
}
