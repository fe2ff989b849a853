use serde::{Deserialize, Serialize};

use crate::record_set::{Cell, RecordSet};

/// Rounds to `decimals` places, ties to even on the scaled value.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}

/// Decimal places per column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoundingTable(pub Vec<(String, u32)>);

impl RoundingTable {
    pub fn decimals(&self, column: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, decimals)| *decimals)
    }

    /// Rounds the numeric cells of every listed column present in `records`.
    /// Unlisted columns, text and missing cells are left alone.
    pub fn apply(&self, records: &mut RecordSet) {
        let targets: Vec<(usize, u32)> = records
            .columns()
            .iter()
            .enumerate()
            .filter_map(|(i, name)| self.decimals(name).map(|d| (i, d)))
            .collect();
        for (idx, decimals) in targets {
            records.map_column(idx, |cell| match cell {
                Cell::Number(n) => Cell::Number(round_to(*n, decimals)),
                other => other.clone(),
            });
        }
    }
}
