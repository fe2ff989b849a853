use crate::{
    error::TableError,
    record_set::{Cell, RecordSet},
    tables::{Derivation, PipelineTables},
};

/// Narrows an assembled season to the curated columns and derives rate stats.
///
/// Every merged column is first prefixed with its 1-based position so that
/// repeated names (several `Avg_Returns`, for instance) can be told apart.
/// All curated columns after the first are coerced to numbers.
pub fn curate_season(
    assembled: &RecordSet,
    tables: &PipelineTables,
) -> Result<RecordSet, TableError> {
    let mut prefixed = assembled.clone();
    prefixed.rename_columns(|i, name| format!("{}{name}", i + 1));

    let sources: Vec<&str> = tables
        .curated_columns
        .iter()
        .map(|(source, _)| source.as_str())
        .collect();
    let mut curated = prefixed.select(&sources)?;
    curated.rename_columns(|i, _| tables.curated_columns[i].1.clone());

    for idx in 1..curated.width() {
        curated.map_column(idx, Cell::to_numeric);
    }

    for derived in &tables.derived_columns {
        let values = derive(&curated, &derived.derivation)?;
        curated.push_column(derived.name.clone(), values)?;
    }
    Ok(curated)
}

fn derive(records: &RecordSet, derivation: &Derivation) -> Result<Vec<Cell>, TableError> {
    match derivation {
        Derivation::Ratio {
            numerator,
            denominator,
        } => {
            let numerator = row_sums(records, numerator)?;
            let denominator = row_sums(records, denominator)?;
            Ok(numerator
                .into_iter()
                .zip(denominator)
                .map(|(n, d)| match (n, d) {
                    (Some(n), Some(d)) if d != 0.0 => Cell::from(Some(n / d)),
                    _ => Cell::Missing,
                })
                .collect())
        }
        Derivation::Difference {
            minuend,
            subtrahend,
        } => {
            let minuend = row_sums(records, std::slice::from_ref(minuend))?;
            let subtrahend = row_sums(records, std::slice::from_ref(subtrahend))?;
            Ok(minuend
                .into_iter()
                .zip(subtrahend)
                .map(|(a, b)| Cell::from(a.zip(b).map(|(a, b)| a - b)))
                .collect())
        }
    }
}

/// Per-row sum of `columns`; a missing operand makes the sum missing.
fn row_sums(records: &RecordSet, columns: &[String]) -> Result<Vec<Option<f64>>, TableError> {
    let indices = columns
        .iter()
        .map(|c| records.column_index(c))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records
        .rows()
        .iter()
        .map(|row| indices.iter().map(|&i| row[i].as_number()).sum())
        .collect())
}
