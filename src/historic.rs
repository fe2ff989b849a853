use std::collections::BTreeMap;

use log::{info, warn};

use crate::{
    error::TableError,
    record_set::{Cell, RecordSet},
    tables::PipelineTables,
};

pub const TEAM_COLUMN: &str = "team";
pub const WINS_COLUMN: &str = "wins";
/// Aggregate rows in the raw export have this in their team name.
const LEAGUE_MARKER: &str = "League";
/// Historic columns before this index identify a row and aren't averaged.
const FIRST_AVERAGED_COLUMN: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricSummary {
    /// Team rows with the historic columns, rounded.
    pub filtered: RecordSet,
    /// One row per whole win count, rounded.
    pub averages: RecordSet,
}

pub fn summarize(input: &RecordSet, tables: &PipelineTables) -> Result<HistoricSummary, TableError> {
    let mut teams = input.clone();
    drop_league_rows(&mut teams)?;
    let mut filtered = select_historic_columns(&teams, &tables.historic_columns)?;

    // Bucket on unrounded wins so tied teams can't round into a bucket.
    let mut averages = average_by_wins(&filtered, &tables.historic_columns[FIRST_AVERAGED_COLUMN..])?;
    tables.rounding.apply(&mut averages);
    tables.rounding.apply(&mut filtered);
    info!(
        "Historic summary: {} team rows, {} win buckets",
        filtered.len(),
        averages.len()
    );
    Ok(HistoricSummary { filtered, averages })
}

/// Removes rows whose team name contains "League".
pub fn drop_league_rows(records: &mut RecordSet) -> Result<(), TableError> {
    let team = records.column_index(TEAM_COLUMN)?;
    records.retain_rows(|row| !row[team].to_string().contains(LEAGUE_MARKER));
    Ok(())
}

/// Keeps `columns` in order. The team and wins columns are required; any
/// other absent column is filled with missing cells.
pub fn select_historic_columns(
    records: &RecordSet,
    columns: &[String],
) -> Result<RecordSet, TableError> {
    records.column_index(TEAM_COLUMN)?;
    records.column_index(WINS_COLUMN)?;

    let mut padded = records.clone();
    for name in columns {
        if !padded.has_column(name) {
            warn!("column '{name}' not in historic input; filling with missing values");
            let blanks = vec![Cell::Missing; padded.len()];
            padded.push_column(name.clone(), blanks)?;
        }
    }
    padded.select(columns)
}

/// Mean of each of `columns` per whole-number win count, ascending.
///
/// Teams with fractional (tied) or missing wins are left out. Missing cells
/// are skipped; a bucket with no values for a column gets a missing mean.
pub fn average_by_wins(records: &RecordSet, columns: &[String]) -> Result<RecordSet, TableError> {
    let wins = records.column_index(WINS_COLUMN)?;
    let averaged: Vec<(&String, usize)> = columns
        .iter()
        .filter(|name| name.as_str() != WINS_COLUMN)
        .map(|name| records.column_index(name).map(|idx| (name, idx)))
        .collect::<Result<_, TableError>>()?;

    let mut buckets: BTreeMap<i64, Vec<&Vec<Cell>>> = BTreeMap::new();
    for row in records.rows() {
        match row[wins].as_number() {
            Some(w) if w.fract() == 0.0 => buckets.entry(w as i64).or_default().push(row),
            _ => {}
        }
    }

    let mut header = vec![WINS_COLUMN.to_string()];
    header.extend(averaged.iter().map(|(name, _)| name.to_string()));
    let mut out = RecordSet::new(header);
    for (win_count, rows) in buckets {
        let mut line = vec![Cell::Number(win_count as f64)];
        line.extend(averaged.iter().map(|&(_, idx)| mean(rows.iter().map(|row| &row[idx]))));
        out.push_row(line)?;
    }
    Ok(out)
}

fn mean<'a>(cells: impl Iterator<Item = &'a Cell>) -> Cell {
    let (sum, count) = cells
        .filter_map(Cell::as_number)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        Cell::Missing
    } else {
        Cell::Number(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounding::RoundingTable;
    use pretty_assertions::assert_eq;

    fn records(columns: &[&str], rows: &[&[&str]]) -> RecordSet {
        let mut out = RecordSet::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            out.push_row(row.iter().map(|c| Cell::parse(c)).collect())
                .unwrap();
        }
        out
    }

    fn small_tables() -> PipelineTables {
        PipelineTables {
            historic_columns: ["team", "year", "pythag_wins", "wins", "ypc"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rounding: RoundingTable(vec![
                ("pythag_wins".into(), 1),
                ("wins".into(), 0),
                ("ypc".into(), 2),
            ]),
            ..PipelineTables::default()
        }
    }

    #[test]
    fn league_rows_are_dropped() {
        let mut r = records(
            &["team", "wins"],
            &[&["Boston", "9"], &["League Average", "8"], &["AFC League", "8"]],
        );
        drop_league_rows(&mut r).unwrap();
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn tied_teams_are_not_averaged() {
        let input = records(
            &["team", "year", "pythag_wins", "wins", "ypc", "extra"],
            &[
                &["A", "2050", "9.1", "9", "4.0", "x"],
                &["B", "2050", "8.9", "9", "5.0", "y"],
                &["C", "2050", "8.4", "8.5", "100", "z"],
                &["D", "2051", "3.0", "3", "", "w"],
            ],
        );
        let summary = summarize(&input, &small_tables()).unwrap();

        assert_eq!(summary.filtered.columns(), &["team", "year", "pythag_wins", "wins", "ypc"]);
        assert_eq!(summary.filtered.len(), 4);
        assert_eq!(summary.averages.columns(), &["wins", "pythag_wins", "ypc"]);
        assert_eq!(
            summary.averages.rows(),
            &[
                vec![Cell::Number(3.0), Cell::Number(3.0), Cell::Missing],
                vec![Cell::Number(9.0), Cell::Number(9.0), Cell::Number(4.5)],
            ]
        );
    }

    #[test]
    fn missing_metric_columns_are_padded() {
        let input = records(&["team", "year", "wins", "pythag_wins"], &[&["A", "2050", "9", "9.0"]]);
        let summary = summarize(&input, &small_tables()).unwrap();
        assert_eq!(summary.filtered.rows()[0][4], Cell::Missing);
    }

    #[test]
    fn wins_column_is_required() {
        let input = records(&["team", "year"], &[&["A", "2050"]]);
        assert_eq!(
            summarize(&input, &small_tables()).unwrap_err(),
            TableError::MissingColumn("wins".into())
        );
    }
}
