use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::{
    Season,
    error::{ScrapeError, TableError},
    record_set::{Cell, RecordSet},
    rounding::round_to,
    table_locator::{DATA_CELL, ROW, STANDINGS_TABLE_SELECTOR, TEAM_COLUMN},
    text_manipulators::{extract_text, strip_trailing_annotation},
};

/// Pythagorean exponent tuned for this league.
pub const PYTHAG_EXPONENT: f64 = 2.37;
pub const GAMES_PER_SEASON: f64 = 16.0;

/// Cells in a team row of the standings table, in page order:
/// Team, W, L, T, Pct, PF, PA, Conf, Div.
const TEAM_ROW_CELLS: usize = 9;

/// Columns the standings contribute to a season's records.
pub const STANDINGS_COLUMNS: [&str; 8] = [TEAM_COLUMN, "W", "L", "T", "PF", "PA", "Wins", "pythag_wins"];

static STANDINGS_TABLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(STANDINGS_TABLE_SELECTOR).expect("valid standings table selector")
});

#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub team: String,
    pub w: Option<f64>,
    pub l: Option<f64>,
    pub t: Option<f64>,
    pub pf: Option<f64>,
    pub pa: Option<f64>,
}

impl Standing {
    /// Ties count as half a win.
    pub fn wins(&self) -> Option<f64> {
        Some(self.w? + self.t? / 2.0)
    }

    pub fn pythag_wins(&self) -> Option<f64> {
        pythag_wins(self.pf?, self.pa?)
    }
}

/// Expected wins over a season from points for and against, to one decimal.
pub fn pythag_wins(points_for: f64, points_against: f64) -> Option<f64> {
    let pf = points_for.powf(PYTHAG_EXPONENT);
    let pa = points_against.powf(PYTHAG_EXPONENT);
    let denominator = pf + pa;
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    Some(round_to(pf / denominator * GAMES_PER_SEASON, 1))
}

fn numeric(raw: &str) -> Option<f64> {
    Cell::text(raw).as_number()
}

/// Reads every team row from a season's standings page.
pub fn parse_standings(document: &Html, season: Season) -> Result<Vec<Standing>, ScrapeError> {
    let table = document
        .select(&STANDINGS_TABLE)
        .next()
        .ok_or(ScrapeError::MissingStandingsTable { season })?;

    let standings = table
        .select(&ROW)
        .skip(1)
        .filter_map(|row| {
            let cells: Vec<String> = row.select(&DATA_CELL).map(extract_text).collect();
            if cells.len() != TEAM_ROW_CELLS {
                return None;
            }
            Some(Standing {
                team: strip_trailing_annotation(&cells[0]),
                w: numeric(&cells[1]),
                l: numeric(&cells[2]),
                t: numeric(&cells[3]),
                pf: numeric(&cells[5]),
                pa: numeric(&cells[6]),
            })
        })
        .collect();
    Ok(standings)
}

/// Standings as records with the derived `Wins` and `pythag_wins` columns.
pub fn standings_records(standings: &[Standing]) -> Result<RecordSet, TableError> {
    let mut records = RecordSet::new(STANDINGS_COLUMNS.iter().map(|c| c.to_string()).collect());
    for s in standings {
        let row = vec![
            Cell::text(&s.team),
            Cell::from(s.w),
            Cell::from(s.l),
            Cell::from(s.t),
            Cell::from(s.pf),
            Cell::from(s.pa),
            Cell::from(s.wins()),
            Cell::from(s.pythag_wins()),
        ];
        records.push_row(row)?;
    }
    Ok(records)
}
