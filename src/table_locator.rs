use std::{collections::BTreeMap, sync::LazyLock};

use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::{
    Season,
    category::Category,
    error::ScrapeError,
    record_set::{Cell, RecordSet},
    text_manipulators::extract_text,
};

/// Data tables carry a maroon border; layout tables don't.
pub const STATS_TABLE_SELECTOR: &str = r##"table[bordercolor="#800000"][width="95%"]"##;
pub const STANDINGS_TABLE_SELECTOR: &str = r##"table[bordercolor="#800000"][width="80%"]"##;

pub const TEAM_COLUMN: &str = "Team";

static STATS_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(STATS_TABLE_SELECTOR).expect("valid stats table selector"));
pub(crate) static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("valid row selector"));
pub(crate) static HEADER_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("valid header cell selector"));
pub(crate) static DATA_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("valid data cell selector"));

/// Finds the table of every category on a team-stats page.
///
/// Tables are identified by the text of the first header cell in their first
/// row. Unknown labels are ignored; any category left without a table fails
/// the whole season.
pub fn locate_tables(
    document: &Html,
    season: Season,
) -> Result<BTreeMap<Category, ElementRef<'_>>, ScrapeError> {
    let mut found = BTreeMap::new();
    for table in document.select(&STATS_TABLE) {
        let Some(label) = first_header_text(table) else {
            debug!("season {season}: skipping data table without a header cell");
            continue;
        };
        match Category::from_label(&label) {
            Some(category) => {
                found.insert(category, table);
            }
            None => debug!("season {season}: ignoring table '{label}'"),
        }
    }

    if let Some(&category) = Category::ALL.iter().find(|c| !found.contains_key(*c)) {
        return Err(ScrapeError::MissingTable { category, season });
    }
    Ok(found)
}

fn first_header_text(table: ElementRef) -> Option<String> {
    let first_row = table.select(&ROW).next()?;
    let first_header = first_row.select(&HEADER_CELL).next()?;
    Some(extract_text(first_header))
}

/// Turns a located table into a record set keyed by [`TEAM_COLUMN`].
pub fn extract_table(
    table: ElementRef,
    category: Category,
    season: Season,
) -> Result<RecordSet, ScrapeError> {
    let mut rows = table.select(&ROW);
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.select(&HEADER_CELL).map(extract_text).collect())
        .unwrap_or_default();
    if headers.is_empty() {
        return Err(ScrapeError::MissingHeader { category, season });
    }

    let mut records = RecordSet::new(headers);
    for (i, row) in rows.enumerate() {
        let cells: Vec<Cell> = row
            .select(&DATA_CELL)
            .map(|cell| Cell::Text(extract_text(cell)))
            .collect();
        if cells.len() != records.width() {
            return Err(ScrapeError::RaggedRow {
                category,
                season,
                row: i + 1,
                expected: records.width(),
                found: cells.len(),
            });
        }
        records.push_row(cells)?;
    }
    records.rename_column(0, TEAM_COLUMN);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;

    fn table(label: &str, team_header: &str) -> String {
        format!(
            r##"<table bordercolor="#800000" width="95%">
                <tr><th>{label}</th></tr>
                <tr><th>{team_header}</th><th>Att</th><th>Yards</th></tr>
                <tr><td> Boston </td><td>10</td><td>45</td></tr>
            </table>"##
        )
    }

    fn page(tables: &[String]) -> Html {
        Html::parse_document(&format!("<html><body>{}</body></html>", tables.join("\n")))
    }

    fn simple_table(label: &str) -> String {
        format!(
            r##"<table bordercolor="#800000" width="95%">
                <tr><th>{label}</th><th>Att</th></tr>
                <tr><td>Boston</td><td>1</td></tr>
            </table>"##
        )
    }

    #[test]
    fn locates_every_category() {
        let tables: Vec<String> = Category::ALL.iter().map(|c| simple_table(c.label())).collect();
        let doc = page(&tables);
        let found = locate_tables(&doc, 2050).unwrap();
        assert_eq!(found.len(), 16);
    }

    #[test]
    fn ignores_layout_tables_and_unknown_labels() {
        let mut tables: Vec<String> = Category::ALL.iter().map(|c| simple_table(c.label())).collect();
        tables.push(simple_table("Punting"));
        tables.push(r#"<table width="95%"><tr><th>Kicking</th></tr></table>"#.to_string());
        let doc = page(&tables);
        assert_eq!(locate_tables(&doc, 2050).unwrap().len(), 16);
    }

    #[test]
    fn missing_category_names_label_and_season() {
        let tables: Vec<String> = Category::ALL
            .iter()
            .filter(|c| **c != Category::OppKicking)
            .map(|c| simple_table(c.label()))
            .collect();
        let doc = page(&tables);
        let err = locate_tables(&doc, 2061).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MissingTable {
                category: Category::OppKicking,
                season: 2061
            }
        ));
        assert_eq!(err.to_string(), "table 'Opp. Kicking' not found for season 2061");
    }

    #[test]
    fn extracts_headers_and_trimmed_cells() {
        let doc = page(&[simple_table("Kicking")]);
        let el = doc.select(&STATS_TABLE).next().unwrap();
        let records = extract_table(el, Category::Kicking, 2050).unwrap();
        assert_eq!(records.columns(), &["Team", "Att"]);
        assert_eq!(records.rows()[0], vec![Cell::text("Boston"), Cell::text("1")]);
    }

    #[test]
    fn ragged_rows_are_reported() {
        let html = r##"<table bordercolor="#800000" width="95%">
            <tr><th>Kicking</th><th>FGM</th><th>FGA</th></tr>
            <tr><td>Boston</td><td>1</td><td>2</td></tr>
            <tr><td>Austin</td></tr>
        </table>"##;
        let doc = page(&[html.to_string()]);
        let el = doc.select(&STATS_TABLE).next().unwrap();
        let err = extract_table(el, Category::Kicking, 2050).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::RaggedRow {
                row: 2,
                expected: 3,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn two_row_header_surfaces_as_a_defect() {
        // A label row above the real header leaves a row of <th> only.
        let doc = page(&[table("Rushing Offense", "Team")]);
        let el = doc.select(&STATS_TABLE).next().unwrap();
        assert!(extract_table(el, Category::RushingOffense, 2050).is_err());
    }
}
