use thiserror::Error;

use crate::{Season, category::Category};

/// Failures while turning a season's pages into records.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("table '{category}' not found for season {season}")]
    MissingTable { category: Category, season: Season },

    #[error("standings table not found for season {season}")]
    MissingStandingsTable { season: Season },

    #[error("'{category}' table has no header row for season {season}")]
    MissingHeader { category: Category, season: Season },

    #[error(
        "'{category}' row {row} has {found} cells but the header has {expected} (season {season})"
    )]
    RaggedRow {
        category: Category,
        season: Season,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("no season links found on the index page")]
    NoSeasons,

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Failures of column-level operations on a record set.
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("column '{0}' not found")]
    MissingColumn(String),

    #[error("row has {found} cells but the table has {expected} columns")]
    RowLength { expected: usize, found: usize },
}
