mod text_manipulators;

pub mod category;
pub mod charts;
pub mod config;
pub mod csv_export;
pub mod curate;
pub mod error;
pub mod historic;
pub mod index_scraper;
pub mod merger;
pub mod pipeline;
pub mod ratelimit;
pub mod record_set;
pub mod requests;
pub mod rounding;
pub mod scraping_context;
pub mod season_scraper;
pub mod standings_scraper;
pub mod table_locator;
pub mod tables;

/// A league season, e.g. 2063.
pub type Season = u32;

pub use category::{Category, SuffixPolicy, SuffixRule};
pub use error::{ScrapeError, TableError};
pub use pipeline::SeasonSelection;
pub use record_set::{Cell, RecordSet};
pub use scraping_context::ScrapingContext;
pub use season_scraper::{SeasonScraper, assemble_season};
pub use tables::PipelineTables;
pub use text_manipulators::strip_trailing_annotation;
