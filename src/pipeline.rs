use std::{
    fmt,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::info;

use crate::{
    Season,
    charts::render_charts,
    csv_export::{read_csv, write_csv},
    curate::curate_season,
    historic::summarize,
    index_scraper::IndexScraper,
    record_set::RecordSet,
    scraping_context::ScrapingContext,
    season_scraper::SeasonScraper,
    tables::PipelineTables,
};

pub const FILTERED_HISTORIC_FILE: &str = "filtered_reordered_stats.csv";
pub const AVERAGES_FILE: &str = "raw_avg.csv";
pub const GRAPHS_DIR: &str = "graphs";

/// Which seasons a scrape covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonSelection {
    /// Inclusive range.
    Range { first: Season, last: Season },
    /// The most recent season on the league index page.
    Latest,
}

impl fmt::Display for SeasonSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonSelection::Range { first, last } => write!(f, "{first}_{last}"),
            SeasonSelection::Latest => f.write_str("latest"),
        }
    }
}

/// Merged seasons, raw and curated.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedSeasons {
    pub combined: RecordSet,
    pub curated: RecordSet,
}

impl ScrapedSeasons {
    /// Stacks per-season assembled tables; each season is curated on its own
    /// since curated column names depend on the season's column positions.
    pub fn from_assembled(
        seasons: Vec<RecordSet>,
        tables: &PipelineTables,
    ) -> anyhow::Result<Self> {
        let curated = seasons
            .iter()
            .map(|season| curate_season(season, tables))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            combined: RecordSet::concat(seasons),
            curated: RecordSet::concat(curated),
        })
    }
}

pub fn combined_file(selection: SeasonSelection) -> String {
    format!("combined_stats_{selection}.csv")
}

pub fn curated_file(selection: SeasonSelection) -> String {
    format!("filtered_stats_{selection}.csv")
}

async fn resolve_seasons(
    context: &ScrapingContext,
    selection: SeasonSelection,
) -> anyhow::Result<Vec<Season>> {
    match selection {
        SeasonSelection::Range { first, last } => {
            anyhow::ensure!(first <= last, "first season {first} is after last season {last}");
            Ok((first..=last).collect())
        }
        SeasonSelection::Latest => {
            let season = IndexScraper::new(context).scrape(context).await?;
            Ok(vec![season])
        }
    }
}

/// Scrapes the selected seasons one after another. Any failure aborts.
pub async fn scrape_seasons(
    context: &ScrapingContext,
    tables: &PipelineTables,
    selection: SeasonSelection,
) -> anyhow::Result<ScrapedSeasons> {
    let mut assembled = Vec::new();
    for season in resolve_seasons(context, selection).await? {
        let scraper = SeasonScraper::new(context, season);
        let records = scraper
            .scrape(context, &tables.suffix_policy)
            .await
            .with_context(|| format!("failed to scrape season {season}"))?;
        assembled.push(records);
    }
    ScrapedSeasons::from_assembled(assembled, tables)
}

pub async fn run_scrape(
    context: &ScrapingContext,
    tables: &PipelineTables,
    selection: SeasonSelection,
    output_dir: &Path,
) -> anyhow::Result<()> {
    let scraped = scrape_seasons(context, tables, selection).await?;
    write_csv(&scraped.combined, output_dir.join(combined_file(selection)))?;
    write_csv(&scraped.curated, output_dir.join(curated_file(selection)))?;
    Ok(())
}

/// Filters, rounds and averages a curated multi-season file, then charts
/// each tracked metric against the smoothed reference.
pub fn run_historic(
    tables: &PipelineTables,
    input: &Path,
    smoothed: &Path,
    output_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let records = read_csv(input)?;
    let reference = read_csv(smoothed)?;
    info!(
        "Loaded {} rows from {} and the smoothed reference from {}",
        records.len(),
        input.display(),
        smoothed.display()
    );

    let summary = summarize(&records, tables)
        .with_context(|| format!("failed to summarize {}", input.display()))?;
    write_csv(&summary.filtered, output_dir.join(FILTERED_HISTORIC_FILE))?;
    write_csv(&summary.averages, output_dir.join(AVERAGES_FILE))?;
    render_charts(
        &output_dir.join(GRAPHS_DIR),
        &summary.averages,
        &reference,
        &tables.plotted_metrics,
    )
}
