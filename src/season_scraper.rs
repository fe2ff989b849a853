use log::info;
use scraper::Html;

use crate::{
    Season,
    category::SuffixPolicy,
    error::ScrapeError,
    merger::{left_join, merge_categories},
    record_set::{Cell, RecordSet},
    scraping_context::ScrapingContext,
    standings_scraper::{parse_standings, standings_records},
    table_locator::{extract_table, locate_tables},
};

pub const SEASON_COLUMN: &str = "Year";

/// Fetches and assembles one season's team-stats and standings pages.
#[derive(Debug)]
pub struct SeasonScraper {
    pub season: Season,
    pub stats_url: String,
    pub standings_url: String,
}

impl SeasonScraper {
    pub fn new(context: &ScrapingContext, season: Season) -> Self {
        Self {
            season,
            stats_url: context.scraping_config.stats_url(season),
            standings_url: context.scraping_config.standings_url(season),
        }
    }

    pub async fn scrape(
        &self,
        context: &ScrapingContext,
        policy: &SuffixPolicy,
    ) -> anyhow::Result<RecordSet> {
        info!("Scraping season {} from {}", self.season, self.stats_url);
        let stats_html = context.request_client.fetch_url_body(&self.stats_url).await?;
        let standings_html = context
            .request_client
            .fetch_url_body(&self.standings_url)
            .await?;
        let assembled = assemble_season(&stats_html, &standings_html, self.season, policy)?;
        info!("Season {}: {} teams", self.season, assembled.len());
        Ok(assembled)
    }
}

/// One row per team: every category merged, standings left-joined, and the
/// season stamped in [`SEASON_COLUMN`].
pub fn assemble_season(
    stats_html: &str,
    standings_html: &str,
    season: Season,
    policy: &SuffixPolicy,
) -> Result<RecordSet, ScrapeError> {
    let stats = Html::parse_document(stats_html);
    let located = locate_tables(&stats, season)?;
    let extracted = located
        .into_iter()
        .map(|(category, table)| {
            extract_table(table, category, season).map(|records| (category, records))
        })
        .collect::<Result<Vec<_>, ScrapeError>>()?;
    let merged = merge_categories(extracted, policy)?;

    let standings = parse_standings(&Html::parse_document(standings_html), season)?;
    let mut assembled = left_join(&merged, &standings_records(&standings)?)?;

    let stamp = vec![Cell::Number(f64::from(season)); assembled.len()];
    assembled.push_column(SEASON_COLUMN, stamp)?;
    Ok(assembled)
}
