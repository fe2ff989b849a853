use std::sync::LazyLock;

use log::info;
use scraper::{Html, Selector};

use crate::{
    Season, error::ScrapeError, scraping_context::ScrapingContext,
    text_manipulators::extract_text,
};

static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid link selector"));

/// Finds the most recent season listed on the league index page.
pub struct IndexScraper {
    pub url: String,
}

impl IndexScraper {
    pub fn new(context: &ScrapingContext) -> Self {
        Self {
            url: context.scraping_config.index_url(),
        }
    }

    pub async fn scrape(&self, context: &ScrapingContext) -> anyhow::Result<Season> {
        let html = context.request_client.fetch_url_body(&self.url).await?;
        let season = most_recent_season(&html)?;
        info!("Most recent season identified: {season}");
        Ok(season)
    }
}

/// The largest link text that is a plain number.
pub fn most_recent_season(html: &str) -> Result<Season, ScrapeError> {
    let document = Html::parse_document(html);
    document
        .select(&LINK)
        .map(extract_text)
        .filter(|text| !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|text| text.parse::<Season>().ok())
        .max()
        .ok_or(ScrapeError::NoSeasons)
}
