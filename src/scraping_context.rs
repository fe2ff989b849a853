use crate::{config::ScrapingConfig, ratelimit::RateLimiter, requests::RequestClient};

pub struct ScrapingContext {
    pub scraping_config: ScrapingConfig,
    pub request_client: RequestClient,
}

impl ScrapingContext {
    pub fn new() -> anyhow::Result<Self> {
        Self::from_config(ScrapingConfig::new()?)
    }

    pub fn from_config(scraping_config: ScrapingConfig) -> anyhow::Result<Self> {
        let rate_limiter = RateLimiter::new(scraping_config.min_request_gap());
        let request_client = RequestClient::new(rate_limiter)?;
        Ok(ScrapingContext {
            scraping_config,
            request_client,
        })
    }
}
