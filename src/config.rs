use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

use crate::Season;

pub const DEFAULT_BASE_URL: &str = "https://therzb.com/RZB/leaguehtml";
const DEFAULT_MIN_REQUEST_GAP_MS: u64 = 250;
const ENV_PREFIX: &str = "RZB_";

/// The env vars read for scraping, all prefixed with `RZB_`.
#[derive(Debug, Deserialize)]
pub struct ScrapingEnv {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_min_request_gap_ms")]
    min_request_gap_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_min_request_gap_ms() -> u64 {
    DEFAULT_MIN_REQUEST_GAP_MS
}

#[derive(Debug, Clone)]
pub struct ScrapingConfig {
    base_url: String,
    min_request_gap: Duration,
}

impl ScrapingConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        Ok(Self::with_base_url(&scraping_env.base_url)
            .with_min_request_gap(Duration::from_millis(scraping_env.min_request_gap_ms)))
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            min_request_gap: Duration::from_millis(DEFAULT_MIN_REQUEST_GAP_MS),
        }
    }

    pub fn with_min_request_gap(mut self, gap: Duration) -> Self {
        self.min_request_gap = gap;
        self
    }

    pub fn min_request_gap(&self) -> Duration {
        self.min_request_gap
    }

    pub fn stats_url(&self, season: Season) -> String {
        format!("{}/{season}teamstats.html", self.base_url)
    }

    pub fn standings_url(&self, season: Season) -> String {
        format!("{}/{season}standings.html", self.base_url)
    }

    pub fn index_url(&self) -> String {
        format!("{}/index.html", self.base_url)
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Self>()
            .context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_urls() {
        let config = ScrapingConfig::with_base_url("https://example.test/league/");
        assert_eq!(
            config.stats_url(2063),
            "https://example.test/league/2063teamstats.html"
        );
        assert_eq!(
            config.standings_url(2045),
            "https://example.test/league/2045standings.html"
        );
        assert_eq!(config.index_url(), "https://example.test/league/index.html");
    }

    #[test]
    fn env_defaults_apply_when_unset() {
        let env: ScrapingEnv =
            envy::prefixed("RZB_TEST_UNSET_").from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(env.base_url, DEFAULT_BASE_URL);
        assert_eq!(env.min_request_gap_ms, 250);
    }

    #[test]
    fn env_values_override_defaults() {
        let vars = vec![
            ("RZB_BASE_URL".to_string(), "http://localhost:8000".to_string()),
            ("RZB_MIN_REQUEST_GAP_MS".to_string(), "0".to_string()),
        ];
        let env: ScrapingEnv = envy::prefixed(ENV_PREFIX).from_iter(vars).unwrap();
        assert_eq!(env.base_url, "http://localhost:8000");
        assert_eq!(env.min_request_gap_ms, 0);
    }
}
