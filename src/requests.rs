use anyhow::Context;
use reqwest::{Client, ClientBuilder, Response};

use crate::ratelimit::RateLimiter;

const USER_AGENT: &str = concat!("rzb_stats/", env!("CARGO_PKG_VERSION"));

pub struct RequestClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RequestClient {
    pub fn new(rate_limiter: RateLimiter) -> anyhow::Result<Self> {
        let client = ClientBuilder::new().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Any non-success status is an error.
    pub async fn fetch_url_response(&self, url: &str) -> anyhow::Result<Response> {
        // Wait (non-blocking) until we're allowed to make a request according
        // to our self-imposed rate-limiting policy.
        self.rate_limiter.wait_until_ready().await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?;
        Ok(response)
    }

    pub async fn fetch_url_body(&self, url: &str) -> anyhow::Result<String> {
        let response = self.fetch_url_response(url).await?;
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read body of {url}"))?;
        Ok(body)
    }
}
