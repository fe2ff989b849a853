use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::{QuantaClock, QuantaInstant},
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
};
use nonzero_ext::nonzero;
use std::{num::NonZeroU32, time::Duration};

// Used when no minimum gap is configured.
const UNTHROTTLED_REQ_PER_SEC: NonZeroU32 = nonzero!(1000u32);

type SpecificGovernorRateLimiter =
    GovernorRateLimiter<NotKeyed, InMemoryState, QuantaClock, NoOpMiddleware<QuantaInstant>>;

/// Keeps consecutive requests to the league site at least `min_gap` apart.
pub struct RateLimiter {
    between_requests: SpecificGovernorRateLimiter,
}

impl RateLimiter {
    pub fn new(min_gap: Duration) -> Self {
        let quota = Quota::with_period(min_gap)
            .unwrap_or_else(|| Quota::per_second(UNTHROTTLED_REQ_PER_SEC));
        RateLimiter {
            between_requests: GovernorRateLimiter::direct(quota),
        }
    }

    pub async fn wait_until_ready(&self) {
        self.between_requests.until_ready().await;
    }
}
