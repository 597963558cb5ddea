use async_trait::async_trait;
use thiserror::Error;

use crate::models::{DateRange, PricePoint};

#[derive(Debug, Error)]
pub enum PriceProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no data for {0}")]
    NotFound(String),

    #[error("rate limited")]
    RateLimited,
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Daily adjusted closes for `symbol` within `range`, oldest first.
    async fn fetch_daily_history(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<PricePoint>, PriceProviderError>;

    fn name(&self) -> &'static str;
}
