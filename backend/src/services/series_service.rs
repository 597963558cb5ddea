use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::external::price_provider::{PriceProvider, PriceProviderError};
use crate::models::{DateRange, RawSeries};

/// Fetch one symbol's history. A provider with no data for the range yields
/// an empty series; every other provider failure is returned.
pub async fn fetch_series(
    provider: &dyn PriceProvider,
    symbol: &str,
    range: DateRange,
) -> Result<RawSeries, AppError> {
    match provider.fetch_daily_history(symbol, range).await {
        Ok(points) => {
            let series = RawSeries::new(symbol, points);
            info!(
                "Fetched {} points for {} from {} ({} to {})",
                series.len(),
                symbol,
                provider.name(),
                range.start(),
                range.end()
            );
            Ok(series)
        }
        Err(PriceProviderError::NotFound(what)) => {
            warn!("No data for {} in range ({}), continuing with an empty series", symbol, what);
            Ok(RawSeries::empty(symbol))
        }
        Err(PriceProviderError::RateLimited) => {
            warn!("Rate limited by {} while fetching {}", provider.name(), symbol);
            Err(AppError::RateLimited)
        }
        Err(e) => {
            error!("Failed to fetch {} from {}: {}", symbol, provider.name(), e);
            Err(AppError::External(format!("Failed to fetch {}: {}", symbol, e)))
        }
    }
}

/// Fetch every symbol one after the other, in selection order.
pub async fn fetch_all(
    provider: &dyn PriceProvider,
    symbols: &[String],
    range: DateRange,
) -> Result<Vec<RawSeries>, AppError> {
    let mut out = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        out.push(fetch_series(provider, symbol, range).await?);
    }
    Ok(out)
}
