use crate::external::price_provider::{PriceProvider, PriceProviderError};
use crate::models::{DateRange, PricePoint};
use async_trait::async_trait;
use chrono::{Days, NaiveTime};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance chart API. No API key required.
///
/// Crypto pairs are quoted as `<SYMBOL>-<QUOTE>`, e.g. `BTC-EUR`.
pub struct YahooFinanceProvider {
    client: reqwest::Client,
    base_url: String,
    quote_currency: String,
}

impl YahooFinanceProvider {
    pub fn new(base_url: impl Into<String>, quote_currency: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (compatible; cryptocorr/0.1)")
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            quote_currency: quote_currency.into(),
        }
    }

    pub fn trading_pair(&self, symbol: &str) -> String {
        format!("{}-{}", symbol, self.quote_currency)
    }
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: Option<String>,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    #[serde(default)]
    quote: Vec<YahooQuote>,
    #[serde(default)]
    adjclose: Vec<YahooAdjClose>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct YahooAdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

fn is_no_data(error: &YahooError) -> bool {
    error.code.as_deref() == Some("Not Found") || error.description.contains("No data found")
}

/// Turns a chart payload into points. Adjusted closes are preferred, plain
/// closes are the fallback when Yahoo omits the adjclose block.
fn parse_chart(symbol: &str, body: YahooChartResponse) -> Result<Vec<PricePoint>, PriceProviderError> {
    if let Some(error) = body.chart.error {
        if is_no_data(&error) {
            return Err(PriceProviderError::NotFound(symbol.to_string()));
        }
        return Err(PriceProviderError::BadResponse(error.description));
    }

    let result = body
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.swap_remove(0)) })
        .ok_or_else(|| PriceProviderError::NotFound(symbol.to_string()))?;

    let values = match result.indicators.adjclose.into_iter().next() {
        Some(adj) if !adj.adjclose.is_empty() => adj.adjclose,
        _ => result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default(),
    };

    if result.timestamp.is_empty() {
        return Ok(Vec::new());
    }

    if result.timestamp.len() != values.len() {
        return Err(PriceProviderError::Parse(
            "Timestamp and close price arrays have different lengths".into(),
        ));
    }

    let mut points: Vec<PricePoint> = result
        .timestamp
        .iter()
        .zip(values.iter())
        .filter_map(|(timestamp, value)| {
            // null closes mark days without trading
            let adj_close = (*value)?;
            let date = chrono::DateTime::from_timestamp(*timestamp, 0).map(|dt| dt.date_naive())?;
            Some(PricePoint::new(date, adj_close))
        })
        .collect();

    points.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(points)
}

#[async_trait]
impl PriceProvider for YahooFinanceProvider {
    async fn fetch_daily_history(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<PricePoint>, PriceProviderError> {
        let pair = self.trading_pair(symbol);
        let url = format!("{}/v8/finance/chart/{}", self.base_url, pair);

        // period2 is exclusive, so ask up to midnight after the last day
        let period1 = range.start().and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = range
            .end()
            .checked_add_days(Days::new(1))
            .unwrap_or(range.end())
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        debug!("Requesting {} from {} to {}", pair, range.start(), range.end());

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("interval", "1d".to_string()),
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| PriceProviderError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceProviderError::RateLimited);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PriceProviderError::NotFound(pair));
        }
        if !status.is_success() {
            return Err(PriceProviderError::BadResponse(format!("HTTP {}", status)));
        }

        let body: YahooChartResponse = resp
            .json()
            .await
            .map_err(|e| PriceProviderError::Parse(e.to_string()))?;

        let points = parse_chart(&pair, body)?;
        Ok(points.into_iter().filter(|p| range.contains(p.date)).collect())
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(json: &str) -> Result<Vec<PricePoint>, PriceProviderError> {
        let body: YahooChartResponse = serde_json::from_str(json).unwrap();
        parse_chart("BTC-EUR", body)
    }

    #[test]
    fn test_trading_pair_uses_quote_currency() {
        let provider = YahooFinanceProvider::new(DEFAULT_BASE_URL, "EUR");
        assert_eq!(provider.trading_pair("ETH"), "ETH-EUR");
    }

    #[test]
    fn test_parse_prefers_adjusted_close_and_skips_nulls() {
        // 2021-01-01, 2021-01-02, 2021-01-03 at 00:00 UTC
        let json = r#"{"chart":{"result":[{
            "timestamp":[1609459200,1609545600,1609632000],
            "indicators":{
                "quote":[{"close":[1.0,2.0,3.0]}],
                "adjclose":[{"adjclose":[10.0,null,30.0]}]
            }}],"error":null}}"#;

        let points = parse(json).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(points[0].adj_close, 10.0);
        assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2021, 1, 3).unwrap());
        assert_eq!(points[1].adj_close, 30.0);
    }

    #[test]
    fn test_parse_falls_back_to_close() {
        let json = r#"{"chart":{"result":[{
            "timestamp":[1609459200],
            "indicators":{"quote":[{"close":[42.5]}]}}],"error":null}}"#;

        let points = parse(json).unwrap();
        assert_eq!(points, vec![PricePoint::new(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(), 42.5)]);
    }

    #[test]
    fn test_parse_no_data_error_is_not_found() {
        let json = r#"{"chart":{"result":null,"error":{
            "code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert!(matches!(parse(json), Err(PriceProviderError::NotFound(_))));
    }

    #[test]
    fn test_parse_empty_timestamps_is_empty_series() {
        let json = r#"{"chart":{"result":[{"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(parse(json).unwrap().is_empty());
    }

    #[test]
    fn test_parse_length_mismatch_is_error() {
        let json = r#"{"chart":{"result":[{
            "timestamp":[1609459200,1609545600],
            "indicators":{"quote":[{"close":[1.0]}]}}],"error":null}}"#;
        assert!(matches!(parse(json), Err(PriceProviderError::Parse(_))));
    }
}
