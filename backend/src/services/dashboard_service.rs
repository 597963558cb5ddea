use chrono::NaiveDate;
use tracing::info;

use crate::errors::AppError;
use crate::external::price_provider::PriceProvider;
use crate::models::{Catalog, DashboardRequest, DashboardResponse, DateRange, RawSeries};
use crate::services::{correlation_service, normalizer, presentation, series_service};

/// Dates the picker allows, both inclusive.
#[derive(Debug, Clone, Copy)]
pub struct DateBounds {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

/// Resolve the requested range, defaulting to the full allowed window.
pub fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    bounds: DateBounds,
) -> Result<DateRange, AppError> {
    let start = match start.filter(|s| !s.trim().is_empty()) {
        Some(raw) => DateRange::parse_date(raw)?,
        None => bounds.earliest,
    };
    let end = match end.filter(|s| !s.trim().is_empty()) {
        Some(raw) => DateRange::parse_date(raw)?,
        None => bounds.latest,
    };

    if start < bounds.earliest {
        return Err(AppError::Validation(format!(
            "start date {} is before the earliest allowed date {}",
            start, bounds.earliest
        )));
    }
    if end > bounds.latest {
        return Err(AppError::Validation(format!(
            "end date {} is after the latest allowed date {}",
            end, bounds.latest
        )));
    }

    Ok(DateRange::new(start, end)?)
}

/// Validated selection, or `None` when nothing is selected.
pub fn resolve_symbols(
    request: &DashboardRequest,
    catalog: &Catalog,
) -> Result<Option<Vec<String>>, AppError> {
    let symbols = request
        .symbols
        .clone()
        .map(|s| s.into_symbols())
        .unwrap_or_default();

    if symbols.is_empty() {
        return Ok(None);
    }

    if let Some(unknown) = symbols.iter().find(|s| !catalog.contains(s)) {
        return Err(AppError::Validation(format!("Unknown currency: {}", unknown)));
    }

    Ok(Some(symbols))
}

/// Align, correlate and lay out already fetched series.
///
/// `symbols` must be non-empty; its first entry is the reference.
pub fn assemble(symbols: &[String], range: &DateRange, series: &[RawSeries]) -> DashboardResponse {
    let merged = normalizer::align(range, series);
    let reference = symbols[0].clone();
    let correlations = correlation_service::correlate(&merged, &reference, &symbols[1..]);

    DashboardResponse {
        caption: presentation::caption(&reference),
        chart: presentation::build_chart(&merged, symbols),
        table: presentation::build_table(&correlations),
        reference,
        merged,
    }
}

/// Full pipeline for one request. `Ok(None)` means nothing was selected and
/// the caller must leave the current display untouched.
pub async fn run(
    provider: &dyn PriceProvider,
    catalog: &Catalog,
    bounds: DateBounds,
    request: DashboardRequest,
) -> Result<Option<DashboardResponse>, AppError> {
    let Some(symbols) = resolve_symbols(&request, catalog)? else {
        info!("Empty selection, skipping dashboard update");
        return Ok(None);
    };

    let range = resolve_range(request.start_date.as_deref(), request.end_date.as_deref(), bounds)?;
    info!(
        "Building dashboard for [{}] from {} to {}",
        symbols.join(", "),
        range.start(),
        range.end()
    );

    let series = series_service::fetch_all(provider, &symbols, range).await?;
    let response = assemble(&symbols, &range, &series);

    info!(
        "Dashboard ready: {} rows, {} correlations against {}",
        response.merged.row_count(),
        response.table.rows.len(),
        response.reference
    );
    Ok(Some(response))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::external::price_provider::PriceProviderError;
    use crate::models::dashboard::SymbolSelection;
    use crate::models::PricePoint;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory provider keyed by symbol. Symbols listed in `failing` return
    /// a network error; unknown symbols have no data.
    #[derive(Default)]
    pub struct StaticProvider {
        pub series: HashMap<String, Vec<PricePoint>>,
        pub failing: Vec<String>,
        pub calls: AtomicUsize,
    }

    impl StaticProvider {
        pub fn with(mut self, symbol: &str, points: &[(NaiveDate, f64)]) -> Self {
            self.series.insert(
                symbol.to_string(),
                points.iter().map(|(d, v)| PricePoint::new(*d, *v)).collect(),
            );
            self
        }
    }

    #[async_trait]
    impl PriceProvider for StaticProvider {
        async fn fetch_daily_history(
            &self,
            symbol: &str,
            range: DateRange,
        ) -> Result<Vec<PricePoint>, PriceProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.iter().any(|s| s == symbol) {
                return Err(PriceProviderError::Network("connection reset".into()));
            }
            match self.series.get(symbol) {
                Some(points) => Ok(points.iter().filter(|p| range.contains(p.date)).copied().collect()),
                None => Err(PriceProviderError::NotFound(symbol.to_string())),
            }
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    pub fn bounds() -> DateBounds {
        DateBounds { earliest: d(2019, 12, 12), latest: d(2021, 12, 31) }
    }

    fn request(symbols: SymbolSelection, start: &str, end: &str) -> DashboardRequest {
        DashboardRequest {
            symbols: Some(symbols),
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
        }
    }

    fn many(symbols: &[&str]) -> SymbolSelection {
        SymbolSelection::Many(symbols.iter().map(|s| s.to_string()).collect())
    }

    fn increasing(values: &[f64]) -> Vec<(NaiveDate, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (d(2021, 1, 1 + i as u32), *v))
            .collect()
    }

    #[tokio::test]
    async fn test_single_symbol_has_no_correlations() {
        let provider = StaticProvider::default()
            .with("BTC", &increasing(&[29000.0, 30000.0, 31500.0, 33000.0, 36000.0]));

        let response = run(
            &provider,
            &Catalog::default(),
            bounds(),
            request(SymbolSelection::One("BTC".into()), "2021-01-01", "2021-01-05"),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(response.chart.data.len(), 1);
        let y: Vec<f64> = response.chart.data[0].y.iter().map(|v| v.unwrap()).collect();
        assert_eq!(y.first(), Some(&0.0));
        assert_eq!(y.last(), Some(&100.0));
        assert!(y.windows(2).all(|w| w[0] < w[1]));
        assert!(response.table.rows.is_empty());
        assert_eq!(response.caption, "Correlation coefficient score to BTC");
    }

    #[tokio::test]
    async fn test_identical_series_correlate_at_one() {
        let prices = increasing(&[10.0, 12.0, 11.0, 15.0, 14.0]);
        let provider = StaticProvider::default().with("BTC", &prices).with("ETH", &prices);

        let response = run(
            &provider,
            &Catalog::default(),
            bounds(),
            request(many(&["BTC", "ETH"]), "2021-01-01", "2021-01-05"),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(response.table.rows.len(), 1);
        assert_eq!(response.table.rows[0].currency, "ETH");
        assert_eq!(response.table.rows[0].spearman_coefficient, Some(1.0));
    }

    #[tokio::test]
    async fn test_one_overlapping_day_is_undefined() {
        let provider = StaticProvider::default()
            .with("BTC", &increasing(&[1.0, 2.0, 3.0, 4.0, 5.0]))
            .with("ETH", &[(d(2021, 1, 3), 700.0)]);

        let response = run(
            &provider,
            &Catalog::default(),
            bounds(),
            request(many(&["BTC", "ETH"]), "2021-01-01", "2021-01-05"),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(response.table.rows[0].currency, "ETH");
        assert_eq!(response.table.rows[0].spearman_coefficient, None);
        // partial rows survive
        assert_eq!(response.merged.row_count(), 5);
    }

    #[tokio::test]
    async fn test_empty_selection_is_no_update() {
        let provider = StaticProvider::default();
        let outcome = run(
            &provider,
            &Catalog::default(),
            bounds(),
            request(many(&[]), "2021-01-01", "2021-01-05"),
        )
        .await
        .unwrap();

        assert!(outcome.is_none());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        let missing = DashboardRequest { symbols: None, start_date: None, end_date: None };
        assert!(run(&provider, &Catalog::default(), bounds(), missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_symbol_without_data_does_not_fail_pipeline() {
        let provider = StaticProvider::default().with("BTC", &increasing(&[1.0, 2.0, 3.0]));

        let response = run(
            &provider,
            &Catalog::default(),
            bounds(),
            request(many(&["BTC", "DOGE"]), "2021-01-01", "2021-01-03"),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(response.merged.row_count(), 3);
        assert!(response.merged.column("DOGE").unwrap().scaled.iter().all(Option::is_none));
        assert_eq!(response.table.rows[0].spearman_coefficient, None);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_surfaced() {
        let provider = StaticProvider {
            failing: vec!["ETH".to_string()],
            ..StaticProvider::default()
        }
        .with("BTC", &increasing(&[1.0, 2.0]));

        let err = run(
            &provider,
            &Catalog::default(),
            bounds(),
            request(many(&["BTC", "ETH"]), "2021-01-01", "2021-01-02"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::External(msg) if msg.contains("ETH")));
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_rejected_before_fetching() {
        let provider = StaticProvider::default();
        let err = run(
            &provider,
            &Catalog::default(),
            bounds(),
            request(many(&["BTC", "SHIB"]), "2021-01-01", "2021-01-02"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(msg) if msg.contains("SHIB")));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_resolve_range_defaults_to_bounds() {
        let range = resolve_range(None, Some(""), bounds()).unwrap();
        assert_eq!(range.start(), d(2019, 12, 12));
        assert_eq!(range.end(), d(2021, 12, 31));
    }

    #[test]
    fn test_resolve_range_rejects_out_of_bounds_and_inverted() {
        assert!(matches!(
            resolve_range(Some("2019-01-01"), Some("2020-01-01"), bounds()),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            resolve_range(Some("2020-01-01"), Some("2022-06-01"), bounds()),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            resolve_range(Some("2021-01-05"), Some("2021-01-01"), bounds()),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            resolve_range(Some("yesterday"), None, bounds()),
            Err(AppError::Validation(_))
        ));
    }
}
