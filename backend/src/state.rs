use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::config::AppConfig;
use crate::external::price_provider::PriceProvider;
use crate::models::Catalog;
use crate::services::dashboard_service::DateBounds;

#[derive(Clone)]
pub struct AppState {
    pub price_provider: Arc<dyn PriceProvider>,
    pub catalog: Arc<Catalog>,
    pub earliest_date: NaiveDate,
}

impl AppState {
    pub fn new(config: &AppConfig, price_provider: Arc<dyn PriceProvider>) -> Self {
        Self {
            price_provider,
            catalog: Arc::new(Catalog::default()),
            earliest_date: config.earliest_date,
        }
    }

    /// Picker bounds for a request made now: earliest date to today (UTC).
    pub fn date_bounds(&self) -> DateBounds {
        let today = Utc::now().date_naive();
        DateBounds {
            earliest: self.earliest_date,
            latest: today.max(self.earliest_date),
        }
    }
}
