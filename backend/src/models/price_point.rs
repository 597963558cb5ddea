use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// One daily observation as returned by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub adj_close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, adj_close: f64) -> Self {
        Self { date, adj_close }
    }
}

/// Daily adjusted-close history for a single symbol.
///
/// Points are kept ascending by date with at most one point per date; when a
/// provider reports the same date twice the first observation wins. Gaps
/// (non-trading days) are allowed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawSeries {
    pub symbol: String,
    points: Vec<PricePoint>,
}

impl RawSeries {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let mut points: Vec<PricePoint> = points
            .into_iter()
            .filter(|p| p.adj_close.is_finite())
            .filter(|p| seen.insert(p.date))
            .collect();
        // stable, so the first observation of a date stays first
        points.sort_by_key(|p| p.date);

        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            points: Vec::new(),
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}
