use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::external::price_provider::{PriceProvider, PriceProviderError};
use crate::models::{DateRange, PricePoint};

/// Offline provider producing a reproducible random walk per symbol.
///
/// The walk is seeded from the symbol and anchored at `origin`, so the same
/// day always has the same price whatever range is requested.
pub struct MockProvider {
    origin: chrono::NaiveDate,
}

impl MockProvider {
    pub fn new(origin: chrono::NaiveDate) -> Self {
        Self { origin }
    }

    fn seed_for(symbol: &str) -> u64 {
        symbol
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325_u64, |acc, b| (acc ^ b as u64).wrapping_mul(0x0100_0000_01b3))
    }
}

#[async_trait]
impl PriceProvider for MockProvider {
    async fn fetch_daily_history(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<PricePoint>, PriceProviderError> {
        if range.end() < self.origin {
            return Ok(Vec::new());
        }

        let mut rng = StdRng::seed_from_u64(Self::seed_for(symbol));
        let mut current = 100.0_f64 + (Self::seed_for(symbol) % 900) as f64;
        let mut points = Vec::new();
        let mut date = self.origin;

        while date <= range.end() {
            current *= 1.0 + (rng.random::<f64>() - 0.5) * 0.04;
            if range.contains(date) {
                points.push(PricePoint::new(date, current));
            }
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        Ok(points)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
