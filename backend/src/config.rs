use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use crate::external::yahoofinance;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProviderKind {
    Yahoo,
    Mock,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub provider: ProviderKind,
    pub quote_currency: String,
    pub earliest_date: NaiveDate,
    pub yahoo_base_url: String,
    pub cors_allow_any: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let bind_addr = get("BIND_ADDR", "0.0.0.0:3000")
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:3000")?;

        let provider = match get("PRICE_PROVIDER", "yahoo").to_lowercase().as_str() {
            "yahoo" => ProviderKind::Yahoo,
            "mock" => ProviderKind::Mock,
            other => bail!("Invalid PRICE_PROVIDER: {}. Must be 'yahoo' or 'mock'", other),
        };

        let quote_currency = get("QUOTE_CURRENCY", "EUR").trim().to_uppercase();
        if quote_currency.is_empty() {
            bail!("QUOTE_CURRENCY must not be empty");
        }

        let earliest_date = NaiveDate::parse_from_str(&get("EARLIEST_DATE", "2019-12-12"), "%Y-%m-%d")
            .context("EARLIEST_DATE must be formatted YYYY-MM-DD")?;

        let cors_allow_any = get("CORS_ALLOW_ANY", "false")
            .parse::<bool>()
            .context("CORS_ALLOW_ANY must be true or false")?;

        Ok(Self {
            bind_addr,
            provider,
            quote_currency,
            earliest_date,
            yahoo_base_url: get("YAHOO_BASE_URL", yahoofinance::DEFAULT_BASE_URL),
            cors_allow_any,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            provider: ProviderKind::Yahoo,
            quote_currency: "EUR".to_string(),
            earliest_date: NaiveDate::from_ymd_opt(2019, 12, 12).unwrap_or_default(),
            yahoo_base_url: yahoofinance::DEFAULT_BASE_URL.to_string(),
            cors_allow_any: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr.port(), 3000);
        assert_eq!(cfg.provider, ProviderKind::Yahoo);
        assert_eq!(cfg.quote_currency, "EUR");
        assert_eq!(cfg.earliest_date, NaiveDate::from_ymd_opt(2019, 12, 12).unwrap());
        assert!(!cfg.cors_allow_any);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("PRICE_PROVIDER", "Mock"),
            ("QUOTE_CURRENCY", "usd"),
            ("EARLIEST_DATE", "2020-01-01"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ])
        .unwrap();
        assert_eq!(cfg.provider, ProviderKind::Mock);
        assert_eq!(cfg.quote_currency, "USD");
        assert_eq!(cfg.earliest_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(cfg.bind_addr.port(), 8080);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("PRICE_PROVIDER", "bloomberg")]).is_err());
        assert!(config(&[("EARLIEST_DATE", "12/12/2019")]).is_err());
        assert!(config(&[("BIND_ADDR", "localhost")]).is_err());
    }
}
