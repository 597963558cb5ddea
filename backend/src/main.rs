mod app;
mod config;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::{AppConfig, ProviderKind};
use crate::external::mock::MockProvider;
use crate::external::price_provider::PriceProvider;
use crate::external::yahoofinance::YahooFinanceProvider;
use crate::logging::{init_logging, LoggingConfig};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env()).map_err(|e| anyhow::anyhow!("logging: {}", e))?;

    let config = AppConfig::from_env()?;

    let provider: Arc<dyn PriceProvider> = match config.provider {
        ProviderKind::Yahoo => {
            tracing::info!(
                "Using price provider: Yahoo Finance ({} pairs via {})",
                config.quote_currency,
                config.yahoo_base_url
            );
            Arc::new(YahooFinanceProvider::new(
                config.yahoo_base_url.clone(),
                config.quote_currency.clone(),
            ))
        }
        ProviderKind::Mock => {
            tracing::info!("Using price provider: mock random walk");
            Arc::new(MockProvider::new(config.earliest_date))
        }
    };

    let state = AppState::new(&config, provider);
    let app = app::create_app(state, config.cors_allow_any);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Dashboard running at http://{}/", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
