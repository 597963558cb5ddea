use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::{DashboardQuery, DashboardRequest};
use crate::services::dashboard_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard).post(post_dashboard))
}

/// GET /api/dashboard?symbols=BTC,ETH&start_date=2021-01-01&end_date=2021-06-30
pub async fn get_dashboard(
    Query(query): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    info!(
        "GET /api/dashboard - symbols={:?} start={:?} end={:?}",
        query.symbols, query.start_date, query.end_date
    );
    build(state, query.into()).await
}

/// POST /api/dashboard
///
/// Body: `{"symbols": "BTC" | ["BTC", "ETH"], "start_date": "...", "end_date": "..."}`
pub async fn post_dashboard(
    State(state): State<AppState>,
    Json(request): Json<DashboardRequest>,
) -> Result<Response, AppError> {
    info!("POST /api/dashboard - symbols={:?}", request.symbols);
    build(state, request).await
}

async fn build(state: AppState, request: DashboardRequest) -> Result<Response, AppError> {
    let outcome = dashboard_service::run(
        state.price_provider.as_ref(),
        &state.catalog,
        state.date_bounds(),
        request,
    )
    .await
    .map_err(|e| {
        match &e {
            AppError::Validation(msg) => warn!("Rejected dashboard request: {}", msg),
            AppError::RateLimited => warn!("Rate limited while building dashboard"),
            _ => error!("Failed to build dashboard: {}", e),
        }
        e
    })?;

    Ok(match outcome {
        Some(response) => Json(response).into_response(),
        // nothing selected: the page keeps what it shows
        None => StatusCode::NO_CONTENT.into_response(),
    })
}
