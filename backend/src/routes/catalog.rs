use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::models::CatalogResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_catalog))
}

/// GET /api/catalog
///
/// Selectable currencies plus the bounds of the date picker.
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    info!("GET /api/catalog - Listing currencies");
    let bounds = state.date_bounds();

    Json(CatalogResponse {
        symbols: state.catalog.entries().to_vec(),
        earliest_date: bounds.earliest,
        latest_date: bounds.latest,
        default_selection: state
            .catalog
            .default_symbol()
            .map(|s| vec![s.to_string()])
            .unwrap_or_default(),
    })
}
