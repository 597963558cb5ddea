use axum::extract::State;
use axum::routing::get;
use axum::Router;
use tracing::debug;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
}

/// Liveness plus the name of the price provider in use, e.g. `OK (yahoo)`.
async fn health(State(state): State<AppState>) -> String {
    let provider = state.price_provider.name();
    debug!("GET /health - provider={}", provider);
    format!("OK ({})", provider)
}
