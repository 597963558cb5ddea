use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{catalog, dashboard, health, page};
use crate::state::AppState;

pub fn create_app(state: AppState, cors_allow_any: bool) -> Router {
    let router = Router::<AppState>::new()
        .merge(page::router())
        .nest("/health", health::router())
        .nest("/api/catalog", catalog::router())
        .nest("/api/dashboard", dashboard::router())
        .with_state(state);

    if cors_allow_any {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
