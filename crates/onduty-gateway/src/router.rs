//! Axum router wiring.

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let cors_allow_any = state.cfg().gateway.cors_allow_any;

    let router = Router::new()
        .route("/status", get(api::status::status))
        .route("/reset", post(api::status::reset))
        .route(
            "/v1/commands",
            get(api::commands::list_commands).post(api::commands::run_command),
        )
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state);

    if cors_allow_any {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any),
        )
    } else {
        router
    }
}
