//! Public counter and the token-gated reset.

use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;

use onduty_core::error::ClientCode;

use crate::api::error::ApiError;
use crate::app_state::AppState;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub online: usize,
}

#[derive(Debug, Serialize)]
pub struct ResetBody {
    pub ok: bool,
    pub online: usize,
}

pub async fn status(State(state): State<AppState>) -> Json<StatusBody> {
    Json(StatusBody {
        online: state.registry().count(),
    })
}

pub async fn reset(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ResetBody>, ApiError> {
    let supplied = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    if let Err(e) = state.admin_token().verify(supplied) {
        let reason = match e.client_code() {
            ClientCode::NotConfigured => "not_configured",
            _ => "bad_token",
        };
        state
            .metrics()
            .admin_rejections
            .inc(&[("via", "http"), ("reason", reason)]);
        tracing::warn!(reason, "admin reset refused");
        return Err(e.into());
    }

    let removed = state.registry().clear();
    state.metrics().resets.inc(&[("via", "http")]);
    tracing::info!(removed, "roster reset over http");

    Ok(Json(ResetBody { ok: true, online: 0 }))
}
