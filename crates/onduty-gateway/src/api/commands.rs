//! Command webhook: a chat adapter posts each decoded message here.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use onduty_core::error::OndutyError;
use onduty_core::{Caller, UserId};

use crate::api::error::ApiError;
use crate::app_state::AppState;
use crate::commands::CommandInfo;

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub display_name: Option<String>,
    pub content: String,
    /// Messages from bots are ignored, including our own echoes.
    #[serde(default)]
    pub bot: bool,
    /// Administrator role in the group the message came from; absent for DMs.
    #[serde(default)]
    pub guild_admin: Option<bool>,
}

pub async fn run_command(
    State(state): State<AppState>,
    body: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body.map_err(|e| OndutyError::BadRequest(e.body_text()))?;

    if req.bot {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let caller = Caller {
        user_id: req.user_id,
        guild_admin: req.guild_admin,
    };
    let ctx = state.command_ctx(caller, req.display_name);

    match state.commands().dispatch(ctx, &req.content).await? {
        Some(reply) => Ok(Json(reply).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

pub async fn list_commands(State(state): State<AppState>) -> Json<Vec<CommandInfo>> {
    Json(state.commands().list())
}
