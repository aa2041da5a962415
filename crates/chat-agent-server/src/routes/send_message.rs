use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use bytes::Bytes;
use chat_agent::models::message::MessageWithContext;
use serde_json::Value;

// The body is taken raw so a malformed request fails the same way as
// everything else instead of through axum's 4xx rejections.
async fn handler(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, ApiError> {
    let request: MessageWithContext =
        serde_json::from_slice(&body).map_err(|e| ApiError(e.into()))?;

    let payload = state.agent.reply(request).await?;
    Ok(Json(payload))
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/send-message", post(handler))
        .with_state(state)
}
