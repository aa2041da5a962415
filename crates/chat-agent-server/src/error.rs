use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chat_agent::errors::AgentError;
use serde::Serialize;
use thiserror::Error;

/// Message every failed request carries, whatever went wrong
pub const FAILURE_MESSAGE: &str = "Failed to process message";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Environment variable that sets the given configuration key
pub fn to_env_var(field_path: &str) -> String {
    format!(
        "CHAT_AGENT_{}",
        field_path.replace('.', "__").to_uppercase()
    )
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub error: String,
}

/// Any failure while handling a message.
///
/// Bad input and collaborator failures are not told apart on the wire: all
/// of them become a 500 carrying the underlying description.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub AgentError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.0.to_string();
        tracing::error!("API Error: {}", error);

        let body = Json(ErrorResponse {
            status: "error",
            message: FAILURE_MESSAGE,
            error,
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
