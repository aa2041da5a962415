use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Invalid request body: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidModelResponse(String),

    #[error("Unhandled intent: {0}")]
    UnhandledIntent(String),

    #[error("Error occurred getting swap receipt")]
    MissingReceiptFields,

    #[error("{0}")]
    Provider(anyhow::Error),

    #[error("{0}")]
    Swap(anyhow::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;
