//! Error handling

use axum::{
    extract::rejection::{FormRejection, JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use dr_scoring_core::ScoreError;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Input errors
    #[error("validation failed: {0}")]
    ValidationError(String),

    // Model errors
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("invalid model output: {0}")]
    InvalidModelOutput(String),

    // Generic errors
    #[error("internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::SchemaMismatch(_)
            | AppError::InvalidModelOutput(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the user; server-side details go to the log
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::ModelUnavailable(msg) => {
                tracing::error!("Model unavailable: {}", msg);
                "The prediction model is unavailable. No prediction can be made.".to_string()
            }
            AppError::SchemaMismatch(msg) => {
                tracing::error!("Feature schema mismatch: {}", msg);
                "The prediction model does not match the expected input features".to_string()
            }
            AppError::InvalidModelOutput(msg) => {
                tracing::error!("Invalid model output: {}", msg);
                "The prediction model returned an invalid result".to_string()
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = self.user_message();

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<ScoreError> for AppError {
    fn from(err: ScoreError) -> Self {
        match err {
            ScoreError::ModelUnavailable(msg) => AppError::ModelUnavailable(msg),
            ScoreError::SchemaMismatch(msg) => AppError::SchemaMismatch(msg),
            ScoreError::InvalidOutput(msg) => AppError::InvalidModelOutput(msg),
        }
    }
}

// Bodies that do not deserialize into the form are input errors too
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(format!("Invalid input: {}", rejection.body_text()))
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::ValidationError(format!("Invalid input: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::ValidationError(format!("Invalid input: {}", rejection.body_text()))
    }
}
