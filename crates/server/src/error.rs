use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sales_report::RenderError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Message returned to clients when the customer query fails.
pub const DATA_SOURCE_FAILURE_MESSAGE: &str = "Falha na consulta ao banco de dados";

/// Message returned to clients when the PDF cannot be produced.
pub const RENDER_FAILURE_MESSAGE: &str = "Falha ao gerar PDF";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Customer totals query failed: {0}")]
    DataSource(#[from] sqlx::Error),

    #[error("Report rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Details stay in the server log; clients get a generic message.
        let error_message = match &self {
            ApiError::DataSource(_) => DATA_SOURCE_FAILURE_MESSAGE,
            ApiError::Render(_) | ApiError::Internal(_) => RENDER_FAILURE_MESSAGE,
        };
        tracing::error!(error = %self, "request failed");

        let body = Json(json!({
            "error": error_message,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
