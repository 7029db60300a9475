use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Environment variable {0} not set error")]
    EnvironmentVariableNotSetError(String),
    #[error("File read error, {0}")]
    FileReadError(String),
    #[error("Failed to delete {resource} with ID {id}")]
    DatabaseDeleteError { resource: String, id: String },
    #[error("Sqlx error: {0}")]
    SqlxError(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    // search
    #[error("Listing store unavailable, {0}")]
    StoreUnavailable(String),
    #[error("Listing store rejected the query, {0}")]
    StoreQueryError(String),
    #[error("Listing store did not answer within {timeout_ms}ms")]
    StoreTimeoutError { timeout_ms: u64 },
    #[error("Could not read {value:?} as a number for {field}")]
    InputCoercionError { field: String, value: String },
    #[error("Invalid page request, {0}")]
    InvalidPageRequest(String),
    #[error("Page {requested} is out of range, there are {total_pages} pages")]
    PageOutOfRange { requested: i64, total_pages: i64 },

    #[error("{0}")]
    NotFoundError(String),
    #[error("Validation error, {0}")]
    ValidationError(String),
    #[error("Validation errors, {0}")]
    ValidatorValidationErrors(#[from] validator::ValidationErrors),
    #[error("Invalid header value, {0}")]
    InvalidHeaderValue(#[from] axum::http::header::InvalidHeaderValue),
    #[error("Internal error, {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::EnvironmentVariableNotSetError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Environment variable {e} not set error"),
            ),
            Self::FileReadError(e) => (StatusCode::INTERNAL_SERVER_ERROR, e),
            Self::DatabaseDeleteError { resource, id } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Failed to delete {resource} with ID {id}"),
            ),
            Self::SqlxError(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::MigrateError(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::StoreUnavailable(e) => (StatusCode::SERVICE_UNAVAILABLE, e),
            Self::StoreQueryError(e) => (StatusCode::INTERNAL_SERVER_ERROR, e),
            Self::StoreTimeoutError { timeout_ms } => (
                StatusCode::GATEWAY_TIMEOUT,
                format!("Listing store did not answer within {timeout_ms}ms"),
            ),
            Self::InputCoercionError { field, value } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Could not read {value:?} as a number for {field}"),
            ),
            Self::InvalidPageRequest(e) => (StatusCode::UNPROCESSABLE_ENTITY, e),
            Self::PageOutOfRange {
                requested,
                total_pages,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Page {requested} is out of range, there are {total_pages} pages"),
            ),
            Self::NotFoundError(e) => (StatusCode::NOT_FOUND, e),
            Self::ValidationError(e) => (StatusCode::UNPROCESSABLE_ENTITY, e),
            Self::ValidatorValidationErrors(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            Self::InvalidHeaderValue(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::InternalError(e) => (StatusCode::INTERNAL_SERVER_ERROR, e),
        };

        let body = Json(json!({"error": error_message}));

        (status, body).into_response()
    }
}
