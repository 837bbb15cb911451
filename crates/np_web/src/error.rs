use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// 400, e.g. a malformed article id.
    BadRequest(String),
    NotFound(String),
    /// The request body did not deserialize; status comes from the rejection.
    Rejected(JsonRejection),
    Internal(np_core::Error),
}

impl From<np_core::Error> for ApiError {
    fn from(e: np_core::Error) -> Self {
        match e {
            np_core::Error::InvalidId(_) => ApiError::BadRequest("Invalid article ID format".to_string()),
            other => ApiError::Internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Rejected(rejection) => (rejection.status(), rejection.body_text()),
            ApiError::Internal(e) => {
                error!("❌ Request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
