pub mod account;
pub mod api;
pub mod reading;
pub mod recommendation;
pub mod request;

pub use account::AccountError;
pub use api::ApiError;
pub use reading::ReadingError;
pub use recommendation::RecommendationError;
pub use request::RequestError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error_id) = match self {
            ApiError::RequestError(e) => (e.status_code(), e.to_string(), None),
            ApiError::AccountError(e) => (e.status_code(), e.to_string(), None),
            ApiError::ReadingError(e) => (e.status_code(), e.to_string(), None),
            ApiError::RecommendationError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Recommendation error: {}", e);
                (e.status_code(), e.to_string(), Some(error_id))
            }
            ApiError::DatabaseError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), Some(error_id))
            }
            ApiError::InternalError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Internal error: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), Some(error_id))
            }
        };

        let mut error_obj = json!({
            "code": status.as_u16(),
            "message": message
        });

        if let Some(error_id) = error_id {
            error_obj["error_id"] = json!(error_id.to_string());
        }

        (status, Json(json!({ "error": error_obj }))).into_response()
    }
}
