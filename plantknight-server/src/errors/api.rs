use axum::extract::rejection::{JsonRejection, QueryRejection};

use super::{AccountError, ReadingError, RecommendationError, RequestError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request error: {0}")]
    RequestError(#[from] RequestError),

    #[error("Account error: {0}")]
    AccountError(#[from] AccountError),

    #[error("Reading error: {0}")]
    ReadingError(#[from] ReadingError),

    #[error("Recommendation error: {0}")]
    RecommendationError(#[from] RecommendationError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        RequestError::from(rejection).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        RequestError::from(rejection).into()
    }
}
