use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("Language model returned a malformed recommendation: {0}")]
    MalformedResponse(String),

    #[error("Language model requested unknown tool {0}")]
    UnknownTool(String),

    #[error("Language model request failed: {0}")]
    Upstream(String),
}

impl RecommendationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecommendationError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            RecommendationError::UnknownTool(_) => StatusCode::BAD_GATEWAY,
            RecommendationError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
