use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ReadingError {
    #[error("No data found for the given device_id")]
    ReadingNotFound,
}

impl ReadingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReadingError::ReadingNotFound => StatusCode::NOT_FOUND,
        }
    }
}
