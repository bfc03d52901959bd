use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::MissingField(_) => StatusCode::BAD_REQUEST,
            RequestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for RequestError {
    fn from(rejection: JsonRejection) -> Self {
        RequestError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for RequestError {
    fn from(rejection: QueryRejection) -> Self {
        RequestError::InvalidBody(rejection.body_text())
    }
}

/// Returns the trimmed value, or `MissingField` when it is blank.
pub fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, RequestError> {
    match value.trim() {
        "" => Err(RequestError::MissingField(field)),
        value => Ok(value),
    }
}

/// Returns the value, or `MissingField` when it is absent.
pub fn required_number(value: Option<f64>, field: &'static str) -> Result<f64, RequestError> {
    value.ok_or(RequestError::MissingField(field))
}
