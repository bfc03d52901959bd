use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Username already exists")]
    UsernameExists,

    #[error("User not found")]
    UserNotFound,

    // Unknown user and wrong password share this variant.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Device already registered")]
    DeviceExists,
}

impl AccountError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::UsernameExists => StatusCode::CONFLICT,
            AccountError::UserNotFound => StatusCode::NOT_FOUND,
            AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AccountError::DeviceExists => StatusCode::CONFLICT,
        }
    }
}
