//! Error types for token construction

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("App certificate is missing or empty")]
    MissingSecret,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}
