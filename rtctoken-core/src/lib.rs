//! Access-token construction for real-time channel privileges
//!
//! Builds the signed, base64-encoded tokens a client presents to join a
//! channel and publish audio, video, or data streams until an expiry time.

pub mod error;
pub mod token;
pub mod types;

pub use error::*;
pub use token::*;
pub use types::*;

/// Result type alias for token operations
pub type Result<T> = std::result::Result<T, TokenError>;
