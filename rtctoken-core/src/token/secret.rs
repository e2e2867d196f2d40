//! App certificate handling
//!
//! The certificate is the MAC key material shared with the communication
//! platform. It is held in a buffer that is wiped on drop and is never
//! printed through `Debug`.

use crate::{Result, TokenError};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret app certificate
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct AppCertificate {
    bytes: Vec<u8>,
}

impl AppCertificate {
    /// Wrap certificate bytes, rejecting an empty secret
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        Ok(AppCertificate { bytes })
    }

    /// Wrap an optionally configured certificate, failing when absent or empty
    pub fn from_optional(value: Option<impl Into<Vec<u8>>>) -> Result<Self> {
        match value {
            Some(bytes) => Self::new(bytes),
            None => Err(TokenError::MissingSecret),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for AppCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCertificate")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
