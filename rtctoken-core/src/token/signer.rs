//! Two-stage HMAC-SHA256 token signing
//!
//! The raw certificate only ever keys an HMAC over the 4-byte salt. The
//! result is the per-token signing key used to MAC the claim payload.

use crate::{token::AppCertificate, Result, TokenError};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Byte length of a token signature
pub const SIGNATURE_LEN: usize = 32;

/// Derive the per-token key: `HMAC-SHA256(certificate, le32(salt))`
pub fn derive_signing_key(
    certificate: &AppCertificate,
    salt: u32,
) -> Result<Zeroizing<[u8; SIGNATURE_LEN]>> {
    let key = hmac_sha256(certificate.expose(), &salt.to_le_bytes())?;
    Ok(Zeroizing::new(key))
}

/// Sign canonical claim bytes with the key derived from `certificate` and `salt`
pub fn sign(certificate: &AppCertificate, salt: u32, claims: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
    let key = derive_signing_key(certificate, salt)?;
    hmac_sha256(key.as_slice(), claims)
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| TokenError::InvalidInput(format!("invalid HMAC key: {}", e)))?;
    mac.update(message);

    let mut out = [0u8; SIGNATURE_LEN];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}
