//! Wire token packing
//!
//! Wire format: base64 (standard alphabet, padded) of
//! `[u16 signature len][signature][claim payload]`.

use crate::{
    token::canonical::{put_bytes, ByteReader},
    token::ClaimPayload,
    Result, TokenError,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Signature and claim bytes split out of a wire token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedToken {
    pub signature: Vec<u8>,
    pub claims: Vec<u8>,
}

/// A decoded token
///
/// Decoding does not check the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectedToken {
    pub signature: Vec<u8>,
    pub claims: ClaimPayload,
}

/// Concatenate the length-prefixed signature with the claim bytes and base64 them
pub fn pack(signature: &[u8], claims: &[u8]) -> Result<String> {
    let mut bytes = Vec::with_capacity(2 + signature.len() + claims.len());
    put_bytes(&mut bytes, "signature", signature)?;
    bytes.extend_from_slice(claims);
    Ok(STANDARD.encode(bytes))
}

/// Split a wire token into signature and claim bytes
pub fn unpack(token: &str) -> Result<PackedToken> {
    let bytes = STANDARD.decode(token.trim())?;
    let mut reader = ByteReader::new(&bytes);
    let signature = reader.bytes("signature")?.to_vec();
    let claims = reader.rest().to_vec();

    if claims.is_empty() {
        return Err(TokenError::Malformed("token carries no claims".to_string()));
    }

    Ok(PackedToken { signature, claims })
}

/// Decode a wire token into its signature and claims
pub fn inspect(token: &str) -> Result<InspectedToken> {
    let packed = unpack(token)?;
    let claims = ClaimPayload::decode(&packed.claims)?;
    Ok(InspectedToken {
        signature: packed.signature,
        claims,
    })
}
