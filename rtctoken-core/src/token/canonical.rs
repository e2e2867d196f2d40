//! Canonical claim encoding
//!
//! Claims are serialized in a fixed field order with little-endian integers
//! and u16 length-prefixed strings:
//!
//! ```text
//! [u16 len][app id][u16 len][channel][u16 len][uid]
//! [u32 salt][u32 expired_ts][u16 count]{[u16 code][u32 expire_at]}*
//! ```
//!
//! The same bytes are both the HMAC input and the payload shipped inside the
//! token, so any change to widths, order or endianness breaks compatibility.

use crate::{token::PrivilegeSet, Result, TokenError};

/// Largest byte length a u16 length prefix can describe
pub const MAX_FIELD_LEN: usize = u16::MAX as usize;

/// Claims carried by a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimPayload {
    pub app_id: String,
    pub channel_name: String,
    pub uid: String,
    pub salt: u32,
    pub expired_ts: u32,
    pub privileges: PrivilegeSet,
}

impl ClaimPayload {
    /// Serialize claims into their canonical byte form
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(
            2 * 3
                + self.app_id.len()
                + self.channel_name.len()
                + self.uid.len()
                + 4
                + 4
                + 2
                + 6 * self.privileges.len(),
        );

        put_string(&mut bytes, "app id", &self.app_id)?;
        put_string(&mut bytes, "channel name", &self.channel_name)?;
        put_string(&mut bytes, "uid", &self.uid)?;
        put_u32(&mut bytes, self.salt);
        put_u32(&mut bytes, self.expired_ts);

        let count = u16::try_from(self.privileges.len()).map_err(|_| {
            TokenError::InvalidInput(format!(
                "too many privileges: {} (max {})",
                self.privileges.len(),
                u16::MAX
            ))
        })?;
        put_u16(&mut bytes, count);

        for (code, expire_at) in self.privileges.iter() {
            put_u16(&mut bytes, code);
            put_u32(&mut bytes, expire_at);
        }

        Ok(bytes)
    }

    /// Parse canonical claim bytes
    ///
    /// The whole buffer must be consumed; trailing bytes are rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);

        let app_id = reader.string("app id")?;
        let channel_name = reader.string("channel name")?;
        let uid = reader.string("uid")?;
        let salt = reader.u32("salt")?;
        let expired_ts = reader.u32("expired_ts")?;

        let count = reader.u16("privilege count")?;
        let mut privileges = PrivilegeSet::new();
        for _ in 0..count {
            let code = reader.u16("privilege code")?;
            let expire_at = reader.u32("privilege expiry")?;
            privileges.add(code, expire_at);
        }

        reader.finish()?;

        Ok(ClaimPayload {
            app_id,
            channel_name,
            uid,
            salt,
            expired_ts,
            privileges,
        })
    }
}

pub(crate) fn put_u16(bytes: &mut Vec<u8>, value: u16) {
    bytes.extend_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_u32(bytes: &mut Vec<u8>, value: u32) {
    bytes.extend_from_slice(&value.to_le_bytes());
}

/// Write a u16 length prefix followed by the raw bytes
pub(crate) fn put_bytes(bytes: &mut Vec<u8>, field: &str, value: &[u8]) -> Result<()> {
    let len = u16::try_from(value.len()).map_err(|_| {
        TokenError::InvalidInput(format!(
            "{} is {} bytes, exceeds {} byte limit",
            field,
            value.len(),
            MAX_FIELD_LEN
        ))
    })?;
    put_u16(bytes, len);
    bytes.extend_from_slice(value);
    Ok(())
}

fn put_string(bytes: &mut Vec<u8>, field: &str, value: &str) -> Result<()> {
    put_bytes(bytes, field, value.as_bytes())
}

/// Little-endian cursor over a claim or token buffer
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        ByteReader { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize, field: &str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| {
                TokenError::Malformed(format!(
                    "truncated {} at offset {} (need {} bytes, have {})",
                    field,
                    self.pos,
                    n,
                    self.bytes.len() - self.pos
                ))
            })?;
        let bytes = self.bytes;
        let slice = &bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn u16(&mut self, field: &str) -> Result<u16> {
        let b = self.take(2, field)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub(crate) fn u32(&mut self, field: &str) -> Result<u32> {
        let b = self.take(4, field)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub(crate) fn bytes(&mut self, field: &str) -> Result<&'a [u8]> {
        let len = self.u16(field)? as usize;
        self.take(len, field)
    }

    fn string(&mut self, field: &str) -> Result<String> {
        let raw = self.bytes(field)?;
        String::from_utf8(raw.to_vec())
            .map_err(|_| TokenError::Malformed(format!("{} is not valid UTF-8", field)))
    }

    pub(crate) fn rest(&mut self) -> &'a [u8] {
        let bytes = self.bytes;
        let rest = &bytes[self.pos..];
        self.pos = self.bytes.len();
        rest
    }

    fn finish(&self) -> Result<()> {
        if self.pos != self.bytes.len() {
            return Err(TokenError::Malformed(format!(
                "{} trailing bytes after claims",
                self.bytes.len() - self.pos
            )));
        }
        Ok(())
    }
}
