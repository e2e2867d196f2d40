//! Core data types for token construction

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Grantable channel capability, identified on the wire by its code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum Privilege {
    JoinChannel = 1,
    PublishAudioStream = 2,
    PublishVideoStream = 3,
    PublishDataStream = 4,
}

impl Privilege {
    /// Every privilege, in code order
    pub const ALL: [Privilege; 4] = [
        Privilege::JoinChannel,
        Privilege::PublishAudioStream,
        Privilege::PublishVideoStream,
        Privilege::PublishDataStream,
    ];

    /// Wire code of this privilege
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Look up a privilege by wire code
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Privilege::JoinChannel => "join_channel",
            Privilege::PublishAudioStream => "publish_audio_stream",
            Privilege::PublishVideoStream => "publish_video_stream",
            Privilege::PublishDataStream => "publish_data_stream",
        }
    }
}

impl std::fmt::Display for Privilege {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Privilege {
    type Err = crate::TokenError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "join" | "join_channel" => Ok(Privilege::JoinChannel),
            "audio" | "publish_audio_stream" => Ok(Privilege::PublishAudioStream),
            "video" | "publish_video_stream" => Ok(Privilege::PublishVideoStream),
            "data" | "publish_data_stream" => Ok(Privilege::PublishDataStream),
            other => Err(crate::TokenError::InvalidInput(format!(
                "unknown privilege '{}'",
                other
            ))),
        }
    }
}

/// Subject identifier, numeric or textual
///
/// Either form is encoded as its string representation; numeric uids are
/// written in decimal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Uid {
    Numeric(u64),
    Text(String),
}

impl Uid {
    /// String form written into the claim payload
    pub fn to_wire_string(&self) -> String {
        match self {
            Uid::Numeric(n) => n.to_string(),
            Uid::Text(s) => s.clone(),
        }
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Uid::Numeric(n) => write!(f, "{}", n),
            Uid::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for Uid {
    fn from(n: u64) -> Self {
        Uid::Numeric(n)
    }
}

impl From<u32> for Uid {
    fn from(n: u32) -> Self {
        Uid::Numeric(n as u64)
    }
}

impl From<&str> for Uid {
    fn from(s: &str) -> Self {
        Uid::Text(s.to_string())
    }
}

impl From<String> for Uid {
    fn from(s: String) -> Self {
        Uid::Text(s)
    }
}

/// Current Unix time in seconds, as carried in 32-bit token fields
///
/// Saturates at `u32::MAX` past 2106 and reads 0 if the clock is before the epoch.
pub fn unix_now() -> u32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    u32::try_from(secs).unwrap_or(u32::MAX)
}
