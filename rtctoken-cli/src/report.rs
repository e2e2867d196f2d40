//! JSON view of a decoded token

use rtctoken_core::{InspectedToken, Privilege};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenReport {
    pub signature: String,
    pub app_id: String,
    pub channel: String,
    pub uid: String,
    pub salt: u32,
    pub expired_ts: u32,
    pub privileges: Vec<PrivilegeEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivilegeEntry {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Privilege>,
    pub expire_at: u32,
}

impl From<InspectedToken> for TokenReport {
    fn from(inspected: InspectedToken) -> Self {
        let claims = inspected.claims;
        TokenReport {
            signature: hex::encode(&inspected.signature),
            privileges: claims
                .privileges
                .iter()
                .map(|(code, expire_at)| PrivilegeEntry {
                    code,
                    name: Privilege::from_code(code),
                    expire_at,
                })
                .collect(),
            app_id: claims.app_id,
            channel: claims.channel_name,
            uid: claims.uid,
            salt: claims.salt,
            expired_ts: claims.expired_ts,
        }
    }
}
