//! Token issuance policy
//!
//! Validates caller input, grants privileges for the configured lifetime and
//! shapes the response handed back to clients.

use crate::config::Config;
use anyhow::{Context, Result};
use rtctoken_core::{build, BuildRequest, Privilege, PrivilegeSet, TokenError, Uid};
use serde::Serialize;
use tracing::info;

/// Longest channel name accepted from callers, in characters
pub const MAX_CHANNEL_NAME_CHARS: usize = 64;

/// Issued token plus the claims echoed for the caller's bookkeeping
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    pub app_id: String,
    pub channel: String,
    pub uid: Uid,
    pub expires: u32,
}

pub fn validate_channel_name(name: &str) -> rtctoken_core::Result<()> {
    if name.trim().is_empty() {
        return Err(TokenError::InvalidInput("channel name is empty".to_string()));
    }
    let chars = name.chars().count();
    if chars > MAX_CHANNEL_NAME_CHARS {
        return Err(TokenError::InvalidInput(format!(
            "channel name is {} characters, max {}",
            chars, MAX_CHANNEL_NAME_CHARS
        )));
    }
    Ok(())
}

/// Canonical decimal uids become numeric, anything else is kept verbatim as text
///
/// The signed uid string must equal what the client joins with, so `"007"`,
/// `"+5"` and `" 12"` are not rewritten.
pub fn parse_uid(raw: &str) -> Uid {
    raw.parse::<u64>()
        .ok()
        .filter(|n| n.to_string() == raw)
        .map(Uid::Numeric)
        .unwrap_or_else(|| Uid::Text(raw.to_string()))
}

/// Parse a comma-separated privilege list such as `join,audio`
pub fn parse_privileges(raw: &str) -> rtctoken_core::Result<Vec<Privilege>> {
    let mut privileges = Vec::new();
    for name in raw.split(',').filter(|s| !s.trim().is_empty()) {
        let privilege: Privilege = name.parse()?;
        if !privileges.contains(&privilege) {
            privileges.push(privilege);
        }
    }
    if privileges.is_empty() {
        return Err(TokenError::InvalidInput("no privileges requested".to_string()));
    }
    Ok(privileges)
}

/// Issue a token whose privileges all expire `config.ttl_secs` after `now`
pub fn issue(
    config: &Config,
    channel: &str,
    uid: Uid,
    privileges: &[Privilege],
    now: u32,
) -> Result<IssuedToken> {
    validate_channel_name(channel)?;

    let expires = now.saturating_add(config.ttl_secs);
    let grants = privileges
        .iter()
        .fold(PrivilegeSet::new(), |set, p| set.with(*p, expires));

    let request = BuildRequest::new(config.app_id.as_str(), &config.certificate, channel, uid.clone(), grants)
        .with_salt(now);
    let token = build(&request).context("failed to build access token")?;

    info!(
        channel = %channel,
        uid = %uid,
        privileges = privileges.len(),
        expires,
        "issued access token"
    );

    Ok(IssuedToken {
        token,
        app_id: config.app_id.clone(),
        channel: channel.to_string(),
        uid,
        expires,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtctoken_core::{inspect, AppCertificate};

    fn config() -> Config {
        Config {
            app_id: "a1b2c3".to_string(),
            certificate: AppCertificate::new("secret").unwrap(),
            ttl_secs: 3600,
        }
    }

    #[test]
    fn test_channel_name_limits() {
        assert!(validate_channel_name("room1").is_ok());
        assert!(validate_channel_name(&"é".repeat(64)).is_ok());
        assert!(validate_channel_name(&"x".repeat(65)).is_err());
        assert!(validate_channel_name("").is_err());
        assert!(validate_channel_name("   ").is_err());
    }

    #[test]
    fn test_parse_uid() {
        assert_eq!(parse_uid("1000"), Uid::Numeric(1000));
        assert_eq!(parse_uid("guest"), Uid::Text("guest".to_string()));
        assert_eq!(parse_uid("-1"), Uid::Text("-1".to_string()));
        assert_eq!(parse_uid("0"), Uid::Numeric(0));
    }

    #[test]
    fn test_parse_uid_keeps_non_canonical_text() {
        for raw in ["007", "+5", " 12", "12 ", " ab"] {
            let uid = parse_uid(raw);
            assert_eq!(uid, Uid::Text(raw.to_string()));
            assert_eq!(uid.to_wire_string(), raw);
        }
    }

    #[test]
    fn test_issue_signs_uid_as_given() {
        let issued = issue(&config(), "room1", parse_uid("007"), &Privilege::ALL, 100).unwrap();
        assert_eq!(inspect(&issued.token).unwrap().claims.uid, "007");

        let json = serde_json::to_value(&issued).unwrap();
        assert_eq!(json["uid"], "007");
    }

    #[test]
    fn test_parse_privileges() {
        assert_eq!(
            parse_privileges("join, audio,join").unwrap(),
            vec![Privilege::JoinChannel, Privilege::PublishAudioStream]
        );
        assert!(parse_privileges("").is_err());
        assert!(parse_privileges("join,screen").is_err());
    }

    #[test]
    fn test_issue_matches_reference_token() {
        let issued = issue(
            &config(),
            "room1",
            Uid::Numeric(1000),
            &[Privilege::JoinChannel],
            1_700_000_000,
        )
        .unwrap();

        assert_eq!(issued.expires, 1_700_003_600);
        assert_eq!(
            issued.token,
            "IADwcq1V0qhtF8z4ajXinPwhDsFMOAJiaA1OqUhYG1KftAYAYTFiMmMzBQByb29tMQQAMTAwMADxU2UQ/1NlAQABABD/U2U="
        );
    }

    #[test]
    fn test_issue_grants_requested_privileges() {
        let issued = issue(
            &config(),
            "room1",
            Uid::Text("guest".to_string()),
            &Privilege::ALL,
            1_700_000_000,
        )
        .unwrap();

        let claims = inspect(&issued.token).unwrap().claims;
        assert_eq!(claims.uid, "guest");
        assert_eq!(claims.privileges.len(), 4);
        assert!(claims.privileges.iter().all(|(_, e)| e == 1_700_003_600));
    }

    #[test]
    fn test_issue_rejects_long_channel() {
        let err = issue(&config(), &"x".repeat(65), Uid::Numeric(1), &Privilege::ALL, 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TokenError>(),
            Some(TokenError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_response_shape() {
        let issued = issue(&config(), "room1", Uid::Numeric(7), &Privilege::ALL, 100).unwrap();
        let json = serde_json::to_value(&issued).unwrap();
        assert_eq!(json["appId"], "a1b2c3");
        assert_eq!(json["channel"], "room1");
        assert_eq!(json["uid"], 7);
        assert_eq!(json["expires"], 3700);
        assert!(json["token"].is_string());
    }
}
