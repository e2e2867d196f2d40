//! Issuer configuration from the environment

use anyhow::{Context, Result};
use rtctoken_core::AppCertificate;
use std::env;

pub const APP_ID_VAR: &str = "RTC_APP_ID";
pub const APP_CERTIFICATE_VAR: &str = "RTC_APP_CERTIFICATE";
pub const TOKEN_TTL_VAR: &str = "RTC_TOKEN_TTL_SECS";

/// One hour, the lifetime granted to every privilege by default
pub const DEFAULT_TTL_SECS: u32 = 3600;

#[derive(Debug)]
pub struct Config {
    pub app_id: String,
    pub certificate: AppCertificate,
    pub ttl_secs: u32,
}

/// Values given on the command line, which win over the environment
#[derive(Debug, Default)]
pub struct Overrides {
    pub app_id: Option<String>,
    pub ttl_secs: Option<u32>,
}

impl Config {
    pub fn from_env(overrides: Overrides) -> Result<Self> {
        Self::load(|key| env::var(key).ok(), overrides)
    }

    /// Resolve configuration through `lookup`
    pub fn load(lookup: impl Fn(&str) -> Option<String>, overrides: Overrides) -> Result<Self> {
        let app_id = overrides
            .app_id
            .or_else(|| lookup(APP_ID_VAR))
            .filter(|id| !id.trim().is_empty())
            .with_context(|| format!("app id not set (use --app-id or {})", APP_ID_VAR))?;

        let certificate = AppCertificate::from_optional(lookup(APP_CERTIFICATE_VAR))
            .with_context(|| format!("{} must be set to the app certificate", APP_CERTIFICATE_VAR))?;

        let ttl_secs = match overrides.ttl_secs {
            Some(ttl) => ttl,
            None => match lookup(TOKEN_TTL_VAR) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid {}: '{}'", TOKEN_TTL_VAR, raw))?,
                None => DEFAULT_TTL_SECS,
            },
        };

        Ok(Config {
            app_id,
            certificate,
            ttl_secs,
        })
    }
}
