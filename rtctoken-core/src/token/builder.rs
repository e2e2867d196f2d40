//! Token builds
//!
//! A [`BuildRequest`] is assembled once by the caller and handed to
//! [`build`], which is a pure function of the request.

use crate::{
    token::{pack, sign, AppCertificate, ClaimPayload, PrivilegeSet},
    unix_now, Result, Uid,
};
use tracing::debug;

/// Everything needed to build one token
#[derive(Debug, Clone)]
pub struct BuildRequest<'a> {
    app_id: String,
    certificate: &'a AppCertificate,
    channel_name: String,
    uid: Uid,
    privileges: PrivilegeSet,
    salt: u32,
}

impl<'a> BuildRequest<'a> {
    /// Create a request salted with the current Unix time
    pub fn new(
        app_id: impl Into<String>,
        certificate: &'a AppCertificate,
        channel_name: impl Into<String>,
        uid: impl Into<Uid>,
        privileges: PrivilegeSet,
    ) -> Self {
        BuildRequest {
            app_id: app_id.into(),
            certificate,
            channel_name: channel_name.into(),
            uid: uid.into(),
            privileges,
            salt: unix_now(),
        }
    }

    /// Pin the salt (for testing and reproducible builds)
    pub fn with_salt(mut self, salt: u32) -> Self {
        self.salt = salt;
        self
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    pub fn privileges(&self) -> &PrivilegeSet {
        &self.privileges
    }

    pub fn salt(&self) -> u32 {
        self.salt
    }

    /// Overall expiry, the latest privilege expiry
    pub fn expired_ts(&self) -> u32 {
        self.privileges.expired_ts()
    }

    /// Claims this request will sign and ship
    pub fn claims(&self) -> ClaimPayload {
        ClaimPayload {
            app_id: self.app_id.clone(),
            channel_name: self.channel_name.clone(),
            uid: self.uid.to_wire_string(),
            salt: self.salt,
            expired_ts: self.expired_ts(),
            privileges: self.privileges.clone(),
        }
    }
}

/// Build the base64 wire token for a request
pub fn build(request: &BuildRequest<'_>) -> Result<String> {
    let claims = request.claims().encode()?;
    let signature = sign(request.certificate, request.salt, &claims)?;
    let token = pack(&signature, &claims)?;

    debug!(
        app_id = %request.app_id,
        channel = %request.channel_name,
        uid = %request.uid,
        privileges = request.privileges.len(),
        expired_ts = request.expired_ts(),
        "built access token"
    );

    Ok(token)
}
