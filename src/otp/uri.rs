//! Provisioning URIs
//!
//! Builds the `otpauth://totp/` URI authenticator apps read from a QR code
//! or accept for manual entry.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::params::OtpParameters;

/// Enrollment details for an authenticator app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisioningUri {
    /// Issuer (e.g., "GitHub")
    pub issuer: String,
    /// Account name (e.g., "user@example.com")
    pub account: String,
    /// Base32-encoded secret
    pub secret: String,
    pub params: OtpParameters,
}

impl ProvisioningUri {
    pub fn new(issuer: &str, account: &str, secret: &str, params: OtpParameters) -> Self {
        Self {
            issuer: issuer.to_string(),
            account: account.to_string(),
            secret: secret.to_string(),
            params,
        }
    }
}

impl fmt::Display for ProvisioningUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let issuer = encode_component(&self.issuer);
        let account = encode_component(&self.account);

        // Base32 is already URI-safe, so the secret goes in as is
        write!(
            f,
            "otpauth://totp/{issuer}:{account}?secret={}&issuer={issuer}&algorithm={}&digits={}&period={}",
            self.secret, self.params.algorithm, self.params.digits, self.params.period
        )
    }
}

/// Percent-encode a label component, leaving `! * ' ( )` literal as
/// `encodeURIComponent` does
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    let mut buf = [0u8; 4];
    for c in value.chars() {
        match c {
            '!' | '*' | '\'' | '(' | ')' => encoded.push(c),
            _ => encoded.push_str(&urlencoding::encode(c.encode_utf8(&mut buf))),
        }
    }
    encoded
}

/// Build the `otpauth://` URI for an issuer, account and secret
pub fn build_uri(issuer: &str, account: &str, secret: &str, params: &OtpParameters) -> String {
    ProvisioningUri::new(issuer, account, secret, *params).to_string()
}
