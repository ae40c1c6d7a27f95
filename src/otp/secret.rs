//! Shared Secrets
//!
//! Secret generation from the operating system CSPRNG and the decoded key
//! material handed to the HMAC.

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::base32;
use super::params::{SecretDecoding, DEFAULT_SECRET_BYTES};
use super::{OtpError, OtpResult};

/// Decoded secret bytes, wiped on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    key: Vec<u8>,
}

impl SecretKey {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { key: bytes }
    }

    /// Decode a Base32 secret with the given mode
    pub fn from_base32(secret: &str, decoding: SecretDecoding) -> OtpResult<Self> {
        let key = match decoding {
            SecretDecoding::Lenient => base32::decode(secret),
            SecretDecoding::Strict => base32::decode_strict(secret)?,
        };
        Ok(Self { key })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Canonical padded Base32 form
    pub fn to_base32(&self) -> String {
        base32::encode(&self.key)
    }
}

impl AsRef<[u8]> for SecretKey {
    fn as_ref(&self) -> &[u8] {
        &self.key
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretKey([REDACTED; {}])", self.key.len())
    }
}

/// Generate `byte_len` random bytes and return them Base32 encoded.
///
/// Only the OS entropy source is used; if it fails the error is returned
/// rather than falling back to anything weaker.
pub fn generate_secret(byte_len: usize) -> OtpResult<String> {
    if byte_len == 0 {
        return Err(OtpError::InvalidSecretLength(0));
    }

    let mut bytes = vec![0u8; byte_len];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| OtpError::Entropy(e.to_string()))?;
    debug!(byte_len, "generated OTP secret");

    let key = SecretKey::from_bytes(bytes);
    Ok(key.to_base32())
}

/// Generate a 160-bit secret
pub fn generate_default_secret() -> OtpResult<String> {
    generate_secret(DEFAULT_SECRET_BYTES)
}
