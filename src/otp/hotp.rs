//! HMAC-based One-Time Password (HOTP)
//!
//! Implements RFC 4226 dynamic truncation over HMAC-SHA1, with SHA-256 and
//! SHA-512 available through [`Algorithm`].

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;

use super::params::{Algorithm, OtpParameters};
use super::secret::SecretKey;
use super::{OtpError, OtpResult};

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Generate the HOTP code for a Base32 secret and counter
pub fn generate_hotp(secret: &str, counter: u64, params: &OtpParameters) -> OtpResult<String> {
    params.validate()?;
    let key = SecretKey::from_base32(secret, params.decoding)?;
    hotp_with_key(&key, counter, params)
}

/// Check a candidate against the code for exactly `counter`
pub fn verify_hotp(
    candidate: &str,
    secret: &str,
    counter: u64,
    params: &OtpParameters,
) -> OtpResult<bool> {
    let expected = generate_hotp(secret, counter, params)?;
    Ok(codes_match(candidate, &expected))
}

/// HOTP from already decoded key bytes. Parameters must be validated.
pub(crate) fn hotp_with_key(
    key: &SecretKey,
    counter: u64,
    params: &OtpParameters,
) -> OtpResult<String> {
    let digest = sign(key.as_bytes(), &counter.to_be_bytes(), params.algorithm)?;
    let value = truncate(&digest) % params.modulus();

    Ok(format!("{:0width$}", value, width = params.digits as usize))
}

/// Constant-time comparison; codes of different length never match.
pub(crate) fn codes_match(candidate: &str, expected: &str) -> bool {
    candidate.as_bytes().ct_eq(expected.as_bytes()).into()
}

fn sign(key: &[u8], message: &[u8], algorithm: Algorithm) -> OtpResult<Vec<u8>> {
    match algorithm {
        Algorithm::Sha1 => compute_hmac::<HmacSha1>(key, message),
        Algorithm::Sha256 => compute_hmac::<HmacSha256>(key, message),
        Algorithm::Sha512 => compute_hmac::<HmacSha512>(key, message),
    }
}

fn compute_hmac<M: Mac + hmac::digest::KeyInit>(key: &[u8], message: &[u8]) -> OtpResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| OtpError::CryptoPrimitive(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// RFC 4226 dynamic truncation to a 31-bit value
fn truncate(digest: &[u8]) -> u32 {
    let offset = (digest[digest.len() - 1] & 0x0F) as usize;
    u32::from_be_bytes([
        digest[offset] & 0x7F,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ])
}
