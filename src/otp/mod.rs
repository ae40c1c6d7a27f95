//! One-Time Password Engine
//!
//! HOTP (RFC 4226) and TOTP (RFC 6238) code generation and verification,
//! Base32 secrets and `otpauth://` provisioning URIs.

pub mod base32;
pub mod hotp;
pub mod params;
pub mod qr;
pub mod secret;
pub mod totp;
pub mod uri;

use thiserror::Error;

/// OTP errors
#[derive(Debug, Error)]
pub enum OtpError {
    #[error("Entropy source failed: {0}")]
    Entropy(String),

    #[error("HMAC primitive failed: {0}")]
    CryptoPrimitive(String),

    #[error("Malformed secret: invalid character {character:?} at position {position}")]
    MalformedSecret { position: usize, character: char },

    #[error("Invalid secret length: {0}")]
    InvalidSecretLength(usize),

    #[error("Invalid digit count: {0} (supported: 1-{max})", max = params::MAX_DIGITS)]
    InvalidDigits(u32),

    #[error("Invalid period: must be at least one second")]
    InvalidPeriod,

    #[error("Invalid window: {0} (supported: 0-{max})", max = params::MAX_WINDOW)]
    InvalidWindow(u64),

    #[error("Clock reads before the Unix epoch: {0}")]
    TimeBeforeEpoch(i64),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("QR encoding failed: {0}")]
    QrEncoding(String),
}

pub type OtpResult<T> = Result<T, OtpError>;

// Re-exports
pub use base32::{decode, decode_strict, encode};
pub use hotp::{generate_hotp, verify_hotp};
pub use params::{Algorithm, OtpParameters, SecretDecoding};
pub use qr::{render_provisioning_qr, ErrorCorrection, QrEncoder, QrOptions};
pub use secret::{generate_default_secret, generate_secret, SecretKey};
pub use totp::{generate_totp, verify_totp, Clock, FixedClock, SystemClock, TotpEngine};
pub use uri::{build_uri, ProvisioningUri};
